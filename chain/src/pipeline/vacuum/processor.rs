use std::time::Instant;

use crate::{
    config::VacuumConfig,
    pipeline::vacuum::{sweep::SweepVacuum, windowed::WindowedVacuum, VacuumMessage, VacuumState, VacuumStores, VacuumStrategy},
    trie::TrieAccess,
};
use crossbeam_channel::{select, tick, Receiver};
use ember_hashes::Hash;
use log::{debug, info};

/// The vacuum worker. Owns the watermark and both strategies; runs each on
/// its own timer until told to exit. Intended to live on a dedicated thread:
///
/// ```ignore
/// let mut processor = VacuumProcessor::new(receiver, stores, config, genesis_hash);
/// thread::Builder::new().name("vacuum".to_string()).spawn(move || processor.worker())?;
/// ```
pub struct VacuumProcessor<T: TrieAccess> {
    receiver: Receiver<VacuumMessage>,
    stores: VacuumStores<T>,
    config: VacuumConfig,

    windowed: WindowedVacuum,
    sweep: SweepVacuum,
    state: VacuumState,
}

impl<T: TrieAccess> VacuumProcessor<T> {
    pub fn new(receiver: Receiver<VacuumMessage>, stores: VacuumStores<T>, config: VacuumConfig, genesis_hash: Hash) -> Self {
        Self {
            receiver,
            stores,
            config,
            windowed: WindowedVacuum::new(config.retention_depth),
            sweep: SweepVacuum::new(genesis_hash),
            state: VacuumState::default(),
        }
    }

    pub fn worker(&mut self) {
        let windowed_tick = tick(self.config.diff_interval);
        let sweep_tick = tick(self.config.full_interval);
        loop {
            select! {
                recv(self.receiver) -> message => match message {
                    Ok(VacuumMessage::Exit) | Err(_) => break,
                },
                recv(windowed_tick) -> _ => self.run_windowed_pass(),
                recv(sweep_tick) -> _ => self.run_sweep_pass(),
            }
        }
        debug!("Vacuum processor exiting");
    }

    pub fn run_windowed_pass(&mut self) {
        let strategy = self.windowed;
        self.run_pass(&strategy);
    }

    pub fn run_sweep_pass(&mut self) {
        let strategy = self.sweep;
        self.run_pass(&strategy);
    }

    fn run_pass(&mut self, strategy: &dyn VacuumStrategy<T>) {
        let started = Instant::now();
        strategy.execute(&self.stores, &mut self.state);
        info!(
            "Vacuum {} pass finished in {:.2}s (watermark: {})",
            strategy.ident(),
            started.elapsed().as_secs_f64(),
            self.state.last_pruned_number
        );
    }

    pub fn last_pruned_number(&self) -> u64 {
        self.state.last_pruned_number
    }
}
