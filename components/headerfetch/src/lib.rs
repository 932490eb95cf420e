//! Recovery of canonical headers that are referenced locally but whose data
//! was never stored (or was pruned away): fetches them from a pool of remote
//! JSON-RPC endpoints and writes them back into the header store.

pub mod error;
pub mod transport;
pub mod wire;

pub use crate::error::{FetchError, FetchResult};
pub use crate::transport::{HttpTransport, RpcTransport};

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crate::wire::RpcResponse;
use ember_chain::model::stores::{canonical::CanonicalStoreReader, headers::HeaderStore};
use ember_chain_core::header::Header;
use ember_database::prelude::{StoreError, StoreResultExtensions};
use ember_hashes::Hash;
use log::{debug, warn};
use rand::Rng;

/// Fetches headers by hash over `eth_getBlockByHash`, retrying across a pool
/// of endpoints until one answers or a shutdown is signalled.
pub struct HeaderFetcher<X: RpcTransport> {
    endpoints: Vec<String>,
    transport: X,
    retry_interval: Duration,
    shutdown: Option<triggered::Listener>,
    next_id: AtomicU64,
}

impl<X: RpcTransport> HeaderFetcher<X> {
    pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(2);

    pub fn new(
        endpoints: Vec<String>,
        transport: X,
        retry_interval: Duration,
        shutdown: Option<triggered::Listener>,
    ) -> FetchResult<Self> {
        if endpoints.is_empty() {
            return Err(FetchError::NoEndpoints);
        }
        Ok(Self { endpoints, transport, retry_interval, shutdown, next_id: AtomicU64::new(1) })
    }

    fn interrupted(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|listener| listener.is_triggered())
    }

    /// Fetches the header with the given hash, retrying indefinitely. Each
    /// attempt targets a randomly chosen endpoint so one dead endpoint cannot
    /// stall recovery. Returns [`FetchError::Interrupted`] once shutdown is
    /// signalled; no other error escapes this loop.
    pub fn fetch_header_by_hash(&self, hash: Hash) -> FetchResult<Header> {
        loop {
            if self.interrupted() {
                return Err(FetchError::Interrupted);
            }
            let endpoint = &self.endpoints[rand::thread_rng().gen_range(0..self.endpoints.len())];
            match self.attempt(endpoint, hash) {
                Ok(header) => {
                    debug!("Header fetch: recovered {hash} from {endpoint}");
                    return Ok(header);
                }
                Err(reason) => {
                    warn!("Header fetch: {endpoint} failed for {hash}: {reason}; retrying in {:?}", self.retry_interval);
                    thread::sleep(self.retry_interval);
                }
            }
        }
    }

    fn attempt(&self, endpoint: &str, hash: Hash) -> Result<Header, String> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_getBlockByHash",
            "params": [format!("0x{hash}"), true],
            "id": id,
        })
        .to_string();
        let raw = self.transport.post(endpoint, &body).map_err(|err| err.to_string())?;
        let response: RpcResponse = serde_json::from_str(&raw).map_err(|err| format!("undecodable response: {err}"))?;
        if let Some(error) = response.error {
            return Err(format!("remote error: {error}"));
        }
        let wire = response.result.ok_or("block unknown to remote")?;
        let header: Header = wire.try_into()?;
        // A header that does not hash to what we asked for is useless no
        // matter how well-formed it is
        if header.hash() != hash {
            return Err(format!("remote answered with header {} instead of {hash}", header.hash()));
        }
        Ok(header)
    }

    /// Recovers the canonical header at `number` if it is missing locally.
    /// Returns `Ok(None)` when there is nothing to do: no canonical hash is
    /// recorded at that height, or the header is already present.
    pub fn resolve_missing_header(
        &self,
        canonical: &impl CanonicalStoreReader,
        headers: &impl HeaderStore,
        number: u64,
    ) -> FetchResult<Option<Header>> {
        let Some(hash) = canonical.canonical_hash(number).optional()? else {
            return Ok(None);
        };
        if headers.has(hash)? {
            return Ok(None);
        }
        let header = self.fetch_header_by_hash(hash)?;
        match headers.insert(hash, header.clone()) {
            Ok(()) => {}
            // A concurrent recovery beat us to it; theirs is as good as ours
            Err(StoreError::KeyAlreadyExists(_)) => {}
            Err(err) => return Err(err.into()),
        }
        Ok(Some(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_chain::model::stores::{
        canonical::{CanonicalStore, DbCanonicalStore},
        headers::{DbHeadersStore, HeaderStoreReader},
    };
    use ember_database::prelude::ConnBuilder;
    use ember_hashes::keccak256;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    struct ScriptedTransport {
        responses: Mutex<VecDeque<FetchResult<String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<FetchResult<String>>) -> Self {
            Self { responses: Mutex::new(responses.into()), calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl RpcTransport for &ScriptedTransport {
        fn post(&self, _url: &str, _body: &str) -> FetchResult<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.responses.lock().pop_front().unwrap_or(Err(FetchError::Transport("script exhausted".to_string())))
        }
    }

    fn sample_header(number: u64) -> Header {
        Header {
            parent_hash: keccak256(b"parent"),
            number,
            state_root: keccak256(b"state"),
            transactions_root: keccak256(b"txs"),
            receipts_root: keccak256(b"receipts"),
            timestamp: 1_700_000_000,
        }
    }

    fn rpc_payload(header: &Header) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "parentHash": format!("0x{}", header.parent_hash),
                "number": format!("0x{:x}", header.number),
                "stateRoot": format!("0x{}", header.state_root),
                "transactionsRoot": format!("0x{}", header.transactions_root),
                "receiptsRoot": format!("0x{}", header.receipts_root),
                "timestamp": format!("0x{:x}", header.timestamp),
            },
        })
        .to_string()
    }

    fn fetcher(transport: &ScriptedTransport) -> HeaderFetcher<&ScriptedTransport> {
        HeaderFetcher::new(
            vec!["http://one.example".to_string(), "http://two.example".to_string()],
            transport,
            Duration::from_millis(1),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_retries_until_an_endpoint_answers() {
        let header = sample_header(42);
        let transport = ScriptedTransport::new(vec![
            Err(FetchError::Transport("connection refused".to_string())),
            Ok("not even json".to_string()),
            Ok(rpc_payload(&header)),
        ]);

        let fetched = fetcher(&transport).fetch_header_by_hash(header.hash()).unwrap();
        assert_eq!(fetched.hash(), header.hash());
        assert_eq!(fetched.number, 42);
        assert_eq!(transport.calls(), 3);
    }

    #[test]
    fn test_mismatching_header_is_rejected() {
        let wanted = sample_header(7);
        let imposter = sample_header(8);
        let transport = ScriptedTransport::new(vec![Ok(rpc_payload(&imposter)), Ok(rpc_payload(&wanted))]);

        let fetched = fetcher(&transport).fetch_header_by_hash(wanted.hash()).unwrap();
        assert_eq!(fetched.hash(), wanted.hash());
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_shutdown_interrupts_fetch() {
        let transport = ScriptedTransport::new(vec![]);
        let (trigger, listener) = triggered::trigger();
        let fetcher = HeaderFetcher::new(
            vec!["http://one.example".to_string()],
            &transport,
            Duration::from_millis(1),
            Some(listener),
        )
        .unwrap();

        trigger.trigger();
        assert!(matches!(fetcher.fetch_header_by_hash(keccak256(b"whatever")), Err(FetchError::Interrupted)));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_empty_endpoint_pool_is_rejected() {
        let transport = ScriptedTransport::new(vec![]);
        assert!(matches!(
            HeaderFetcher::new(vec![], &transport, Duration::from_millis(1), None),
            Err(FetchError::NoEndpoints)
        ));
    }

    #[test]
    fn test_resolve_recovers_and_is_idempotent() {
        let (_lifetime, db) = ember_database::create_temp_db!(ConnBuilder::default());
        let canonical = DbCanonicalStore::new(Arc::clone(&db), 4);
        let headers = DbHeadersStore::new(Arc::clone(&db), 4);

        let header = sample_header(5);
        canonical.set_canonical_hash(5, header.hash()).unwrap();
        let transport = ScriptedTransport::new(vec![Ok(rpc_payload(&header))]);
        let fetcher = fetcher(&transport);

        let recovered = fetcher.resolve_missing_header(&canonical, &headers, 5).unwrap();
        assert_eq!(recovered.unwrap().hash(), header.hash());
        assert!(headers.has(header.hash()).unwrap());
        assert_eq!(transport.calls(), 1);

        // Already present: no further network traffic
        assert!(fetcher.resolve_missing_header(&canonical, &headers, 5).unwrap().is_none());
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_resolve_without_canonical_hash_is_a_noop() {
        let (_lifetime, db) = ember_database::create_temp_db!(ConnBuilder::default());
        let canonical = DbCanonicalStore::new(Arc::clone(&db), 4);
        let headers = DbHeadersStore::new(Arc::clone(&db), 4);
        let transport = ScriptedTransport::new(vec![]);

        assert!(fetcher(&transport).resolve_missing_header(&canonical, &headers, 9).unwrap().is_none());
        assert_eq!(transport.calls(), 0);
    }
}
