pub mod bodies;
pub mod canonical;
pub mod code;
pub mod diff_layers;
pub mod headers;
pub mod receipts;
pub mod state_nodes;
pub mod tx_lookups;
