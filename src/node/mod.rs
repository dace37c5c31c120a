pub mod color;
pub mod fingerprint;
pub mod host;
pub mod memory;
pub mod node_model;
