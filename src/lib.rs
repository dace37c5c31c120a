pub mod audit;
pub mod cli;
pub mod command;
pub mod error;
pub mod executor;
pub mod fill;
pub mod layers;
pub mod node;
pub mod reconcile;
pub mod report;
pub mod service;
pub mod trace;
pub mod traverse;
