pub mod assistant;
pub mod message;
pub mod session;
