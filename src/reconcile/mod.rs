pub mod matcher;
pub mod outline;
