pub mod intent;
pub mod parser;
