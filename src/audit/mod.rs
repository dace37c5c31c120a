pub mod audit_model;
pub mod scanner;
