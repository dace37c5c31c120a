pub mod info;
pub mod naming;
pub mod select;
