pub mod adapter;
pub mod interface;
pub mod oracle;
