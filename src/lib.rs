pub mod audit;
pub mod classifier;
pub mod moderation;
pub mod report;

pub mod error;
