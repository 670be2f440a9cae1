pub mod dashboard;
pub mod growth;
pub mod household;
pub mod metrics;
