//! Tower Layer implementations for the GraphQL endpoint

pub mod limit;

pub use limit::{BatchLimitLayer, BatchLimitService};
