//! Tower Service implementations

pub mod core;
pub mod endpoint;
pub mod executor;
pub mod request;
pub mod response;
pub mod writer;

pub use core::ExecutionService;
pub use endpoint::GraphQLEndpoint;
pub use executor::Executor;
pub use request::BatchRequest;
pub use response::{BatchResponse, EndpointResponse};
pub use writer::{JsonResultWriter, ResultWriter};
