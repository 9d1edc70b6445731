//! Core GraphQL-over-JSON protocol types

pub mod error;
pub mod request;
pub mod response;
pub mod shape;

pub use error::{DecodeError, EncodeError, GraphQLResult, GraphQLServerError};
pub use request::GraphQLRequest;
pub use response::{ExecutionResult, GraphQLError, Location};
pub use shape::{BatchTarget, RequestBatch, TargetShape, TypeDescriptor};
