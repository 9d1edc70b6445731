//! # Tower GraphQL Batch
//!
//! A Tower-based GraphQL endpoint that accepts either a single request object
//! or a batch array of requests, and answers in the shape the caller used.
//!
//! At its core is a one-or-many request codec that inspects a JSON token
//! stream before knowing whether it holds one request or many, decodes it into
//! the container type the caller asks for, and writes sequences back as JSON
//! arrays one element at a time.
//!
//! ## Features
//!
//! - **Streaming Batch Codec**: Decodes single objects and batch arrays over a forward-only token cursor
//! - **Pluggable Element Codecs**: Request field grammar lives behind a strategy trait
//! - **serde Integration**: `#[serde(with)]` support for one-or-many request fields
//! - **Composable Middleware**: Batch admission control as a Tower layer
//!
//! ## Example
//!
//! ```rust
//! use tower_graphql_batch::prelude::*;
//!
//! let codec = RequestBatchCodec::json();
//!
//! let single = codec
//!     .decode_slice(br#"{"query": "{ a }"}"#, TargetShape::MutableList)
//!     .unwrap();
//! assert_eq!(single.len(), 1);
//!
//! let batch = codec
//!     .decode_slice(br#"[{"query": "{ a }"}, {"query": "{ b }"}]"#, TargetShape::FixedArray)
//!     .unwrap();
//! assert_eq!(batch.len(), 2);
//!
//! // encoding is always an array
//! let bytes = codec.encode_to_vec(&single).unwrap();
//! assert_eq!(bytes, br#"[{"query":"{ a }"}]"#);
//! ```

pub mod codec;
pub mod layer;
pub mod protocol;
pub mod server;
pub mod service;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        codec::{json::RequestBatchCodec, BatchCodec, JsonCursor, JsonElementCodec, TokenStream},
        protocol::{
            DecodeError, ExecutionResult, GraphQLError, GraphQLRequest, GraphQLResult,
            GraphQLServerError, RequestBatch, TargetShape, TypeDescriptor,
        },
        server::{EndpointBuilder, EndpointConfig},
        service::{EndpointResponse, Executor, ResultWriter},
    };
}
