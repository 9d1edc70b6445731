//! Builder assembling a GraphQL endpoint from its collaborators

use std::sync::Arc;

use tower::ServiceBuilder;

use crate::{
    layer::{BatchLimitLayer, BatchLimitService},
    protocol::error::GraphQLServerError,
    server::EndpointConfig,
    service::{ExecutionService, Executor, GraphQLEndpoint, JsonResultWriter, ResultWriter},
};

/// The endpoint type produced by [`EndpointBuilder`]
pub type Endpoint<E> = GraphQLEndpoint<BatchLimitService<ExecutionService<E>>>;

/// Builder for GraphQL endpoints
///
/// An executor and a result writer are both required. The writer is never
/// defaulted so that the wire format is always an explicit choice.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use tower_graphql_batch::prelude::*;
///
/// struct Hello;
///
/// #[async_trait]
/// impl Executor for Hello {
///     async fn execute(&self, _request: GraphQLRequest) -> GraphQLResult<ExecutionResult> {
///         Ok(ExecutionResult::data(serde_json::json!({ "hello": "world" })))
///     }
/// }
///
/// let endpoint = EndpointBuilder::new()
///     .with_executor(Hello)
///     .with_json_writer()
///     .with_max_batch_size(10)
///     .build();
/// assert!(endpoint.is_ok());
/// ```
pub struct EndpointBuilder<E> {
    executor: Option<E>,
    writer: Option<Arc<dyn ResultWriter>>,
    config: EndpointConfig,
}

impl<E: Executor> EndpointBuilder<E> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            executor: None,
            writer: None,
            config: EndpointConfig::default(),
        }
    }

    /// Set the executor requests are run through
    pub fn with_executor(mut self, executor: E) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Use a custom result writer
    pub fn with_writer(mut self, writer: Arc<dyn ResultWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Use the JSON result writer
    pub fn with_json_writer(self) -> Self {
        self.with_writer(Arc::new(JsonResultWriter::new()))
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EndpointConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable batch arrays (default: enabled)
    pub fn with_batching(mut self, enabled: bool) -> Self {
        self.config = self.config.with_batching(enabled);
        self
    }

    /// Bound the number of requests per batch (default: unbounded)
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.config = self.config.with_max_batch_size(max_batch_size);
        self
    }

    /// Build the endpoint
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - No result writer has been registered
    /// - No executor has been set
    pub fn build(self) -> Result<Endpoint<E>, GraphQLServerError> {
        let writer = self.writer.ok_or_else(|| {
            GraphQLServerError::Configuration(
                "ResultWriter not set. Register a ResultWriter implementation, for example \
                 JsonResultWriter, with with_writer() or with_json_writer()"
                    .into(),
            )
        })?;

        let executor = self.executor.ok_or_else(|| {
            GraphQLServerError::Configuration("Executor not set. Call with_executor()".into())
        })?;

        let service = ServiceBuilder::new()
            .layer(BatchLimitLayer::new(self.config.max_batch_size))
            .service(ExecutionService::new(executor));

        Ok(GraphQLEndpoint::new(service, writer, self.config))
    }
}

impl<E: Executor> Default for EndpointBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
