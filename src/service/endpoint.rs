//! Request-body level GraphQL endpoint

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use bytes::Bytes;
use tower_service::Service;

use crate::{
    protocol::{error::GraphQLServerError, response::GraphQLError},
    server::EndpointConfig,
    service::{BatchRequest, BatchResponse, EndpointResponse, ResultWriter},
};

/// Tower service turning a raw request body into a serialized response
///
/// The body may hold one request object or a batch array; results come back
/// in the same shape. Malformed bodies, disabled batching and rejected
/// batches produce a 400 response. Any other failure is returned as an error
/// for the transport to map.
pub struct GraphQLEndpoint<S> {
    inner: S,
    writer: Arc<dyn ResultWriter>,
    config: EndpointConfig,
}

impl<S> GraphQLEndpoint<S> {
    /// Create a new endpoint
    ///
    /// # Arguments
    ///
    /// * `inner` - The service executing decoded requests
    /// * `writer` - The writer serializing results and errors
    /// * `config` - Endpoint configuration
    pub fn new(inner: S, writer: Arc<dyn ResultWriter>, config: EndpointConfig) -> Self {
        Self {
            inner,
            writer,
            config,
        }
    }

    /// Get the endpoint configuration
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Decode a body and check that it may be executed
    fn admit(&self, body: &[u8]) -> Result<BatchRequest, GraphQLServerError> {
        let request = BatchRequest::from_body(body)?;

        if request.is_batch && !self.config.batching_enabled {
            return Err(GraphQLServerError::Validation(
                "Batched requests are not enabled".into(),
            ));
        }

        Ok(request)
    }

    /// Render a caller error as a 400 response
    fn bad_request(
        writer: &dyn ResultWriter,
        err: &GraphQLServerError,
    ) -> Result<EndpointResponse, GraphQLServerError> {
        tracing::warn!(error = %err, "rejecting request");

        let error = GraphQLError::new(err.to_string()).with_code("BAD_REQUEST");
        let body = writer.write_errors(&[error])?;
        Ok(EndpointResponse::bad_request(body, writer.content_type()))
    }
}

impl<S> Service<Bytes> for GraphQLEndpoint<S>
where
    S: Service<BatchRequest, Response = BatchResponse, Error = GraphQLServerError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = EndpointResponse;
    type Error = GraphQLServerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, body: Bytes) -> Self::Future {
        let writer = self.writer.clone();

        let request = match self.admit(&body) {
            Ok(request) => request,
            Err(e) => {
                let response = Self::bad_request(writer.as_ref(), &e);
                return Box::pin(async move { response });
            }
        };

        let mut inner = self.inner.clone();
        Box::pin(async move {
            match inner.call(request).await {
                Ok(response) => {
                    let body = writer.write(&response)?;
                    Ok(EndpointResponse::ok(body, writer.content_type()))
                }
                Err(e) if e.is_bad_request() => Self::bad_request(writer.as_ref(), &e),
                Err(e) => Err(e),
            }
        })
    }
}

impl<S> Clone for GraphQLEndpoint<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            writer: self.writer.clone(),
            config: self.config.clone(),
        }
    }
}
