//! Admission control for request batches

use std::task::{Context, Poll};

use futures::future::{self, Either, Ready};
use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::error::GraphQLServerError,
    service::{BatchRequest, BatchResponse},
};

/// Layer that rejects batches holding more requests than allowed
///
/// Single-object calls are always admitted. With no limit the layer is a
/// pass-through.
#[derive(Clone, Debug, Default)]
pub struct BatchLimitLayer {
    max_batch_size: Option<usize>,
}

impl BatchLimitLayer {
    /// Create a limit layer, `None` for unbounded batches
    pub fn new(max_batch_size: Option<usize>) -> Self {
        Self { max_batch_size }
    }
}

impl<S> Layer<S> for BatchLimitLayer {
    type Service = BatchLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BatchLimitService {
            inner,
            max_batch_size: self.max_batch_size,
        }
    }
}

/// Service that enforces a maximum batch size before calling its inner service
#[derive(Clone, Debug)]
pub struct BatchLimitService<S> {
    inner: S,
    max_batch_size: Option<usize>,
}

impl<S> BatchLimitService<S> {
    fn check(&self, req: &BatchRequest) -> Result<(), GraphQLServerError> {
        match self.max_batch_size {
            Some(max) if req.is_batch && req.len() > max => {
                tracing::warn!(size = req.len(), max, "rejecting oversized batch");
                Err(GraphQLServerError::Validation(format!(
                    "Batch of {} requests exceeds the limit of {}",
                    req.len(),
                    max
                )))
            }
            _ => Ok(()),
        }
    }
}

impl<S> Service<BatchRequest> for BatchLimitService<S>
where
    S: Service<BatchRequest, Response = BatchResponse, Error = GraphQLServerError>,
{
    type Response = BatchResponse;
    type Error = GraphQLServerError;
    type Future = Either<Ready<Result<BatchResponse, GraphQLServerError>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: BatchRequest) -> Self::Future {
        match self.check(&req) {
            Ok(()) => Either::Right(self.inner.call(req)),
            Err(e) => Either::Left(future::ready(Err(e))),
        }
    }
}
