//! Core execution service

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::try_join_all;
use tower_service::Service;

use crate::{
    protocol::error::GraphQLServerError,
    service::{BatchRequest, BatchResponse, Executor},
};

/// Tower service that runs every request of a call through an [`Executor`]
///
/// Requests of a batch run concurrently; results keep request order. If the
/// executor fails for any request, the whole call fails.
pub struct ExecutionService<E> {
    executor: Arc<E>,
}

impl<E> ExecutionService<E>
where
    E: Executor,
{
    /// Create a new execution service
    pub fn new(executor: E) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    /// Create an execution service sharing an existing executor
    pub fn from_arc(executor: Arc<E>) -> Self {
        Self { executor }
    }
}

impl<E> Service<BatchRequest> for ExecutionService<E>
where
    E: Executor,
{
    type Response = BatchResponse;
    type Error = GraphQLServerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: BatchRequest) -> Self::Future {
        let executor = self.executor.clone();

        Box::pin(async move {
            let BatchRequest { requests, is_batch } = req;
            tracing::debug!(count = requests.len(), is_batch, "executing requests");

            let results =
                try_join_all(requests.into_iter().map(|request| executor.execute(request)))
                    .await?;

            Ok(BatchResponse::new(results, is_batch))
        })
    }
}

impl<E> Clone for ExecutionService<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        protocol::{request::GraphQLRequest, response::ExecutionResult},
        service::executor::MockExecutor,
    };

    #[tokio::test]
    async fn test_results_keep_request_order() {
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .times(3)
            .returning(|request| Ok(ExecutionResult::data(json!({ "q": request.query }))));

        let service = ExecutionService::new(executor);
        let request = BatchRequest::batch(vec![
            GraphQLRequest::new("{ a }"),
            GraphQLRequest::new("{ b }"),
            GraphQLRequest::new("{ c }"),
        ]);

        let response = service.oneshot(request).await.unwrap();

        assert!(response.is_batch);
        let queries: Vec<_> = response
            .results
            .iter()
            .map(|result| result.data.as_ref().unwrap()["q"].clone())
            .collect();
        assert_eq!(queries, vec![json!("{ a }"), json!("{ b }"), json!("{ c }")]);
    }

    #[tokio::test]
    async fn test_single_request() {
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .with(eq(GraphQLRequest::new("{ a }")))
            .times(1)
            .returning(|_| Ok(ExecutionResult::data(json!({"a": 1}))));

        let service = ExecutionService::new(executor);
        let response = service
            .oneshot(BatchRequest::single(GraphQLRequest::new("{ a }")))
            .await
            .unwrap();

        assert_eq!(
            response.into_single(),
            Some(ExecutionResult::data(json!({"a": 1})))
        );
    }

    #[tokio::test]
    async fn test_executor_failure_fails_call() {
        let mut executor = MockExecutor::new();
        executor.expect_execute().returning(|request| {
            if request.query.as_deref() == Some("{ boom }") {
                Err(GraphQLServerError::Other("executor crashed".into()))
            } else {
                Ok(ExecutionResult::default())
            }
        });

        let service = ExecutionService::new(executor);
        let result = service
            .oneshot(BatchRequest::batch(vec![
                GraphQLRequest::new("{ a }"),
                GraphQLRequest::new("{ boom }"),
            ]))
            .await;

        assert!(matches!(result, Err(GraphQLServerError::Other(_))));
    }
}
