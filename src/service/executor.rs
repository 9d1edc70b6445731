//! Execution engine seam

use std::sync::Arc;

use async_trait::async_trait;

use crate::protocol::{error::GraphQLResult, request::GraphQLRequest, response::ExecutionResult};

/// Executes one GraphQL request
///
/// Field errors, validation failures and the like belong inside the returned
/// [`ExecutionResult`]. An `Err` means the executor itself failed and aborts
/// the whole call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<ExecutionResult>;
}

#[async_trait]
impl<E: Executor> Executor for Arc<E> {
    async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<ExecutionResult> {
        (**self).execute(request).await
    }
}
