use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use tower::ServiceExt;
use tower_graphql_batch::prelude::*;

/// Executor answering every query with its operation name
struct HelloExecutor;

#[async_trait]
impl Executor for HelloExecutor {
    async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<ExecutionResult> {
        match request.query {
            Some(_) => Ok(ExecutionResult::data(json!({
                "hello": request.operation_name.unwrap_or_else(|| "anonymous".to_string()),
            }))),
            None => Ok(ExecutionResult::errors([
                GraphQLError::new("Must provide a query string").with_code("BAD_USER_INPUT")
            ])),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let endpoint = EndpointBuilder::new()
        .with_executor(HelloExecutor)
        .with_json_writer()
        .with_max_batch_size(3)
        .build()?;

    let bodies: [&'static [u8]; 5] = [
        br#"{"query": "query Greeting { hello }", "operationName": "Greeting"}"#,
        br#"[{"query": "{ hello }"}, {"query": "query Two { hello }", "operationName": "Two"}]"#,
        br#"[{"operationName": "NoQuery"}]"#,
        br#"[{}, {}, {}, {}]"#,
        br#""not a request""#,
    ];

    for body in bodies {
        println!("-> {}", String::from_utf8_lossy(body));
        let response = endpoint.clone().oneshot(Bytes::from_static(body)).await?;
        println!(
            "<- {} {}\n",
            response.status,
            String::from_utf8_lossy(&response.body)
        );
    }

    Ok(())
}
