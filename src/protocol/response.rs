//! GraphQL execution results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A source location (line and column, both starting at 1) for a [`GraphQLError`]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// A serializable error, as found in a GraphQL response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    /// The error message
    pub message: String,

    /// Locations relevant to the error, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    /// Path to the response field that raised the error
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLError {
    /// Create an error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }

    /// Add a source location
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.locations.push(Location { line, column });
        self
    }

    /// Attach an error code under `extensions.code`
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert("code".to_string(), Value::String(code.into()));
        self
    }
}

/// The result of executing one [`GraphQLRequest`](super::GraphQLRequest)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl ExecutionResult {
    /// A successful result carrying `data`
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    /// A failed result carrying request-level errors and no data
    pub fn errors(errors: impl IntoIterator<Item = GraphQLError>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Check if execution reported any errors
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_data_result_serialization() {
        let result = ExecutionResult::data(json!({"a": 1}));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"data": {"a": 1}}));
        assert!(result.is_ok());
    }

    #[test]
    fn test_error_result_serialization() {
        let result = ExecutionResult::errors([GraphQLError::new("Syntax Error")
            .with_location(1, 3)
            .with_code("GRAPHQL_PARSE_FAILED")]);
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0]["message"], "Syntax Error");
        assert_eq!(json["errors"][0]["locations"][0]["column"], 3);
        assert_eq!(
            json["errors"][0]["extensions"]["code"],
            "GRAPHQL_PARSE_FAILED"
        );
        assert!(!result.is_ok());
    }
}
