//! GraphQL request payload

use std::fmt;

use serde::{
    de::{value::MapAccessDeserializer, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::{Map, Value};

/// One GraphQL operation as sent over the wire
///
/// Every field is optional on the wire; absent fields are omitted on write.
/// Only JSON objects decode into a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    /// The GraphQL document text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Name of the operation to run when the document holds several
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    /// Variable values keyed by variable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,

    /// Protocol extensions (persisted query hashes, tracing flags, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestFields {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    operation_name: Option<String>,
    #[serde(default)]
    variables: Option<Map<String, Value>>,
    #[serde(default)]
    extensions: Option<Map<String, Value>>,
}

impl From<RequestFields> for GraphQLRequest {
    fn from(fields: RequestFields) -> Self {
        Self {
            query: fields.query,
            operation_name: fields.operation_name,
            variables: fields.variables,
            extensions: fields.extensions,
        }
    }
}

struct RequestVisitor;

impl<'de> Visitor<'de> for RequestVisitor {
    type Value = GraphQLRequest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a GraphQL request object")
    }

    fn visit_map<A>(self, map: A) -> Result<GraphQLRequest, A::Error>
    where
        A: MapAccess<'de>,
    {
        RequestFields::deserialize(MapAccessDeserializer::new(map)).map(Into::into)
    }
}

impl<'de> Deserialize<'de> for GraphQLRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RequestVisitor)
    }
}

impl GraphQLRequest {
    /// Create a request for the given document
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Select the operation to run
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Set a single variable
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value);
        self
    }

    /// Set a single extension entry
    pub fn with_extension(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert(name.into(), value);
        self
    }
}
