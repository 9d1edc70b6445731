//! serde support for "one or many" request fields
//!
//! Use with `#[serde(with = "tower_graphql_batch::codec::serde_batch")]` on any
//! field whose type implements [`BatchTarget`]:
//!
//! ```rust
//! use serde::Deserialize;
//! use tower_graphql_batch::protocol::GraphQLRequest;
//!
//! #[derive(Deserialize)]
//! struct Envelope {
//!     #[serde(with = "tower_graphql_batch::codec::serde_batch")]
//!     requests: Vec<GraphQLRequest>,
//! }
//!
//! let single: Envelope = serde_json::from_str(r#"{"requests": {"query": "{ a }"}}"#).unwrap();
//! assert_eq!(single.requests.len(), 1);
//! ```

use std::{fmt, marker::PhantomData, ops::Deref};

use serde::{
    de::{value::MapAccessDeserializer, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::protocol::shape::{BatchTarget, RequestBatch};

/// Serialize any sequence of requests as an array
pub fn serialize<T, R, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Deref<Target = [R]>,
    R: Serialize,
    S: Serializer,
{
    serializer.collect_seq(value.iter())
}

/// Deserialize one request object or an array of them into `T`
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: BatchTarget,
    T::Item: Deserialize<'de>,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BatchVisitor::<T>(PhantomData))
}

struct BatchVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T> Visitor<'de> for BatchVisitor<T>
where
    T: BatchTarget,
    T::Item: Deserialize<'de>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a request object or an array of request objects")
    }

    fn visit_map<A>(self, map: A) -> Result<T, A::Error>
    where
        A: MapAccess<'de>,
    {
        let request = <T::Item as Deserialize<'de>>::deserialize(MapAccessDeserializer::new(map))?;
        Ok(T::from_batch(T::SHAPE.materialize_single(request)))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<T, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // size hints come from untrusted input
        let mut buffer = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
        while let Some(request) = seq.next_element()? {
            buffer.push(request);
        }
        Ok(T::from_batch(T::SHAPE.materialize_buffer(buffer)))
    }
}

impl<R: Serialize> Serialize for RequestBatch<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for RequestBatch<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer)
    }
}
