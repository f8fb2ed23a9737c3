//! Newtypes that carry their own mapping.
//!
//! Each serializes exactly like its payload, so they can replace the plain
//! type in a record without changing the documents sent to the engine.

use serde::{ Deserialize, Serialize };

use crate::describe::{ CustomSchema, Describe, TypeDesc };
use crate::error::BoxError;
use crate::schema::{ FieldKind, SchemaNode };

/// A string matched exactly instead of analyzed as full text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(pub String);

impl From<String> for Keyword {
    fn from(value: String) -> Self {
        Keyword(value)
    }
}

impl From<&str> for Keyword {
    fn from(value: &str) -> Self {
        Keyword(value.to_string())
    }
}

impl CustomSchema for Keyword {
    fn index_schema() -> Result<SchemaNode, BoxError> {
        Ok(SchemaNode::leaf(FieldKind::Keyword))
    }
}

impl Describe for Keyword {
    fn describe() -> TypeDesc {
        TypeDesc::custom::<Self>()
    }
}

/// Milliseconds since the Unix epoch, indexed as a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(pub i64);

impl CustomSchema for EpochMillis {
    fn index_schema() -> Result<SchemaNode, BoxError> {
        Ok(SchemaNode::leaf(FieldKind::Date).with_format("epoch_millis"))
    }
}

impl Describe for EpochMillis {
    fn describe() -> TypeDesc {
        TypeDesc::custom::<Self>()
    }
}

/// A dense vector of `D` components, indexed for k-NN search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding<const D: usize>(pub Vec<f32>);

impl<const D: usize> Embedding<D> {
    pub const DIMENSION: usize = D;
}

impl<const D: usize> CustomSchema for Embedding<D> {
    fn index_schema() -> Result<SchemaNode, BoxError> {
        if D == 0 {
            return Err("embedding dimension must be greater than zero".into());
        }
        Ok(SchemaNode::leaf(FieldKind::KnnVector).with_dimension(D))
    }
}

impl<const D: usize> Describe for Embedding<D> {
    fn describe() -> TypeDesc {
        TypeDesc::custom::<Self>()
    }
}
