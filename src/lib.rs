//! Derives Elasticsearch/OpenSearch index mappings from Rust record types.
//!
//! ```
//! use index_mapper::{ generate, Describe };
//! use index_mapper::fields::Keyword;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Describe)]
//! #[serde(rename_all = "camelCase")]
//! struct Product {
//!     title: String,
//!     sku_code: Keyword,
//!     #[index(kind = "scaled_float")]
//!     price: f64,
//!     #[serde(skip)]
//!     cache_key: u32,
//! }
//!
//! let mapping = generate::<Product>().unwrap();
//! assert!(mapping.lookup(&["skuCode"]).is_some());
//! assert!(mapping.lookup(&["cache_key"]).is_none());
//! ```
pub mod describe;
pub mod error;
pub mod export;
pub mod fields;
pub mod generator;
pub mod schema;
pub use describe::{ CustomSchema, Describe, FieldDesc, FieldName, FieldOverride, TypeDesc };
pub use index_mapper_derive::Describe;
pub use error::{ ExportError, GenerateError };
pub use export::{ MappingConfig, MappingFormat, get_mapping_format, to_mapping_json, write_mapping_file };
pub use generator::{ generate, generate_desc };
pub use schema::{ FieldKind, SchemaNode, VectorMethod, VectorParameters };
