use serde::{ Deserialize, Serialize };
use std::collections::BTreeMap;
use std::fmt;

/// The index-time type of a single mapping node.
///
/// Known engine types get their own variant; anything else (typically a literal
/// override on a field) is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Keyword,
    Byte,
    Short,
    Integer,
    Long,
    UnsignedLong,
    Float,
    Double,
    Boolean,
    Date,
    Object,
    Nested,
    KnnVector,
    Other(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Keyword => "keyword",
            FieldKind::Byte => "byte",
            FieldKind::Short => "short",
            FieldKind::Integer => "integer",
            FieldKind::Long => "long",
            FieldKind::UnsignedLong => "unsigned_long",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Object => "object",
            FieldKind::Nested => "nested",
            FieldKind::KnnVector => "knn_vector",
            FieldKind::Other(name) => name,
        }
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        match name {
            "text" => FieldKind::Text,
            "keyword" => FieldKind::Keyword,
            "byte" => FieldKind::Byte,
            "short" => FieldKind::Short,
            "integer" => FieldKind::Integer,
            "long" => FieldKind::Long,
            "unsigned_long" => FieldKind::UnsignedLong,
            "float" => FieldKind::Float,
            "double" => FieldKind::Double,
            "boolean" => FieldKind::Boolean,
            "date" => FieldKind::Date,
            "object" => FieldKind::Object,
            "nested" => FieldKind::Nested,
            "knn_vector" => FieldKind::KnnVector,
            other => FieldKind::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        FieldKind::from(name.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction parameters of an HNSW-style vector index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorParameters {
    /// Size of the dynamic candidate list while building the graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ef_construction: Option<u32>,
    /// Number of bidirectional links per graph node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<u32>,
}

/// How a vector field is indexed for nearest-neighbour search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorMethod {
    /// Algorithm name, e.g. `hnsw`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Distance function, e.g. `cosinesimil` or `l2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
    /// Engine implementing the index, e.g. `lucene`, `faiss`, `nmslib`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<VectorParameters>,
}

/// One node of a generated index mapping.
///
/// Every option is optional; `None` leaves the engine default in place and is
/// left out of the serialized document. Nodes are built through the
/// constructors and `with_*` setters and are read-only afterwards, so only
/// structured nodes can hold children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// The field type. Structured records leave this unset and only carry `properties`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<FieldKind>,
    /// Child fields keyed by their serialized name.
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<String, SchemaNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    analyzer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coerce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copy_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    /// Date format string, e.g. `epoch_millis` or `strict_date_optional_time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_analyzer: Option<String>,
    /// Vector length of a `knn_vector` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<VectorMethod>,
}

impl SchemaNode {
    /// A leaf node of the given kind with no options set.
    pub fn leaf(kind: impl Into<FieldKind>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    /// A structured node holding the given children.
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            properties: Some(properties),
            ..Default::default()
        }
    }

    /// An opaque object the engine stores but does not parse or index.
    pub fn disabled_object() -> Self {
        Self {
            kind: Some(FieldKind::Object),
            enabled: Some(false),
            ..Default::default()
        }
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_search_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.search_analyzer = Some(analyzer.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.coerce = Some(coerce);
        self
    }

    pub fn with_copy_to<I, S>(mut self, targets: I) -> Self
        where I: IntoIterator<Item = S>, S: Into<String>
    {
        self.copy_to = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_doc_values(mut self, doc_values: bool) -> Self {
        self.doc_values = Some(doc_values);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_index(mut self, index: bool) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn with_method(mut self, method: VectorMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// The effective kind. A node with properties and no explicit type is an object.
    pub fn kind(&self) -> FieldKind {
        match &self.kind {
            Some(kind) => kind.clone(),
            None => FieldKind::Object,
        }
    }

    /// The type as written to the mapping; `None` for structured records.
    pub fn explicit_kind(&self) -> Option<&FieldKind> {
        self.kind.as_ref()
    }

    pub fn children(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        self.properties.as_ref()
    }

    pub fn analyzer(&self) -> Option<&str> {
        self.analyzer.as_deref()
    }

    pub fn search_analyzer(&self) -> Option<&str> {
        self.search_analyzer.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn coerce(&self) -> Option<bool> {
        self.coerce
    }

    pub fn copy_to(&self) -> Option<&[String]> {
        self.copy_to.as_deref()
    }

    pub fn doc_values(&self) -> Option<bool> {
        self.doc_values
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn index(&self) -> Option<bool> {
        self.index
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn method(&self) -> Option<&VectorMethod> {
        self.method.as_ref()
    }

    /// `false` only when the node explicitly disables parsing.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Walks down `path` through the children, one name per step.
    ///
    /// Returns `None` as soon as a step has no matching child. An empty path
    /// yields the node itself.
    pub fn lookup(&self, path: &[&str]) -> Option<&SchemaNode> {
        let mut current = self;
        for name in path {
            current = current.properties.as_ref()?.get(*name)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SchemaNode {
        let mut address = BTreeMap::new();
        address.insert("city".to_string(), SchemaNode::leaf(FieldKind::Text));
        let mut root = BTreeMap::new();
        root.insert("name".to_string(), SchemaNode::leaf(FieldKind::Text));
        root.insert("address".to_string(), SchemaNode::object(address));
        SchemaNode::object(root)
    }

    #[test]
    fn test_lookup_nested() {
        let root = sample();
        assert_eq!(root.lookup(&["address", "city"]).map(SchemaNode::kind), Some(FieldKind::Text));
        assert_eq!(root.lookup(&["address"]).map(SchemaNode::kind), Some(FieldKind::Object));
    }

    #[test]
    fn test_lookup_missing() {
        let root = sample();
        assert!(root.lookup(&["missing"]).is_none());
        assert!(root.lookup(&["address", "zip"]).is_none());
        // leaf nodes have no children to descend into
        assert!(root.lookup(&["name", "first"]).is_none());
    }

    #[test]
    fn test_lookup_empty_path() {
        let root = sample();
        assert_eq!(root.lookup(&[]), Some(&root));
    }

    #[test]
    fn test_field_kind_strings() {
        assert_eq!(FieldKind::from("unsigned_long"), FieldKind::UnsignedLong);
        assert_eq!(FieldKind::from("geo_point"), FieldKind::Other("geo_point".to_string()));
        assert_eq!(String::from(FieldKind::KnnVector), "knn_vector");
        assert_eq!(FieldKind::Other("wildcard".to_string()).to_string(), "wildcard");
    }

    #[test]
    fn test_serialize_omits_unset_options() {
        let node = SchemaNode::leaf(FieldKind::Date).with_format("epoch_millis");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({ "type": "date", "format": "epoch_millis" })
        );
        assert_eq!(serde_json::to_value(SchemaNode::disabled_object()).unwrap(), json!({ "type": "object", "enabled": false }));
    }

    #[test]
    fn test_serialize_properties_sorted_by_name() {
        let text = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            text,
            r#"{"properties":{"address":{"properties":{"city":{"type":"text"}}},"name":{"type":"text"}}}"#
        );
    }

    #[test]
    fn test_vector_method_round_trip() {
        let node = SchemaNode::leaf(FieldKind::KnnVector)
            .with_dimension(384)
            .with_method(VectorMethod {
                name: Some("hnsw".to_string()),
                space_type: Some("cosinesimil".to_string()),
                engine: Some("lucene".to_string()),
                parameters: Some(VectorParameters { ef_construction: Some(128), m: Some(16) }),
            });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "knn_vector",
                "dimension": 384,
                "method": {
                    "name": "hnsw",
                    "space_type": "cosinesimil",
                    "engine": "lucene",
                    "parameters": { "ef_construction": 128, "m": 16 }
                }
            })
        );
        let parsed: SchemaNode = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn test_accessors() {
        let node = SchemaNode::leaf(FieldKind::Text)
            .with_analyzer("english")
            .with_copy_to(["all_text"])
            .with_index(false);
        assert_eq!(node.explicit_kind(), Some(&FieldKind::Text));
        assert_eq!(node.analyzer(), Some("english"));
        assert_eq!(node.copy_to(), Some(&["all_text".to_string()][..]));
        assert_eq!(node.index(), Some(false));
        assert_eq!(node.doc_values(), None);
        assert!(node.children().is_none());
        assert_eq!(SchemaNode::object(BTreeMap::new()).explicit_kind(), None);
    }
}
