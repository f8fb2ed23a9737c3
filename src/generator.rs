use std::any::TypeId;
use std::collections::BTreeMap;
use log::{ debug, warn };

use crate::describe::{ Describe, FieldDesc, FieldOverride, Primitive, Shape, TypeDesc };
use crate::error::GenerateError;
use crate::schema::{ FieldKind, SchemaNode };

/// Derives the index mapping of `T`.
///
/// Fails on the first field that cannot be mapped; no partial mapping is returned.
pub fn generate<T: Describe + ?Sized>() -> Result<SchemaNode, GenerateError> {
    generate_desc(&T::describe())
}

/// Derives the index mapping of an already built type description.
pub fn generate_desc(desc: &TypeDesc) -> Result<SchemaNode, GenerateError> {
    debug!("Generating index mapping for {}", desc.name);
    Walker::default().node(desc)
}

/// Deepest chain of nested descriptions followed before giving up as recursive.
pub const MAX_NESTING: usize = 128;

/// Fixed primitive-to-engine type table.
pub fn primitive_kind(primitive: Primitive) -> FieldKind {
    match primitive {
        Primitive::String => FieldKind::Text,
        Primitive::I8 => FieldKind::Byte,
        Primitive::I16 => FieldKind::Short,
        Primitive::I32 | Primitive::Isize => FieldKind::Integer,
        Primitive::I64 => FieldKind::Long,
        Primitive::U64 => FieldKind::UnsignedLong,
        // f64 is indexed as float too
        Primitive::F32 | Primitive::F64 => FieldKind::Float,
        Primitive::Bool => FieldKind::Boolean,
    }
}

#[derive(Default)]
struct Walker {
    /// Serialized field names from the root to the current node.
    path: Vec<String>,
    /// Records currently being expanded.
    active: Vec<TypeId>,
    /// Descriptions entered on the current branch, wrappers included.
    depth: usize,
}

impl Walker {
    fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    fn node(&mut self, desc: &TypeDesc) -> Result<SchemaNode, GenerateError> {
        if let Some(provider) = desc.provider {
            debug!("Using custom schema of {} at '{}'", desc.name, self.dotted_path());
            return provider().map_err(|source| GenerateError::Provider {
                path: self.dotted_path(),
                source,
            });
        }

        match &desc.shape {
            Shape::Reference(inner) | Shape::Sequence(inner) => {
                // cycles through wrappers are bounded by depth
                if self.depth >= MAX_NESTING {
                    return Err(GenerateError::RecursiveType {
                        name: desc.name,
                        path: self.dotted_path(),
                    });
                }
                self.depth += 1;
                let node = self.node(&inner())?;
                self.depth -= 1;
                Ok(node)
            }
            Shape::Record { type_id, fields } => {
                if self.active.contains(type_id) {
                    return Err(GenerateError::RecursiveType {
                        name: desc.name,
                        path: self.dotted_path(),
                    });
                }
                self.active.push(*type_id);
                self.depth += 1;
                let properties = self.fields(fields)?;
                self.depth -= 1;
                self.active.pop();
                Ok(SchemaNode::object(properties))
            }
            Shape::Primitive(primitive) => Ok(SchemaNode::leaf(primitive_kind(*primitive))),
            Shape::Unsupported(kind) =>
                Err(GenerateError::UnsupportedType {
                    kind: *kind,
                    path: self.dotted_path(),
                }),
        }
    }

    fn fields(
        &mut self,
        fields: &[FieldDesc]
    ) -> Result<BTreeMap<String, SchemaNode>, GenerateError> {
        let mut properties = BTreeMap::new();

        for field in fields {
            let name = match field.serialized_name() {
                Some(name) => name,
                None => {
                    debug!("Field '{}' is not serialized, leaving it out", field.ident);
                    continue;
                }
            };

            let node = match &field.schema {
                FieldOverride::Exclude => {
                    debug!("Field '{}' excluded from mapping", field.ident);
                    continue;
                }
                FieldOverride::Disabled => SchemaNode::disabled_object(),
                FieldOverride::Literal(kind) if !kind.is_empty() => SchemaNode::leaf(kind.as_str()),
                FieldOverride::None | FieldOverride::Literal(_) => {
                    self.path.push(name.to_string());
                    let node = self.node(&(field.ty)())?;
                    self.path.pop();
                    node
                }
            };

            if properties.insert(name.to_string(), node).is_some() {
                warn!(
                    "Field '{}' reuses serialized name '{}', replacing the earlier mapping",
                    field.ident,
                    name
                );
            }
        }

        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;

    struct Person;

    impl Describe for Person {
        fn describe() -> TypeDesc {
            TypeDesc::record::<Self>(
                vec![
                    FieldDesc::new::<String>("Name").rename("name"),
                    FieldDesc::new::<i32>("Age").rename("age")
                ]
            )
        }
    }

    struct Broken;

    impl crate::describe::CustomSchema for Broken {
        fn index_schema() -> Result<SchemaNode, BoxError> {
            Err("no mapping available".into())
        }
    }

    impl Describe for Broken {
        fn describe() -> TypeDesc {
            TypeDesc::custom::<Self>()
        }
    }

    /// Cycles through a sequence without any record in between.
    struct Forest;

    impl Describe for Forest {
        fn describe() -> TypeDesc {
            TypeDesc::sequence::<Self, Forest>()
        }
    }

    struct Holder;

    impl Describe for Holder {
        fn describe() -> TypeDesc {
            TypeDesc::record::<Self>(vec![FieldDesc::named::<Forest>("trees")])
        }
    }

    #[test]
    fn test_primitive_table() {
        assert_eq!(generate::<String>().unwrap(), SchemaNode::leaf(FieldKind::Text));
        assert_eq!(generate::<i8>().unwrap(), SchemaNode::leaf(FieldKind::Byte));
        assert_eq!(generate::<i16>().unwrap(), SchemaNode::leaf(FieldKind::Short));
        assert_eq!(generate::<i32>().unwrap(), SchemaNode::leaf(FieldKind::Integer));
        assert_eq!(generate::<isize>().unwrap(), SchemaNode::leaf(FieldKind::Integer));
        assert_eq!(generate::<i64>().unwrap(), SchemaNode::leaf(FieldKind::Long));
        assert_eq!(generate::<u64>().unwrap(), SchemaNode::leaf(FieldKind::UnsignedLong));
        assert_eq!(generate::<f32>().unwrap(), SchemaNode::leaf(FieldKind::Float));
        assert_eq!(generate::<f64>().unwrap(), SchemaNode::leaf(FieldKind::Float));
        assert_eq!(generate::<bool>().unwrap(), SchemaNode::leaf(FieldKind::Boolean));
    }

    #[test]
    fn test_record() {
        let node = generate::<Person>().unwrap();
        assert_eq!(node.explicit_kind(), None);
        assert_eq!(node.kind(), FieldKind::Object);
        let children = node.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children["name"], SchemaNode::leaf(FieldKind::Text));
        assert_eq!(children["age"], SchemaNode::leaf(FieldKind::Integer));
    }

    #[test]
    fn test_wrappers_are_transparent() {
        assert_eq!(generate::<Vec<String>>().unwrap(), generate::<String>().unwrap());
        assert_eq!(generate::<Option<Box<Person>>>().unwrap(), generate::<Person>().unwrap());
        assert_eq!(generate::<&[i64]>().unwrap(), SchemaNode::leaf(FieldKind::Long));
    }

    #[test]
    fn test_unsupported_root() {
        let err = generate::<u32>().unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedType { kind: "u32", .. }));
        assert_eq!(err.path(), "");
        assert_eq!(err.to_string(), "at : unsupported type u32");
    }

    #[test]
    fn test_provider_failure() {
        let err = generate::<Broken>().unwrap_err();
        assert!(matches!(err, GenerateError::Provider { .. }));
        assert_eq!(err.to_string(), "at : error from custom schema provider: no mapping available");
    }

    #[test]
    fn test_wrapper_cycle_is_recursive_error() {
        let err = generate::<Forest>().unwrap_err();
        assert!(matches!(err, GenerateError::RecursiveType { .. }));
        assert_eq!(err.path(), "");
    }

    #[test]
    fn test_wrapper_cycle_inside_record() {
        let err = generate::<Holder>().unwrap_err();
        assert!(matches!(err, GenerateError::RecursiveType { .. }));
        assert_eq!(err.path(), "trees");
    }

    #[test]
    fn test_empty_literal_falls_back_to_type() {
        let desc = TypeDesc::record::<Person>(
            vec![FieldDesc::named::<String>("title").schema(FieldOverride::Literal(String::new()))]
        );
        let node = generate_desc(&desc).unwrap();
        assert_eq!(node.lookup(&["title"]), Some(&SchemaNode::leaf(FieldKind::Text)));
    }

    #[test]
    fn test_deep_but_finite_nesting() {
        assert_eq!(
            generate::<Vec<Option<Box<Vec<Option<String>>>>>>().unwrap(),
            SchemaNode::leaf(FieldKind::Text)
        );
    }
}
