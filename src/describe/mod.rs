//! Static descriptions of Rust types, the input of mapping generation.
//!
//! A type takes part in generation by implementing [`Describe`]. Records list
//! their fields with [`FieldDesc`], which carries the two per-field metadata
//! channels: the serialized name ([`FieldName`]) and the mapping override
//! ([`FieldOverride`]). A type that knows its own mapping implements
//! [`CustomSchema`] and describes itself with [`TypeDesc::custom`].
//!
//! Records should normally use `#[derive(Describe)]`, which reads the field
//! list, the field types and the `#[serde(...)]` naming attributes from the
//! struct itself. A hand-written record description is not checked against
//! the struct: renaming, retyping or adding a field leaves it stale.

pub mod std_impls;

use std::any::{ type_name, TypeId };
use std::fmt;

use crate::error::BoxError;
use crate::schema::SchemaNode;

/// Lazily produces the description of a nested type.
pub type DescribeFn = fn() -> TypeDesc;

/// A type's own mapping, bypassing structural derivation.
pub type SchemaProvider = fn() -> Result<SchemaNode, BoxError>;

/// Implemented by every type that can appear in a mapped record.
pub trait Describe {
    fn describe() -> TypeDesc;
}

/// Lets a type supply its mapping directly instead of being walked.
///
/// ```
/// use index_mapper::{ CustomSchema, Describe, FieldKind, SchemaNode, TypeDesc };
/// use index_mapper::error::BoxError;
///
/// struct Sku(String);
///
/// impl CustomSchema for Sku {
///     fn index_schema() -> Result<SchemaNode, BoxError> {
///         Ok(SchemaNode::leaf(FieldKind::Keyword))
///     }
/// }
///
/// impl Describe for Sku {
///     fn describe() -> TypeDesc {
///         TypeDesc::custom::<Self>()
///     }
/// }
/// ```
pub trait CustomSchema {
    fn index_schema() -> Result<SchemaNode, BoxError>;
}

/// The primitive kinds the generator knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    I8,
    I16,
    I32,
    I64,
    /// Pointer-width signed integer, mapped like `I32`.
    Isize,
    U64,
    F32,
    F64,
    Bool,
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Isize => "isize",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural shape of a described type.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A single level of indirection (`Box`, `&`, `Option`, ...).
    Reference(DescribeFn),
    /// A homogeneous collection of elements.
    Sequence(DescribeFn),
    /// A struct with named fields, in declaration order.
    Record {
        type_id: TypeId,
        fields: Vec<FieldDesc>,
    },
    Primitive(Primitive),
    /// A shape with no mapping; the string names it in error messages.
    Unsupported(&'static str),
}

#[derive(Debug, Clone)]
pub struct TypeDesc {
    /// Rust type name, used in logs and errors.
    pub name: &'static str,
    pub shape: Shape,
    pub provider: Option<SchemaProvider>,
}

impl TypeDesc {
    pub fn new<T: ?Sized>(shape: Shape) -> Self {
        Self {
            name: type_name::<T>(),
            shape,
            provider: None,
        }
    }

    pub fn primitive<T: ?Sized>(primitive: Primitive) -> Self {
        Self::new::<T>(Shape::Primitive(primitive))
    }

    pub fn reference<T: ?Sized, Inner: Describe + ?Sized>() -> Self {
        Self::new::<T>(Shape::Reference(Inner::describe))
    }

    pub fn sequence<T: ?Sized, Elem: Describe + ?Sized>() -> Self {
        Self::new::<T>(Shape::Sequence(Elem::describe))
    }

    pub fn record<T: ?Sized + 'static>(fields: Vec<FieldDesc>) -> Self {
        Self::new::<T>(Shape::Record {
            type_id: TypeId::of::<T>(),
            fields,
        })
    }

    pub fn unsupported<T: ?Sized>(kind: &'static str) -> Self {
        Self::new::<T>(Shape::Unsupported(kind))
    }

    /// A type whose mapping comes entirely from its [`CustomSchema`] impl.
    pub fn custom<T: CustomSchema + ?Sized>() -> Self {
        Self::unsupported::<T>("opaque").with_provider(T::index_schema)
    }

    /// Attaches a provider; it takes precedence over the shape.
    pub fn with_provider(mut self, provider: SchemaProvider) -> Self {
        self.provider = Some(provider);
        self
    }
}

/// The serialization-naming channel of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldName {
    /// No naming metadata. The field is not serialized and gets no mapping.
    #[default]
    Unset,
    /// Explicitly skipped by serialization.
    Skip,
    Rename(String),
}

impl From<&str> for FieldName {
    /// Reads the compact tag form, `"name"` or `"name,omitempty"`; `"-"` skips.
    fn from(tag: &str) -> Self {
        let name = match tag.find(',') {
            Some(idx) => &tag[..idx],
            None => tag,
        };
        match name {
            "" => FieldName::Unset,
            "-" => FieldName::Skip,
            name => FieldName::Rename(name.to_string()),
        }
    }
}

/// Per-field mapping override, checked before the field's type is inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldOverride {
    #[default]
    None,
    /// Leave the field out of the mapping.
    Exclude,
    /// Map the field as a disabled object, without looking at its type.
    Disabled,
    /// Use this type name verbatim.
    Literal(String),
}

impl From<&str> for FieldOverride {
    /// Reads the compact tag form: `-` excludes, `!` disables, anything else is a literal type.
    fn from(tag: &str) -> Self {
        if tag.is_empty() {
            FieldOverride::None
        } else if tag.starts_with('-') {
            FieldOverride::Exclude
        } else if tag.starts_with('!') {
            FieldOverride::Disabled
        } else {
            FieldOverride::Literal(tag.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDesc {
    /// Rust identifier of the field.
    pub ident: &'static str,
    pub name: FieldName,
    pub schema: FieldOverride,
    pub ty: DescribeFn,
}

impl FieldDesc {
    /// A field with no naming metadata yet; call [`rename`](Self::rename) to make it visible.
    pub fn new<T: Describe + ?Sized>(ident: &'static str) -> Self {
        Self::with_describe(ident, T::describe)
    }

    /// A field whose type is given by a describe function rather than a `Describe` impl.
    pub fn with_describe(ident: &'static str, ty: DescribeFn) -> Self {
        Self {
            ident,
            name: FieldName::Unset,
            schema: FieldOverride::None,
            ty,
        }
    }

    /// A field serialized under its own identifier.
    pub fn named<T: Describe + ?Sized>(ident: &'static str) -> Self {
        Self::new::<T>(ident).rename(ident)
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = FieldName::Rename(name.into());
        self
    }

    pub fn skip(mut self) -> Self {
        self.name = FieldName::Skip;
        self
    }

    /// Sets the naming channel from its compact tag form.
    pub fn tag(mut self, tag: &str) -> Self {
        self.name = FieldName::from(tag);
        self
    }

    pub fn schema(mut self, schema: FieldOverride) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the override channel from its compact tag form.
    pub fn schema_tag(mut self, tag: &str) -> Self {
        self.schema = FieldOverride::from(tag);
        self
    }

    pub fn exclude(self) -> Self {
        self.schema(FieldOverride::Exclude)
    }

    pub fn disabled(self) -> Self {
        self.schema(FieldOverride::Disabled)
    }

    /// Forces the field's type name. An empty name means no override.
    pub fn literal(self, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        if kind.is_empty() {
            self.schema(FieldOverride::None)
        } else {
            self.schema(FieldOverride::Literal(kind))
        }
    }

    /// The name the field is serialized under, if it is serialized at all.
    pub fn serialized_name(&self) -> Option<&str> {
        match &self.name {
            FieldName::Rename(name) => Some(name),
            FieldName::Unset | FieldName::Skip => None,
        }
    }
}
