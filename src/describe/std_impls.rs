use std::borrow::Cow;
use std::collections::{ BTreeMap, BTreeSet, HashMap, HashSet, VecDeque };
use std::rc::Rc;
use std::sync::Arc;

use super::{ Describe, Primitive, TypeDesc };

macro_rules! describe_primitive {
    ($($ty:ty => $primitive:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDesc {
                    TypeDesc::primitive::<$ty>(Primitive::$primitive)
                }
            }
        )*
    };
}

macro_rules! describe_unsupported {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDesc {
                    TypeDesc::unsupported::<$ty>($kind)
                }
            }
        )*
    };
}

describe_primitive! {
    String => String,
    str => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

// Unsigned widths other than u64 have no exact engine type.
describe_unsupported! {
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    usize => "usize",
    u128 => "u128",
    i128 => "i128",
    char => "char",
    () => "unit",
}

impl Describe for Cow<'_, str> {
    fn describe() -> TypeDesc {
        TypeDesc::primitive::<Self>(Primitive::String)
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDesc {
        TypeDesc::reference::<Self, T>()
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn describe() -> TypeDesc {
        TypeDesc::reference::<Self, T>()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe() -> TypeDesc {
        TypeDesc::reference::<Self, T>()
    }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn describe() -> TypeDesc {
        TypeDesc::reference::<Self, T>()
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe() -> TypeDesc {
        TypeDesc::reference::<Self, T>()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDesc {
        TypeDesc::reference::<Self, T>()
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDesc {
        TypeDesc::sequence::<Self, T>()
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDesc {
        TypeDesc::sequence::<Self, T>()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDesc {
        TypeDesc::sequence::<Self, T>()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeDesc {
        TypeDesc::sequence::<Self, T>()
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> TypeDesc {
        TypeDesc::sequence::<Self, T>()
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDesc {
        TypeDesc::sequence::<Self, T>()
    }
}

impl<K, V, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDesc {
        TypeDesc::unsupported::<Self>("map")
    }
}

impl<K, V> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDesc {
        TypeDesc::unsupported::<Self>("map")
    }
}

// Higher-ranked pointers such as `fn(&str) -> bool` are distinct types and
// have no impl here; `#[derive(Describe)]` reports them as "func" itself.
impl<R> Describe for fn() -> R {
    fn describe() -> TypeDesc {
        TypeDesc::unsupported::<Self>("func")
    }
}

impl<A, R> Describe for fn(A) -> R {
    fn describe() -> TypeDesc {
        TypeDesc::unsupported::<Self>("func")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::Shape;

    fn shape_of<T: Describe + ?Sized>() -> Shape {
        T::describe().shape
    }

    #[test]
    fn test_wrappers_are_references() {
        assert!(matches!(shape_of::<Box<i32>>(), Shape::Reference(_)));
        assert!(matches!(shape_of::<Option<String>>(), Shape::Reference(_)));
        assert!(matches!(shape_of::<Arc<str>>(), Shape::Reference(_)));
    }

    #[test]
    fn test_collections_are_sequences() {
        assert!(matches!(shape_of::<Vec<bool>>(), Shape::Sequence(_)));
        assert!(matches!(shape_of::<[f32; 3]>(), Shape::Sequence(_)));
        assert!(matches!(shape_of::<HashSet<String>>(), Shape::Sequence(_)));
    }

    #[test]
    fn test_referent_description() {
        match shape_of::<Option<i64>>() {
            Shape::Reference(inner) => {
                assert!(matches!(inner().shape, Shape::Primitive(Primitive::I64)));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_kinds() {
        assert!(matches!(shape_of::<HashMap<String, i32>>(), Shape::Unsupported("map")));
        assert!(matches!(shape_of::<fn(i32) -> i32>(), Shape::Unsupported("func")));
        assert!(matches!(shape_of::<u32>(), Shape::Unsupported("u32")));
    }
}
