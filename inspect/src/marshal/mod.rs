//! Per-type marshalling strategies.
//!
//! A marshaller converts between a member's native value, the dynamic
//! [`Value`] handed to the host, the declarative descriptors shown in the
//! editor, and the string encoding used by the serialization cache. One
//! marshaller instance serves every member of its type; the member's value
//! is passed into each call, never stored.
//!
//! Routing convention: `get` returning `None` and `set` returning `false`
//! mean "not mine", letting the tree try sibling nodes. They are not errors.

mod composite;
mod enums;
mod primitive;
mod reference;

pub use composite::{Composite, CompositeMarshal, NullableCompositeMarshal};
pub use enums::{EnumMarshal, Enumerated};
pub use primitive::{Primitive, PrimitiveMarshal};
pub use reference::{NodePath, NodePathMarshal, ResourcePath, ResourcePathMarshal};

use std::any::Any;

use crate::error::ConvertError;
use crate::item::PropertyItem;
use crate::member::MemberFlags;
use crate::value::Value;

/// Per-type marshalling strategy attached to leaf render nodes.
///
/// `own_path` is the full dotted path of the node the marshaller is attached
/// to; `path` is the path being queried, which for composite marshallers may
/// address a sub-field below `own_path`.
pub trait Marshal: Send + Sync {
    /// Descriptors for the editor property list. Pure function of the
    /// member's type and flags; composites emit one entry per sub-field.
    fn describe(&self, own_path: &str, flags: MemberFlags) -> Vec<PropertyItem>;

    /// Whether `path` addresses this marshaller's node or one of its
    /// sub-fields. Used by the tree to route before invoking get/set.
    fn owns(&self, own_path: &str, path: &str) -> bool;

    /// Read the value at `path` out of the member. `None` means the path is
    /// not owned here.
    fn get(&self, own_path: &str, path: &str, value: &dyn Any) -> Option<Value>;

    /// Write `new` into the member at `path`. Returns whether the write was
    /// accepted.
    fn set(&self, own_path: &str, path: &str, value: &mut dyn Any, new: &Value) -> bool;

    /// Encode the whole member value as a cache string. `None` when the
    /// member's value is not of this marshaller's type.
    fn to_cache_string(&self, own_path: &str, value: &dyn Any) -> Option<String>;

    /// Decode a cache string back into a value accepted by [`Marshal::set`]
    /// at the bare `own_path`. Must invert [`Marshal::to_cache_string`] for
    /// every representable value; unparseable input is a hard error.
    fn from_cache_string(&self, own_path: &str, raw: &str) -> Result<Value, ConvertError>;
}

/// No-op sentinel marshaller. Owns no path, converts nothing.
pub struct NullMarshal;

impl Marshal for NullMarshal {
    fn describe(&self, _own_path: &str, _flags: MemberFlags) -> Vec<PropertyItem> {
        Vec::new()
    }

    fn owns(&self, _own_path: &str, _path: &str) -> bool {
        false
    }

    fn get(&self, _own_path: &str, _path: &str, _value: &dyn Any) -> Option<Value> {
        None
    }

    fn set(&self, _own_path: &str, _path: &str, _value: &mut dyn Any, _new: &Value) -> bool {
        false
    }

    fn to_cache_string(&self, _own_path: &str, _value: &dyn Any) -> Option<String> {
        None
    }

    fn from_cache_string(&self, _own_path: &str, raw: &str) -> Result<Value, ConvertError> {
        Err(ConvertError::Malformed {
            raw: raw.to_owned(),
            expected: "nothing (null marshaller)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_marshal_owns_nothing() {
        let m = NullMarshal;
        assert!(!m.owns("a", "a"));
        assert!(m.get("a", "a", &0i32).is_none());
        assert!(!m.set("a", "a", &mut 0i32, &Value::I64(1)));
        assert!(m.to_cache_string("a", &0i32).is_none());
        assert!(m.from_cache_string("a", "x").is_err());
    }
}
