//! Marshalling for engine reference members: node paths and resource paths.
//!
//! Both are string-valued newtypes; they only differ in the descriptor tags
//! handed to the editor, which renders a node picker for one and a resource
//! picker for the other.

use std::any::Any;

use crate::error::ConvertError;
use crate::item::{PropertyHint, PropertyItem, PropertyUsage, VariantTag};
use crate::member::MemberFlags;
use crate::value::Value;

use super::Marshal;

/// Reference to another node in the runtime tree, by structural path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath(pub String);

impl NodePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reference to a file-backed resource, by virtual file path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePath(pub String);

impl ResourcePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

macro_rules! reference_marshal {
    ($marshal:ident, $ty:ident, $tag:expr, $hint:expr, $doc:literal) => {
        #[doc = $doc]
        pub struct $marshal;

        impl Marshal for $marshal {
            fn describe(&self, own_path: &str, flags: MemberFlags) -> Vec<PropertyItem> {
                vec![PropertyItem {
                    name: own_path.to_owned(),
                    variant: $tag,
                    hint: $hint,
                    hint_string: String::new(),
                    usage: PropertyUsage::for_member(flags),
                }]
            }

            fn owns(&self, own_path: &str, path: &str) -> bool {
                own_path == path
            }

            fn get(&self, own_path: &str, path: &str, value: &dyn Any) -> Option<Value> {
                if !self.owns(own_path, path) {
                    return None;
                }
                value
                    .downcast_ref::<$ty>()
                    .map(|v| Value::String(v.0.clone()))
            }

            fn set(&self, own_path: &str, path: &str, value: &mut dyn Any, new: &Value) -> bool {
                if !self.owns(own_path, path) {
                    return false;
                }
                let (Some(slot), Some(path_str)) = (value.downcast_mut::<$ty>(), new.as_str())
                else {
                    return false;
                };
                slot.0 = path_str.to_owned();
                true
            }

            fn to_cache_string(&self, _own_path: &str, value: &dyn Any) -> Option<String> {
                value.downcast_ref::<$ty>().map(|v| v.0.clone())
            }

            fn from_cache_string(&self, _own_path: &str, raw: &str) -> Result<Value, ConvertError> {
                Ok(Value::String(raw.to_owned()))
            }
        }
    };
}

reference_marshal!(
    NodePathMarshal,
    NodePath,
    VariantTag::NodePath,
    PropertyHint::None,
    "Leaf marshaller for [`NodePath`] members."
);

reference_marshal!(
    ResourcePathMarshal,
    ResourcePath,
    VariantTag::Resource,
    PropertyHint::ResourceType,
    "Leaf marshaller for [`ResourcePath`] members."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path_get_set() {
        let m = NodePathMarshal;
        let mut target = NodePath::default();

        assert!(m.set(
            "target",
            "target",
            &mut target,
            &Value::String("root/world/door".into())
        ));
        assert_eq!(
            m.get("target", "target", &target),
            Some(Value::String("root/world/door".into()))
        );
    }

    #[test]
    fn resource_path_cache_round_trip() {
        let m = ResourcePathMarshal;
        let res = ResourcePath::new("res/sprites/hero.png");

        let s = m.to_cache_string("sprite", &res).unwrap();
        assert_eq!(s, "res/sprites/hero.png");
        assert_eq!(
            m.from_cache_string("sprite", &s).unwrap(),
            Value::String("res/sprites/hero.png".into())
        );
    }

    #[test]
    fn descriptor_tags_differ() {
        let node = NodePathMarshal.describe("a", MemberFlags::editor());
        let res = ResourcePathMarshal.describe("a", MemberFlags::editor());
        assert_eq!(node[0].variant, VariantTag::NodePath);
        assert_eq!(res[0].variant, VariantTag::Resource);
        assert_eq!(res[0].hint, PropertyHint::ResourceType);
    }

    #[test]
    fn non_string_write_rejected() {
        let m = NodePathMarshal;
        let mut target = NodePath::new("keep");
        assert!(!m.set("t", "t", &mut target, &Value::I64(1)));
        assert_eq!(target.0, "keep");
    }
}
