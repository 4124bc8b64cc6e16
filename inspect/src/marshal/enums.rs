//! Marshalling for unit enum members.
//!
//! Enums travel as their variant name string, both through [`Value`] and in
//! the cache. Unrecognized variant names in cached data are a hard
//! conversion error, never defaulted.

use std::any::Any;
use std::marker::PhantomData;

use crate::error::ConvertError;
use crate::item::{PropertyHint, PropertyItem, PropertyUsage, VariantTag};
use crate::member::MemberFlags;
use crate::value::Value;

use super::Marshal;

/// A unit enum with named variants, usually implemented through the
/// [`enumerated!`](crate::enumerated) macro.
pub trait Enumerated: Any + Copy {
    const VARIANTS: &'static [&'static str];

    fn name(&self) -> &'static str;
    fn from_name(name: &str) -> Option<Self>;
}

/// Define a unit enum together with its [`Enumerated`] impl.
///
/// ```ignore
/// enumerated!(pub enum Color { Red, Green, Blue });
/// ```
#[macro_export]
macro_rules! enumerated {
    ($vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::Enumerated for $name {
            const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

/// Leaf marshaller for an [`Enumerated`] member.
pub struct EnumMarshal<T: Enumerated> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Enumerated> EnumMarshal<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Enumerated> Default for EnumMarshal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Enumerated> Marshal for EnumMarshal<T> {
    fn describe(&self, own_path: &str, flags: MemberFlags) -> Vec<PropertyItem> {
        vec![PropertyItem {
            name: own_path.to_owned(),
            variant: VariantTag::String,
            hint: PropertyHint::Enum,
            hint_string: T::VARIANTS.join(","),
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
            .downcast_ref::<T>()
            .map(|v| Value::String(v.name().to_owned()))
    }

    fn set(&self, own_path: &str, path: &str, value: &mut dyn Any, new: &Value) -> bool {
        if !self.owns(own_path, path) {
            return false;
        }
        let (Some(slot), Some(name)) = (value.downcast_mut::<T>(), new.as_str()) else {
            return false;
        };
        match T::from_name(name) {
            Some(variant) => {
                *slot = variant;
                true
            }
            None => false,
        }
    }

    fn to_cache_string(&self, _own_path: &str, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(|v| v.name().to_owned())
    }

    fn from_cache_string(&self, _own_path: &str, raw: &str) -> Result<Value, ConvertError> {
        match T::from_name(raw) {
            Some(variant) => Ok(Value::String(variant.name().to_owned())),
            None => Err(ConvertError::UnknownEnumVariant {
                value: raw.to_owned(),
                allowed: T::VARIANTS,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enumerated!(enum Color { Red, Green, Blue });

    #[test]
    fn variant_names() {
        assert_eq!(Color::VARIANTS, ["Red", "Green", "Blue"]);
        assert_eq!(Color::Green.name(), "Green");
        assert_eq!(Color::from_name("Blue"), Some(Color::Blue));
        assert_eq!(Color::from_name("Purple"), None);
    }

    #[test]
    fn get_and_set_by_name() {
        let m = EnumMarshal::<Color>::new();
        let mut slot = Color::Red;

        assert_eq!(
            m.get("tint", "tint", &slot),
            Some(Value::String("Red".into()))
        );
        assert!(m.set("tint", "tint", &mut slot, &Value::String("Blue".into())));
        assert_eq!(slot, Color::Blue);
    }

    #[test]
    fn unknown_variant_write_rejected() {
        let m = EnumMarshal::<Color>::new();
        let mut slot = Color::Red;
        assert!(!m.set("tint", "tint", &mut slot, &Value::String("Purple".into())));
        assert_eq!(slot, Color::Red);
    }

    #[test]
    fn cache_round_trip() {
        let m = EnumMarshal::<Color>::new();
        let s = m.to_cache_string("tint", &Color::Blue).unwrap();
        assert_eq!(s, "Blue");
        assert_eq!(
            m.from_cache_string("tint", &s).unwrap(),
            Value::String("Blue".into())
        );
    }

    #[test]
    fn unknown_cache_variant_fails_hard() {
        let m = EnumMarshal::<Color>::new();
        assert!(matches!(
            m.from_cache_string("tint", "Chartreuse"),
            Err(ConvertError::UnknownEnumVariant { .. })
        ));
    }

    #[test]
    fn describe_carries_variant_list() {
        let m = EnumMarshal::<Color>::new();
        let items = m.describe("tint", MemberFlags::editor());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].hint, PropertyHint::Enum);
        assert_eq!(items[0].hint_string, "Red,Green,Blue");
    }
}
