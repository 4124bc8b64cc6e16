//! Marshalling for composite value members (vectors, rects).
//!
//! A composite expands into one float leaf per sub-field sharing the node's
//! path as a prefix (`pos.x`, `pos.y`). The whole value is still addressable
//! at the bare path as a map, and the cache encoding joins the components
//! with `;` in declaration order.

use std::any::Any;
use std::marker::PhantomData;

use crate::error::ConvertError;
use crate::item::{PropertyItem, PropertyUsage, VariantTag};
use crate::math::{Rect, Vec2, Vec3, Vec4};
use crate::member::MemberFlags;
use crate::value::Value;

use super::Marshal;

const COMPONENT_SEPARATOR: char = ';';

/// A flat value type made of named `f32` sub-fields.
pub trait Composite: Any + Clone {
    const TAG: VariantTag;
    const FIELDS: &'static [&'static str];

    /// Instance used when a sub-field write must materialize a value first.
    fn default_value() -> Self;

    fn field(&self, name: &str) -> Option<f32>;
    fn set_field(&mut self, name: &str, value: f32) -> bool;
}

macro_rules! vector_composite {
    ($ty:ty, $tag:expr, [$($field:ident),+]) => {
        impl Composite for $ty {
            const TAG: VariantTag = $tag;
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn default_value() -> Self {
                Self::zeros()
            }

            fn field(&self, name: &str) -> Option<f32> {
                match name {
                    $(stringify!($field) => Some(self.$field),)+
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: f32) -> bool {
                match name {
                    $(stringify!($field) => {
                        self.$field = value;
                        true
                    })+
                    _ => false,
                }
            }
        }
    };
}

vector_composite!(Vec2, VariantTag::Vector2, [x, y]);
vector_composite!(Vec3, VariantTag::Vector3, [x, y, z]);
vector_composite!(Vec4, VariantTag::Vector4, [x, y, z, w]);

impl Composite for Rect {
    const TAG: VariantTag = VariantTag::Rect;
    const FIELDS: &'static [&'static str] = &["x", "y", "w", "h"];

    fn default_value() -> Self {
        Self::default()
    }

    fn field(&self, name: &str) -> Option<f32> {
        match name {
            "x" => Some(self.x),
            "y" => Some(self.y),
            "w" => Some(self.w),
            "h" => Some(self.h),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: f32) -> bool {
        match name {
            "x" => self.x = value,
            "y" => self.y = value,
            "w" => self.w = value,
            "h" => self.h = value,
            _ => return false,
        }
        true
    }
}

fn sub_field<'a>(own_path: &str, path: &'a str) -> Option<&'a str> {
    path.strip_prefix(own_path)?.strip_prefix('.')
}

fn fields_to_map<T: Composite>(value: &T) -> Value {
    Value::Map(
        T::FIELDS
            .iter()
            .map(|name| {
                let component = value.field(name).unwrap_or_default();
                ((*name).to_owned(), Value::F32(component))
            })
            .collect(),
    )
}

fn apply_map<T: Composite>(slot: &mut T, new: &Value) -> bool {
    let mut any_applied = false;
    for name in T::FIELDS {
        if let Some(component) = new.map_get(name).and_then(Value::as_f32) {
            slot.set_field(name, component);
            any_applied = true;
        }
    }
    any_applied
}

fn encode<T: Composite>(value: &T) -> String {
    T::FIELDS
        .iter()
        .map(|name| value.field(name).unwrap_or_default().to_string())
        .collect::<Vec<_>>()
        .join(&COMPONENT_SEPARATOR.to_string())
}

fn decode<T: Composite>(raw: &str) -> Result<Value, ConvertError> {
    let parts: Vec<&str> = raw.split(COMPONENT_SEPARATOR).collect();
    if parts.len() != T::FIELDS.len() {
        return Err(ConvertError::Malformed {
            raw: raw.to_owned(),
            expected: "composite component list",
        });
    }
    let mut entries = Vec::with_capacity(parts.len());
    for (name, part) in T::FIELDS.iter().zip(parts) {
        let component: f32 = part.parse().map_err(|_| ConvertError::Malformed {
            raw: raw.to_owned(),
            expected: "composite component (f32)",
        })?;
        entries.push(((*name).to_owned(), Value::F32(component)));
    }
    Ok(Value::Map(entries))
}

/// Leaf marshaller for a [`Composite`] member.
pub struct CompositeMarshal<T: Composite> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Composite> CompositeMarshal<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Composite> Default for CompositeMarshal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Composite> Marshal for CompositeMarshal<T> {
    fn describe(&self, own_path: &str, flags: MemberFlags) -> Vec<PropertyItem> {
        let usage = PropertyUsage::for_member(flags);
        T::FIELDS
            .iter()
            .map(|name| PropertyItem::leaf(format!("{own_path}.{name}"), VariantTag::Float, usage))
            .collect()
    }

    fn owns(&self, own_path: &str, path: &str) -> bool {
        if own_path == path {
            return true;
        }
        sub_field(own_path, path).is_some_and(|name| T::FIELDS.contains(&name))
    }

    fn get(&self, own_path: &str, path: &str, value: &dyn Any) -> Option<Value> {
        let value = value.downcast_ref::<T>()?;
        if own_path == path {
            return Some(fields_to_map(value));
        }
        let name = sub_field(own_path, path)?;
        value.field(name).map(Value::F32)
    }

    fn set(&self, own_path: &str, path: &str, value: &mut dyn Any, new: &Value) -> bool {
        let Some(slot) = value.downcast_mut::<T>() else {
            return false;
        };
        if own_path == path {
            return apply_map(slot, new);
        }
        match (sub_field(own_path, path), new.as_f32()) {
            (Some(name), Some(component)) => slot.set_field(name, component),
            _ => false,
        }
    }

    fn to_cache_string(&self, _own_path: &str, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(encode)
    }

    fn from_cache_string(&self, _own_path: &str, raw: &str) -> Result<Value, ConvertError> {
        decode::<T>(raw)
    }
}

/// Leaf marshaller for an `Option<T>` composite member.
///
/// Reads of a `None` value yield [`Value::Null`]; the first sub-field write
/// materializes [`Composite::default_value`] and then applies the write, so
/// later writes in the same session keep earlier sub-field values. The empty
/// cache string encodes `None`.
pub struct NullableCompositeMarshal<T: Composite> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Composite> NullableCompositeMarshal<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Composite> Default for NullableCompositeMarshal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Composite> Marshal for NullableCompositeMarshal<T> {
    fn describe(&self, own_path: &str, flags: MemberFlags) -> Vec<PropertyItem> {
        CompositeMarshal::<T>::new().describe(own_path, flags)
    }

    fn owns(&self, own_path: &str, path: &str) -> bool {
        CompositeMarshal::<T>::new().owns(own_path, path)
    }

    fn get(&self, own_path: &str, path: &str, value: &dyn Any) -> Option<Value> {
        let value = value.downcast_ref::<Option<T>>()?;
        if !self.owns(own_path, path) {
            return None;
        }
        match value {
            None => Some(Value::Null),
            Some(inner) => {
                if own_path == path {
                    Some(fields_to_map(inner))
                } else {
                    let name = sub_field(own_path, path)?;
                    inner.field(name).map(Value::F32)
                }
            }
        }
    }

    fn set(&self, own_path: &str, path: &str, value: &mut dyn Any, new: &Value) -> bool {
        let Some(slot) = value.downcast_mut::<Option<T>>() else {
            return false;
        };
        if !self.owns(own_path, path) {
            return false;
        }
        if own_path == path && new.is_null() {
            *slot = None;
            return true;
        }
        let inner = slot.get_or_insert_with(T::default_value);
        if own_path == path {
            return apply_map(inner, new);
        }
        match (sub_field(own_path, path), new.as_f32()) {
            (Some(name), Some(component)) => inner.set_field(name, component),
            _ => false,
        }
    }

    fn to_cache_string(&self, _own_path: &str, value: &dyn Any) -> Option<String> {
        value
            .downcast_ref::<Option<T>>()
            .map(|v| v.as_ref().map(encode).unwrap_or_default())
    }

    fn from_cache_string(&self, _own_path: &str, raw: &str) -> Result<Value, ConvertError> {
        if raw.is_empty() {
            return Ok(Value::Null);
        }
        decode::<T>(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_field_get_set() {
        let m = CompositeMarshal::<Vec2>::new();
        let mut v = Vec2::new(1.0, 2.0);

        assert_eq!(m.get("pos", "pos.y", &v), Some(Value::F32(2.0)));
        assert!(m.set("pos", "pos.x", &mut v, &Value::F32(9.0)));
        assert_eq!(v.x, 9.0);
        assert!(!m.set("pos", "pos.z", &mut v, &Value::F32(0.0)));
    }

    #[test]
    fn whole_value_as_map() {
        let m = CompositeMarshal::<Vec3>::new();
        let v = Vec3::new(1.0, 2.0, 3.0);

        let map = m.get("p", "p", &v).unwrap();
        assert_eq!(map.map_get("z"), Some(&Value::F32(3.0)));
    }

    #[test]
    fn whole_value_write_from_map() {
        let m = CompositeMarshal::<Vec2>::new();
        let mut v = Vec2::zeros();

        let new = Value::Map(vec![
            ("x".into(), Value::F32(4.0)),
            ("y".into(), Value::F32(5.0)),
        ]);
        assert!(m.set("p", "p", &mut v, &new));
        assert_eq!((v.x, v.y), (4.0, 5.0));
    }

    #[test]
    fn cache_round_trip() {
        let m = CompositeMarshal::<Rect>::new();
        let r = Rect::new(1.5, -2.0, 10.0, 0.25);

        let s = m.to_cache_string("r", &r).unwrap();
        assert_eq!(s, "1.5;-2;10;0.25");

        let decoded = m.from_cache_string("r", &s).unwrap();
        assert_eq!(decoded.map_get("h"), Some(&Value::F32(0.25)));
    }

    #[test]
    fn wrong_component_count_is_error() {
        let m = CompositeMarshal::<Vec2>::new();
        assert!(m.from_cache_string("p", "1;2;3").is_err());
        assert!(m.from_cache_string("p", "1;abc").is_err());
    }

    #[test]
    fn nullable_reads_null() {
        let m = NullableCompositeMarshal::<Vec2>::new();
        let v: Option<Vec2> = None;

        assert_eq!(m.get("p", "p", &v), Some(Value::Null));
        assert_eq!(m.get("p", "p.x", &v), Some(Value::Null));
    }

    #[test]
    fn nullable_lazy_default_keeps_earlier_writes() {
        let m = NullableCompositeMarshal::<Vec2>::new();
        let mut v: Option<Vec2> = None;

        assert!(m.set("p", "p.x", &mut v, &Value::F32(3.0)));
        assert!(m.set("p", "p.y", &mut v, &Value::F32(4.0)));

        let inner = v.unwrap();
        assert_eq!((inner.x, inner.y), (3.0, 4.0));
    }

    #[test]
    fn nullable_reset_to_null() {
        let m = NullableCompositeMarshal::<Vec2>::new();
        let mut v = Some(Vec2::new(1.0, 2.0));

        assert!(m.set("p", "p", &mut v, &Value::Null));
        assert_eq!(v, None);
    }

    #[test]
    fn nullable_cache_round_trip() {
        let m = NullableCompositeMarshal::<Vec2>::new();

        let none: Option<Vec2> = None;
        assert_eq!(m.to_cache_string("p", &none).unwrap(), "");
        assert_eq!(m.from_cache_string("p", "").unwrap(), Value::Null);

        let some = Some(Vec2::new(0.5, -1.0));
        let s = m.to_cache_string("p", &some).unwrap();
        assert_eq!(s, "0.5;-1");
        let decoded = m.from_cache_string("p", &s).unwrap();
        assert_eq!(decoded.map_get("y"), Some(&Value::F32(-1.0)));
    }
}
