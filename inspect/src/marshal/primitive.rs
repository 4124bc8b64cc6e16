//! Marshalling for primitive scalar members.

use std::any::Any;
use std::marker::PhantomData;

use crate::error::ConvertError;
use crate::item::{PropertyItem, PropertyUsage, VariantTag};
use crate::member::MemberFlags;
use crate::value::Value;

use super::Marshal;

/// A scalar type with a fixed, locale-independent string encoding.
///
/// The cache encoding uses Rust's `Display`/`FromStr`, which for floats is
/// the shortest representation that round-trips exactly.
pub trait Primitive: Any + Clone {
    const TAG: VariantTag;
    const EXPECTED: &'static str;

    fn to_value(&self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
    fn to_cache(&self) -> String;
    fn from_cache(raw: &str) -> Option<Self>;
}

macro_rules! primitive_impl {
    ($ty:ty, $tag:expr, $to:expr, $from:expr) => {
        impl Primitive for $ty {
            const TAG: VariantTag = $tag;
            const EXPECTED: &'static str = stringify!($ty);

            fn to_value(&self) -> Value {
                let convert = $to;
                convert(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                let convert = $from;
                convert(value)
            }

            fn to_cache(&self) -> String {
                self.to_string()
            }

            fn from_cache(raw: &str) -> Option<Self> {
                raw.parse().ok()
            }
        }
    };
}

primitive_impl!(bool, VariantTag::Bool, |v: &bool| Value::Bool(*v), |v: &Value| v.as_bool());
primitive_impl!(i32, VariantTag::Int, |v: &i32| Value::I64(*v as i64), |v: &Value| v
    .as_i64()
    .and_then(|n| i32::try_from(n).ok()));
primitive_impl!(i64, VariantTag::Int, |v: &i64| Value::I64(*v), |v: &Value| v.as_i64());
primitive_impl!(u32, VariantTag::Int, |v: &u32| Value::U64(*v as u64), |v: &Value| v
    .as_u64()
    .and_then(|n| u32::try_from(n).ok()));
primitive_impl!(u64, VariantTag::Int, |v: &u64| Value::U64(*v), |v: &Value| v.as_u64());
primitive_impl!(f32, VariantTag::Float, |v: &f32| Value::F32(*v), |v: &Value| v.as_f32());
primitive_impl!(f64, VariantTag::Float, |v: &f64| Value::F64(*v), |v: &Value| v.as_f64());

impl Primitive for String {
    const TAG: VariantTag = VariantTag::String;
    const EXPECTED: &'static str = "string";

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_cache(&self) -> String {
        self.clone()
    }

    fn from_cache(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

/// Leaf marshaller for a single [`Primitive`] member.
pub struct PrimitiveMarshal<T: Primitive> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Primitive> PrimitiveMarshal<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Primitive> Default for PrimitiveMarshal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Primitive> Marshal for PrimitiveMarshal<T> {
    fn describe(&self, own_path: &str, flags: MemberFlags) -> Vec<PropertyItem> {
        vec![PropertyItem::leaf(
            own_path,
            T::TAG,
            PropertyUsage::for_member(flags),
        )]
    }

    fn owns(&self, own_path: &str, path: &str) -> bool {
        own_path == path
    }

    fn get(&self, own_path: &str, path: &str, value: &dyn Any) -> Option<Value> {
        if !self.owns(own_path, path) {
            return None;
        }
        value.downcast_ref::<T>().map(Primitive::to_value)
    }

    fn set(&self, own_path: &str, path: &str, value: &mut dyn Any, new: &Value) -> bool {
        if !self.owns(own_path, path) {
            return false;
        }
        let (Some(slot), Some(converted)) = (value.downcast_mut::<T>(), T::from_value(new)) else {
            return false;
        };
        *slot = converted;
        true
    }

    fn to_cache_string(&self, _own_path: &str, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(Primitive::to_cache)
    }

    fn from_cache_string(&self, _own_path: &str, raw: &str) -> Result<Value, ConvertError> {
        match T::from_cache(raw) {
            Some(v) => Ok(v.to_value()),
            None => Err(ConvertError::Malformed {
                raw: raw.to_owned(),
                expected: T::EXPECTED,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_get_set() {
        let m = PrimitiveMarshal::<i32>::new();
        let mut slot = 5i32;

        assert_eq!(m.get("score", "score", &slot), Some(Value::I64(5)));
        assert!(m.set("score", "score", &mut slot, &Value::I64(42)));
        assert_eq!(slot, 42);
    }

    #[test]
    fn not_mine_path() {
        let m = PrimitiveMarshal::<i32>::new();
        let mut slot = 5i32;

        assert_eq!(m.get("score", "other", &slot), None);
        assert!(!m.set("score", "other", &mut slot, &Value::I64(1)));
        assert_eq!(slot, 5);
    }

    #[test]
    fn out_of_range_write_rejected() {
        let m = PrimitiveMarshal::<i32>::new();
        let mut slot = 0i32;
        assert!(!m.set("n", "n", &mut slot, &Value::I64(i64::MAX)));
        assert_eq!(slot, 0);
    }

    #[test]
    fn cache_round_trip_int() {
        let m = PrimitiveMarshal::<i64>::new();
        for v in [0i64, -17, i64::MAX, i64::MIN] {
            let s = m.to_cache_string("n", &v).unwrap();
            assert_eq!(m.from_cache_string("n", &s).unwrap(), Value::I64(v));
        }
    }

    #[test]
    fn cache_round_trip_float() {
        let m = PrimitiveMarshal::<f32>::new();
        for v in [0.0f32, -1.5, 0.1, f32::MAX, f32::MIN_POSITIVE] {
            let s = m.to_cache_string("f", &v).unwrap();
            assert_eq!(m.from_cache_string("f", &s).unwrap(), Value::F32(v));
        }
    }

    #[test]
    fn cache_round_trip_bool_and_string() {
        let bools = PrimitiveMarshal::<bool>::new();
        let s = bools.to_cache_string("b", &true).unwrap();
        assert_eq!(s, "true");
        assert_eq!(bools.from_cache_string("b", &s).unwrap(), Value::Bool(true));

        let strings = PrimitiveMarshal::<String>::new();
        let owned = String::from("hello world");
        let s = strings.to_cache_string("s", &owned).unwrap();
        assert_eq!(
            strings.from_cache_string("s", &s).unwrap(),
            Value::String("hello world".into())
        );
    }

    #[test]
    fn malformed_cache_string_is_hard_error() {
        let m = PrimitiveMarshal::<i32>::new();
        assert!(m.from_cache_string("n", "not-a-number").is_err());
    }
}
