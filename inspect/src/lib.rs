//! Inspector property serialization for a scripting host.
//!
//! Registered types expose named members through explicit declarations; the
//! [`Inspector`] mirrors each registered root type into a [`RenderTree`] of
//! property nodes, routes dotted-path get/set/list calls to per-type
//! [`Marshal`] strategies, and persists cache-eligible values to a flat
//! on-disk [`SerializationCache`] partitioned by the root object's
//! [`Identity`].
//!
//! Quick tour:
//!
//! ```ignore
//! let mut types = TypeRegistry::new();
//! types.register::<Player>(TypeInfo::new(
//!     "Player",
//!     vec![
//!         member!(Player, score: i32, MemberFlags::cached()),
//!         member!(Player, tint: Color, MemberFlags::editor()),
//!     ],
//! ));
//!
//! let mut marshals = MarshalRegistry::with_defaults();
//! marshals.register_enum::<Color>();
//!
//! let inspector = Inspector::new(types, marshals)
//!     .with_cache(SerializationCache::new(vfs));
//!
//! inspector.set(&mut player, "score", &Value::I64(42))?;
//! let items = inspector.property_list(&player)?;
//! ```

mod cache;
mod error;
mod identity;
mod inspector;
mod item;
mod marshal;
mod math;
mod member;
mod reflect;
mod registry;
mod tree;
mod value;

pub use cache::SerializationCache;
pub use error::{CacheError, ConvertError, InspectError};
pub use identity::{CacheKey, Identity};
pub use inspector::Inspector;
pub use item::{PropertyHint, PropertyItem, PropertyUsage, VariantTag};
pub use marshal::{
    Composite, CompositeMarshal, EnumMarshal, Enumerated, Marshal, NodePath, NodePathMarshal,
    NullMarshal, NullableCompositeMarshal, Primitive, PrimitiveMarshal, ResourcePath,
    ResourcePathMarshal,
};
pub use math::{Rect, Vec2, Vec3, Vec4};
pub use member::{Member, MemberDecl, MemberFlags, MemberMut};
pub use reflect::Reflect;
pub use registry::{MarshalRegistry, TypeInfo, TypeRegistry};
pub use tree::{RenderNode, RenderTree};
pub use value::Value;
