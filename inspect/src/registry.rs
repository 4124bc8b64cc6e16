//! Explicit registries for inspectable types and their marshallers.
//!
//! Nothing here scans types at runtime: every inspectable type and every
//! marshallable leaf type is registered by an explicit call, so the
//! serializable surface of an application is auditable from its registration
//! code alone.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::marshal::{
    Composite, CompositeMarshal, EnumMarshal, Enumerated, Marshal, NodePath, NodePathMarshal,
    NullableCompositeMarshal, PrimitiveMarshal, ResourcePath, ResourcePathMarshal,
};
use crate::math::{Rect, Vec2, Vec3, Vec4};
use crate::member::MemberDecl;

/// Registered shape of one inspectable type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Short display name, used as the category label for group nodes.
    pub name: &'static str,
    /// Member declarations in display order.
    pub members: Vec<MemberDecl>,
}

impl TypeInfo {
    pub fn new(name: &'static str, members: Vec<MemberDecl>) -> Self {
        Self { name, members }
    }
}

/// Maps a type to its registered [`TypeInfo`].
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<TypeId, TypeInfo>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the shape of `T`.
    pub fn register<T: Any>(&mut self, info: TypeInfo) {
        self.types.insert(TypeId::of::<T>(), info);
    }

    pub fn get(&self, type_id: TypeId) -> Option<&TypeInfo> {
        self.types.get(&type_id)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains_key(&type_id)
    }
}

/// Maps a leaf type to its marshalling strategy.
///
/// Lookup happens once at tree-build time; the resolved `Arc` is cached on
/// the render node.
#[derive(Default, Clone)]
pub struct MarshalRegistry {
    marshals: HashMap<TypeId, Arc<dyn Marshal>>,
}

impl MarshalRegistry {
    /// Empty registry. Most callers want [`MarshalRegistry::with_defaults`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the primitive scalars, the composite
    /// vector/rect types, and the engine reference types.
    ///
    /// Enums and nullable composites are application-specific and must be
    /// added through [`register_enum`](Self::register_enum) and
    /// [`register_nullable`](Self::register_nullable).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<bool>(PrimitiveMarshal::<bool>::new());
        registry.register::<i32>(PrimitiveMarshal::<i32>::new());
        registry.register::<i64>(PrimitiveMarshal::<i64>::new());
        registry.register::<u32>(PrimitiveMarshal::<u32>::new());
        registry.register::<u64>(PrimitiveMarshal::<u64>::new());
        registry.register::<f32>(PrimitiveMarshal::<f32>::new());
        registry.register::<f64>(PrimitiveMarshal::<f64>::new());
        registry.register::<String>(PrimitiveMarshal::<String>::new());
        registry.register::<Vec2>(CompositeMarshal::<Vec2>::new());
        registry.register::<Vec3>(CompositeMarshal::<Vec3>::new());
        registry.register::<Vec4>(CompositeMarshal::<Vec4>::new());
        registry.register::<Rect>(CompositeMarshal::<Rect>::new());
        registry.register::<NodePath>(NodePathMarshal);
        registry.register::<ResourcePath>(ResourcePathMarshal);
        registry
    }

    /// Register (or replace) the marshaller for `T`.
    pub fn register<T: Any>(&mut self, marshal: impl Marshal + 'static) {
        self.marshals.insert(TypeId::of::<T>(), Arc::new(marshal));
    }

    /// Register an [`Enumerated`] enum type.
    pub fn register_enum<T: Enumerated>(&mut self) {
        self.register::<T>(EnumMarshal::<T>::new());
    }

    /// Register `Option<T>` for a composite type, with lazy-default writes.
    pub fn register_nullable<T: Composite>(&mut self) {
        self.register::<Option<T>>(NullableCompositeMarshal::<T>::new());
    }

    pub fn get(&self, type_id: TypeId) -> Option<Arc<dyn Marshal>> {
        self.marshals.get(&type_id).cloned()
    }
}
