//! Member declarations and runtime member views.
//!
//! A [`MemberDecl`] describes one named slot on a registered type: its name,
//! declared type, flags, and a pair of type-erased accessors. Declarations
//! are produced by the [`member!`](crate::member) macro and collected into a
//! [`TypeInfo`](crate::TypeInfo) at registration time. A [`Member`] binds a
//! declaration to a live parent instance for the duration of a single call.

use std::any::{Any, TypeId};

use bitflags::bitflags;

bitflags! {
    /// Behavior flags of a registered member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemberFlags: u8 {
        /// Shown in the editor property list.
        const EDITOR = 1 << 0;
        /// Serialized but excluded from the editor property list.
        const HIDDEN = 1 << 1;
        /// Value is persisted to the on-disk serialization cache.
        const CACHED = 1 << 2;
        /// Value can be read through the accessor.
        const READ = 1 << 3;
        /// Value can be written through the accessor.
        const WRITE = 1 << 4;
    }
}

impl MemberFlags {
    /// The common case: visible, readable and writable.
    pub fn editor() -> Self {
        Self::EDITOR | Self::READ | Self::WRITE
    }

    /// Visible, readable, writable and cache-persisted.
    pub fn cached() -> Self {
        Self::editor() | Self::CACHED
    }
}

type AccessFn = fn(&dyn Any) -> Option<&dyn Any>;
type AccessMutFn = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// Declaration of a single member of a registered type.
///
/// The accessors downcast the parent to its concrete type and project the
/// field. A failed downcast (wrong parent type) yields `None`, which callers
/// treat as a silent miss rather than an error.
#[derive(Clone)]
pub struct MemberDecl {
    pub name: &'static str,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub flags: MemberFlags,
    pub access: AccessFn,
    pub access_mut: AccessMutFn,
}

impl MemberDecl {
    pub fn is_cache_eligible(&self) -> bool {
        self.flags.contains(MemberFlags::CACHED)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(MemberFlags::HIDDEN)
    }
}

impl std::fmt::Debug for MemberDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDecl")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Declare a [`MemberDecl`] for a field of a struct.
///
/// ```ignore
/// struct Player { score: i32 }
///
/// let decl = member!(Player, score: i32, MemberFlags::cached());
/// ```
#[macro_export]
macro_rules! member {
    ($parent:ty, $field:ident : $fty:ty, $flags:expr) => {
        $crate::MemberDecl {
            name: stringify!($field),
            type_id: ::std::any::TypeId::of::<$fty>(),
            type_name: ::std::any::type_name::<$fty>(),
            flags: $flags,
            access: |parent: &dyn ::std::any::Any| {
                parent
                    .downcast_ref::<$parent>()
                    .map(|p| &p.$field as &dyn ::std::any::Any)
            },
            access_mut: |parent: &mut dyn ::std::any::Any| {
                parent
                    .downcast_mut::<$parent>()
                    .map(|p| &mut p.$field as &mut dyn ::std::any::Any)
            },
        }
    };
}

/// A member declaration bound to a parent instance for one read.
pub struct Member<'a> {
    pub decl: &'a MemberDecl,
    parent: &'a dyn Any,
}

impl<'a> Member<'a> {
    pub fn new(decl: &'a MemberDecl, parent: &'a dyn Any) -> Self {
        Self { decl, parent }
    }

    /// Current value, or `None` when the member is not readable or the
    /// accessor misses.
    pub fn value(&self) -> Option<&'a dyn Any> {
        if !self.decl.flags.contains(MemberFlags::READ) {
            return None;
        }
        (self.decl.access)(self.parent)
    }
}

/// A member declaration bound to a parent instance for one write.
pub struct MemberMut<'a> {
    pub decl: &'a MemberDecl,
    parent: &'a mut dyn Any,
}

impl<'a> MemberMut<'a> {
    pub fn new(decl: &'a MemberDecl, parent: &'a mut dyn Any) -> Self {
        Self { decl, parent }
    }

    /// Mutable access to the value, or `None` when the member is not
    /// writable or the accessor misses. Consumes the view so the returned
    /// borrow can outlive it, which lets accessor chains thread through
    /// nested members.
    pub fn into_value_mut(self) -> Option<&'a mut dyn Any> {
        if !self.decl.flags.contains(MemberFlags::WRITE) {
            return None;
        }
        (self.decl.access_mut)(self.parent)
    }
}
