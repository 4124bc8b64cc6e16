//! Declarative property descriptors handed to the host UI.
//!
//! Items are pure values: recomputed on every list request, never stored in
//! the tree and never persisted.

use bitflags::bitflags;
use serde::Serialize;

use crate::member::MemberFlags;

/// Type tag of a property descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariantTag {
    Nil,
    Bool,
    Int,
    Float,
    String,
    Vector2,
    Vector3,
    Vector4,
    Rect,
    NodePath,
    Resource,
}

/// Display hint attached to a property descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyHint {
    None,
    Range,
    Enum,
    ResourceType,
}

bitflags! {
    /// Usage flags of a property descriptor.
    ///
    /// Serde support comes from the `bitflags` crate's `serde` feature.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct PropertyUsage: u8 {
        /// Persisted by the serialization cache.
        const STORAGE = 1 << 0;
        /// Shown in the editor UI.
        const EDITOR = 1 << 1;
        /// Category header grouping the descriptors that follow it.
        const GROUP = 1 << 2;
        /// Displayed but not editable.
        const READ_ONLY = 1 << 3;
    }
}

impl PropertyUsage {
    /// Usage derived from a member's flags.
    pub fn for_member(flags: MemberFlags) -> Self {
        let mut usage = PropertyUsage::empty();
        if flags.contains(MemberFlags::CACHED) {
            usage |= PropertyUsage::STORAGE;
        }
        if !flags.contains(MemberFlags::HIDDEN) {
            usage |= PropertyUsage::EDITOR;
        }
        if !flags.contains(MemberFlags::WRITE) {
            usage |= PropertyUsage::READ_ONLY;
        }
        usage
    }
}

/// One entry of the host-visible property list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyItem {
    /// Full dotted property path.
    pub name: String,
    pub variant: VariantTag,
    pub hint: PropertyHint,
    pub hint_string: String,
    pub usage: PropertyUsage,
}

impl PropertyItem {
    /// Plain leaf descriptor with no hint.
    pub fn leaf(name: impl Into<String>, variant: VariantTag, usage: PropertyUsage) -> Self {
        Self {
            name: name.into(),
            variant,
            hint: PropertyHint::None,
            hint_string: String::new(),
            usage,
        }
    }

    /// Category header labeled with the group's type name.
    pub fn group(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: VariantTag::Nil,
            hint: PropertyHint::None,
            hint_string: label.into(),
            usage: PropertyUsage::GROUP,
        }
    }
}
