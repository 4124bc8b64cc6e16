//! The trait a root object implements to become inspectable.
//!
//! `Reflect` gives the inspector a type-erased view of the instance plus the
//! host-provided identity used to partition the serialization cache. Member
//! enumeration comes from explicit registration, not from this trait, so the
//! serializable surface of a type stays statically auditable.

use std::any::Any;

use crate::identity::Identity;

/// A root object that can be driven through an [`Inspector`](crate::Inspector).
pub trait Reflect: Any {
    /// Type-erased shared view, used to resolve member accessor chains.
    fn any_ref(&self) -> &dyn Any;

    /// Type-erased mutable view.
    fn any_mut(&mut self) -> &mut dyn Any;

    /// Display name for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Where this instance lives, for cache partitioning. Defaults to
    /// [`Identity::Detached`], which disables caching for the instance.
    fn identity(&self) -> Identity {
        Identity::Detached
    }
}
