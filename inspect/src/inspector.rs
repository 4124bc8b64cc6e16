//! The host-facing entry point tying registries, render trees and the
//! serialization cache together.
//!
//! An `Inspector` is an explicit, application-owned object; there is no
//! process-wide state. Embedders typically build one per loaded scene or
//! document and share it behind whatever lifetime they need — tree shapes
//! are cached per root type behind a mutex, everything else is immutable
//! after construction.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::SerializationCache;
use crate::error::InspectError;
use crate::item::PropertyItem;
use crate::reflect::Reflect;
use crate::registry::{MarshalRegistry, TypeRegistry};
use crate::tree::RenderTree;
use crate::value::Value;

pub struct Inspector {
    types: TypeRegistry,
    marshals: MarshalRegistry,
    shapes: Mutex<HashMap<TypeId, Arc<RenderTree>>>,
    cache: Option<SerializationCache>,
}

impl Inspector {
    pub fn new(types: TypeRegistry, marshals: MarshalRegistry) -> Self {
        Self {
            types,
            marshals,
            shapes: Mutex::new(HashMap::new()),
            cache: None,
        }
    }

    /// Attach a serialization cache. Without one, cache-eligible writes are
    /// regular writes and [`restore`](Self::restore) is a no-op.
    pub fn with_cache(mut self, cache: SerializationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn shape_for(&self, object: &dyn Reflect) -> Result<Arc<RenderTree>, InspectError> {
        let type_id = object.any_ref().type_id();
        let mut shapes = self.shapes.lock();
        if let Some(shape) = shapes.get(&type_id) {
            return Ok(shape.clone());
        }
        let info = self
            .types
            .get(type_id)
            .ok_or_else(|| InspectError::UnregisteredType {
                type_name: object.type_name(),
            })?;
        let shape = Arc::new(RenderTree::build(type_id, info, &self.types, &self.marshals));
        shapes.insert(type_id, shape.clone());
        Ok(shape)
    }

    /// The full property list of `object`, in tree order.
    pub fn property_list(&self, object: &dyn Reflect) -> Result<Vec<PropertyItem>, InspectError> {
        Ok(self.shape_for(object)?.list())
    }

    /// Read one property. `Ok(None)` means no node owns the path.
    pub fn get(&self, object: &dyn Reflect, path: &str) -> Result<Option<Value>, InspectError> {
        if path.is_empty() {
            return Err(InspectError::EmptyPath);
        }
        let shape = self.shape_for(object)?;
        Ok(shape.get(object.any_ref(), path))
    }

    /// Write one property. Returns whether the write was accepted.
    ///
    /// An accepted write to a cache-eligible member of an object with a
    /// resolvable identity is also written through to the serialization
    /// cache, keyed by the owning node's path.
    pub fn set(
        &self,
        object: &mut dyn Reflect,
        path: &str,
        new: &Value,
    ) -> Result<bool, InspectError> {
        if path.is_empty() {
            return Err(InspectError::EmptyPath);
        }
        let shape = self.shape_for(object)?;
        let Some((idx, accepted)) = shape.set(object.any_mut(), path, new) else {
            return Ok(false);
        };
        if accepted {
            self.write_through(object, &shape, idx)?;
        }
        Ok(accepted)
    }

    fn write_through(
        &self,
        object: &dyn Reflect,
        shape: &RenderTree,
        idx: usize,
    ) -> Result<(), InspectError> {
        let node = shape.node(idx);
        if !node.member.is_cache_eligible() {
            return Ok(());
        }
        let (Some(cache), Some(key)) = (&self.cache, object.identity().cache_key()) else {
            return Ok(());
        };
        if let Some(encoded) = shape.cache_string(object.any_ref(), idx) {
            cache.set(key, &node.path, &encoded)?;
        }
        Ok(())
    }

    /// Apply every cached entry for the object's identity, returning how
    /// many were applied.
    ///
    /// Entries whose path no longer exists in the shape are skipped; entries
    /// that exist but no longer parse are a hard error.
    pub fn restore(&self, object: &mut dyn Reflect) -> Result<usize, InspectError> {
        let (Some(cache), Some(key)) = (&self.cache, object.identity().cache_key()) else {
            return Ok(0);
        };
        let shape = self.shape_for(object)?;
        let entries = cache.load(key)?;

        let mut applied = 0;
        for (path, raw) in entries {
            let Some((idx, marshal)) = shape.find_owner(&path) else {
                log::debug!("skipping stale cache entry '{path}'");
                continue;
            };
            let own_path = &shape.node(idx).path;
            let value = marshal
                .from_cache_string(own_path, &raw)
                .map_err(|source| InspectError::Convert {
                    path: path.clone(),
                    source,
                })?;
            if let Some((_, true)) = shape.set(object.any_mut(), &path, &value) {
                applied += 1;
            }
        }
        Ok(applied)
    }
}
