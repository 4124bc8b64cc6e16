//! The render tree: the in-memory structure mirroring a type's
//! serializable shape.
//!
//! Nodes live in a flat arena vector; parent and child links are indices
//! into it, so the tree owns its nodes without reference cycles. The shape
//! depends only on the root type — the live instance is passed into every
//! operation, never stored — so one tree serves every instance of its type
//! and rebinding is a non-event.
//!
//! A node is a leaf when a marshaller was resolved for its member's exact
//! type at build time; otherwise the member's registered type is expanded
//! into a group node labeled with that type's name and carrying the
//! [`NullMarshal`] sentinel, which owns no path and so never intercepts
//! routing.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::item::PropertyItem;
use crate::marshal::{Marshal, NullMarshal};
use crate::member::{Member, MemberDecl, MemberMut};
use crate::registry::{MarshalRegistry, TypeInfo, TypeRegistry};
use crate::value::Value;

pub struct RenderNode {
    /// Full dotted path from the root.
    pub path: String,
    pub member: MemberDecl,
    /// Group label (the member type's registered name); `None` for leaves.
    pub category: Option<&'static str>,
    /// Resolved marshalling strategy; group nodes get the no-op sentinel.
    pub marshal: Arc<dyn Marshal>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl RenderNode {
    pub fn is_leaf(&self) -> bool {
        self.category.is_none()
    }
}

pub struct RenderTree {
    nodes: Vec<RenderNode>,
    roots: Vec<usize>,
    type_name: &'static str,
    sentinel: Arc<dyn Marshal>,
}

impl RenderTree {
    /// Build the tree for a registered root type.
    ///
    /// Members whose type has neither a marshaller nor a registration are
    /// skipped with a warning, as is any member whose type is already being
    /// expanded further up (recursive shapes cannot be mirrored).
    pub fn build(
        root_type_id: TypeId,
        info: &TypeInfo,
        types: &TypeRegistry,
        marshals: &MarshalRegistry,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            type_name: info.name,
            sentinel: Arc::new(NullMarshal),
        };
        let mut expansion_stack = vec![root_type_id];
        tree.roots = tree.build_members(info, None, "", types, marshals, &mut expansion_stack);
        tree
    }

    fn build_members(
        &mut self,
        info: &TypeInfo,
        parent: Option<usize>,
        prefix: &str,
        types: &TypeRegistry,
        marshals: &MarshalRegistry,
        expansion_stack: &mut Vec<TypeId>,
    ) -> Vec<usize> {
        let mut indices = Vec::new();
        for decl in &info.members {
            let path = if prefix.is_empty() {
                decl.name.to_owned()
            } else {
                format!("{prefix}.{}", decl.name)
            };

            if let Some(marshal) = marshals.get(decl.type_id) {
                let idx = self.push_node(path, decl.clone(), None, marshal, parent);
                indices.push(idx);
            } else if let Some(child_info) = types.get(decl.type_id) {
                if expansion_stack.contains(&decl.type_id) {
                    log::warn!(
                        "skipping recursive member '{}' of type {}",
                        path,
                        decl.type_name
                    );
                    continue;
                }
                let idx = self.push_node(
                    path.clone(),
                    decl.clone(),
                    Some(child_info.name),
                    self.sentinel.clone(),
                    parent,
                );
                indices.push(idx);

                expansion_stack.push(decl.type_id);
                let children =
                    self.build_members(child_info, Some(idx), &path, types, marshals, expansion_stack);
                expansion_stack.pop();
                self.nodes[idx].children = children;
            } else {
                log::warn!(
                    "skipping member '{}': type {} has no marshaller and no registration",
                    path,
                    decl.type_name
                );
            }
        }
        indices
    }

    fn push_node(
        &mut self,
        path: String,
        member: MemberDecl,
        category: Option<&'static str>,
        marshal: Arc<dyn Marshal>,
        parent: Option<usize>,
    ) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(RenderNode {
            path,
            member,
            category,
            marshal,
            parent,
            children: Vec::new(),
        });
        idx
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn node(&self, idx: usize) -> &RenderNode {
        &self.nodes[idx]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node whose marshaller owns `path`, in depth-first order. The
    /// sentinel on group nodes owns nothing, so only leaves can match.
    pub fn find_owner(&self, path: &str) -> Option<(usize, Arc<dyn Marshal>)> {
        self.nodes.iter().enumerate().find_map(|(idx, node)| {
            node.marshal
                .owns(&node.path, path)
                .then(|| (idx, node.marshal.clone()))
        })
    }

    // Walks the ancestor chain from the root down to `idx`, applying each
    // member accessor in turn.
    fn chain(&self, idx: usize) -> Vec<usize> {
        let mut chain = vec![idx];
        let mut current = idx;
        while let Some(parent) = self.nodes[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    fn resolve_ref<'a>(&'a self, root: &'a dyn Any, idx: usize) -> Option<&'a dyn Any> {
        let mut current = root;
        for node_idx in self.chain(idx) {
            current = Member::new(&self.nodes[node_idx].member, current).value()?;
        }
        Some(current)
    }

    fn resolve_mut<'a>(&'a self, root: &'a mut dyn Any, idx: usize) -> Option<&'a mut dyn Any> {
        let mut current = root;
        for node_idx in self.chain(idx) {
            current = MemberMut::new(&self.nodes[node_idx].member, current).into_value_mut()?;
        }
        Some(current)
    }

    /// Read the value at `path` out of `root`. `None` when no node owns the
    /// path or an accessor along the chain misses.
    pub fn get(&self, root: &dyn Any, path: &str) -> Option<Value> {
        let (idx, marshal) = self.find_owner(path)?;
        let value = self.resolve_ref(root, idx)?;
        marshal.get(&self.nodes[idx].path, path, value)
    }

    /// Write `new` into `root` at `path`. `None` when no node owns the path;
    /// otherwise the owning node index and whether the write was accepted.
    pub fn set(&self, root: &mut dyn Any, path: &str, new: &Value) -> Option<(usize, bool)> {
        let (idx, marshal) = self.find_owner(path)?;
        let Some(value) = self.resolve_mut(root, idx) else {
            return Some((idx, false));
        };
        Some((idx, marshal.set(&self.nodes[idx].path, path, value, new)))
    }

    /// The whole property list, depth-first: a category header per group
    /// node, the marshaller's descriptors per leaf.
    pub fn list(&self) -> Vec<PropertyItem> {
        let mut items = Vec::new();
        for node in &self.nodes {
            match node.category {
                Some(label) => items.push(PropertyItem::group(node.path.clone(), label)),
                None => items.extend(node.marshal.describe(&node.path, node.member.flags)),
            }
        }
        items
    }

    /// Paths of all leaf nodes.
    pub fn paths(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.path.as_str())
            .collect()
    }

    /// Cache encoding of the leaf at `idx` for the current value in `root`.
    /// Group nodes yield `None` through their sentinel.
    pub fn cache_string(&self, root: &dyn Any, idx: usize) -> Option<String> {
        let node = &self.nodes[idx];
        let value = self.resolve_ref(root, idx)?;
        node.marshal.to_cache_string(&node.path, value)
    }
}
