/// Scene: a tree of nodes keyed by stable slot-map keys.
///
/// Keys remain valid even after other nodes are removed. Removing a node
/// removes its whole subtree.

use glam::Mat4;
use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::engine_bail;
use super::layers::Layers;
use super::node::Node;

new_key_type! {
    /// Stable key for a Node within a Scene.
    pub struct NodeKey;
}

struct SceneEntry {
    node: Node,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// A node tree.
pub struct Scene {
    nodes: SlotMap<NodeKey, SceneEntry>,
    roots: Vec<NodeKey>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Add a node under `parent` (or as a root).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidNode` if `parent` is not in this scene.
    pub fn add(&mut self, node: Node, parent: Option<NodeKey>) -> Result<NodeKey> {
        if let Some(parent_key) = parent {
            if !self.nodes.contains_key(parent_key) {
                engine_bail!("probe::Scene", InvalidNode,
                    "Parent {:?} not found while adding '{}'", parent_key, node.name());
            }
        }

        let key = self.nodes.insert(SceneEntry {
            node,
            parent,
            children: Vec::new(),
        });

        match parent {
            Some(parent_key) => self.nodes[parent_key].children.push(key),
            None => self.roots.push(key),
        }
        Ok(key)
    }

    /// Remove a node and its subtree, returning the removed node.
    ///
    /// Descendant nodes are dropped. Returns `None` if the key is invalid.
    pub fn remove(&mut self, key: NodeKey) -> Option<Node> {
        if !self.nodes.contains_key(key) {
            return None;
        }

        let subtree = self.subtree(key);
        let removed: FxHashSet<NodeKey> = subtree.iter().copied().collect();

        match self.nodes[key].parent {
            Some(parent_key) => {
                if let Some(parent) = self.nodes.get_mut(parent_key) {
                    parent.children.retain(|k| *k != key);
                }
            }
            None => self.roots.retain(|k| !removed.contains(k)),
        }

        let mut root_node = None;
        for k in subtree {
            if let Some(entry) = self.nodes.remove(k) {
                if k == key {
                    root_node = Some(entry.node);
                }
            }
        }
        root_node
    }

    /// Remove all children of a node (the node itself stays)
    pub fn clear_children(&mut self, key: NodeKey) {
        let children = match self.nodes.get(key) {
            Some(entry) => entry.children.clone(),
            None => return,
        };
        for child in children {
            self.remove(child);
        }
    }

    // ===== QUERIES =====

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key).map(|e| &e.node)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key).map(|e| &mut e.node)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|e| e.parent)
    }

    /// Children of a node (empty for an invalid key)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Number of nodes in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the first node with the given name (depth-first from the roots)
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.roots
            .iter()
            .flat_map(|root| self.subtree(*root))
            .find(|k| self.nodes[*k].node.name() == name)
    }

    /// The node and all its descendants, parents before children
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(entry) = self.nodes.get(k) {
                out.push(k);
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    /// World matrix: product of local matrices from the root down.
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let mut entry = self.nodes.get(key)?;
        let mut world = entry.node.transform().matrix();
        while let Some(parent_key) = entry.parent {
            entry = self.nodes.get(parent_key)?;
            world = entry.node.transform().matrix() * world;
        }
        Some(world)
    }

    /// True if the node and all of its ancestors are visible
    pub fn is_visible_in_tree(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.nodes.get(k) {
                Some(entry) if entry.node.is_visible() => current = entry.parent,
                _ => return false,
            }
        }
        true
    }

    /// Visible nodes whose layers intersect `mask`, parents before children
    pub fn visible_in_layers(&self, mask: Layers) -> Vec<NodeKey> {
        self.roots
            .iter()
            .flat_map(|root| self.subtree(*root))
            .filter(|k| {
                self.nodes[*k].node.layers().intersects(mask) && self.is_visible_in_tree(*k)
            })
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
