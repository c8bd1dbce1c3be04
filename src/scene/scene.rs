use glam::Affine3A;
use slotmap::SlotMap;

use crate::resources::Color;
use crate::scene::NodeKey;
use crate::scene::fog::Fog;
use crate::scene::node::Node;

/// A named node arena with ordered top-level nodes.
///
/// Nodes are owned exclusively by the arena; hierarchy is expressed through
/// keys. Removing a node removes its whole subtree.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: String,
    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,
    pub fog: Option<Fog>,
    pub background: Option<Color>,
}

impl Scene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Inserts a node at the top level.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Inserts a node under `parent`. A stale parent key leaves the node at
    /// the top level.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeKey) -> NodeKey {
        let key = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
            if let Some(c) = self.nodes.get_mut(key) {
                c.parent = Some(parent);
            }
        } else {
            log::warn!("add_to_parent: parent node missing, inserting at top level");
            self.root_nodes.push(key);
        }
        key
    }

    /// Moves an existing node under `parent`, detaching it from wherever it was.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if child == parent || !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::warn!("attach: invalid node pair");
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn detach(&mut self, key: NodeKey) {
        match self.nodes.get(key).and_then(|n| n.parent) {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|&c| c != key);
                }
            }
            None => self.root_nodes.retain(|&r| r != key),
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.parent = None;
        }
    }

    /// Removes a node and its subtree. Returns the removed node.
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        if !self.nodes.contains_key(key) {
            return None;
        }
        self.detach(key);

        let mut stack = self.nodes.get(key).map(|n| n.children.clone()).unwrap_or_default();
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.remove(k) {
                stack.extend(node.children);
            }
        }
        self.nodes.remove(key)
    }

    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// First top-level node named `name`.
    #[must_use]
    pub fn find_top_level(&self, name: &str) -> Option<NodeKey> {
        self.root_nodes
            .iter()
            .copied()
            .find(|&k| self.nodes.get(k).is_some_and(|n| n.name == name))
    }

    /// First node named `name`, anywhere in the scene, in depth-first order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        let mut stack: Vec<NodeKey> = self.root_nodes.iter().rev().copied().collect();
        while let Some(k) = stack.pop() {
            let node = self.nodes.get(k)?;
            if node.name == name {
                return Some(k);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Removes the first top-level node named `name`.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Node> {
        let key = self.find_top_level(name)?;
        self.remove_node(key)
    }

    #[must_use]
    pub fn top_level(&self) -> &[NodeKey] {
        &self.root_nodes
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Propagates local matrices down the hierarchy.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeKey, Affine3A, bool)> = self
            .root_nodes
            .iter()
            .map(|&k| (k, Affine3A::IDENTITY, false))
            .collect();

        while let Some((key, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else { continue };
            let changed = node.transform.update_local_matrix() || parent_changed;
            if changed {
                let world = parent_world * *node.transform.local_matrix();
                node.transform.set_world_matrix(world);
            }
            let world = *node.transform.world_matrix();
            stack.extend(node.children.iter().map(|&c| (c, world, changed)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn world_matrix_composes_parent() {
        let mut scene = Scene::new("test");
        let mut parent = Node::group("parent");
        parent.transform.position = Vec3::new(10.0, 0.0, 0.0);
        let p = scene.add_node(parent);
        let mut child = Node::group("child");
        child.transform.position = Vec3::new(0.0, 5.0, 0.0);
        let c = scene.add_to_parent(child, p);

        scene.update_matrix_world();

        let world = scene.get_node(c).map(|n| n.world_matrix().translation);
        assert_eq!(world, Some(Vec3::new(10.0, 5.0, 0.0).into()));
    }

    #[test]
    fn removing_parent_drops_subtree() {
        let mut scene = Scene::new("test");
        let p = scene.add_node(Node::group("parent"));
        scene.add_to_parent(Node::group("child"), p);
        assert_eq!(scene.node_count(), 2);
        scene.remove_node(p);
        assert_eq!(scene.node_count(), 0);
        assert!(scene.top_level().is_empty());
    }
}
