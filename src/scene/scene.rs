use glam::Affine3A;
use slotmap::SlotMap;

use crate::roster::{AssetNode, EntityId, Pose};
use crate::scene::NodeHandle;
use crate::scene::bounds::{BoundingBox, Ray};
use crate::scene::node::Node;

/// Result of a ray query against the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub node: NodeHandle,
    pub owner: Option<EntityId>,
    pub distance: f32,
}

/// Scene graph: an arena of nodes forming one ownership tree per entity.
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
        }
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        } else {
            log::error!("Parent node not found, adding '{}' at root", self.nodes[handle].name);
            if let Some(c) = self.nodes.get_mut(handle) {
                c.parent = None;
            }
            self.root_nodes.push(handle);
        }
        handle
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Builds a loaded asset's tree under a new root node and stamps `owner`
    /// on every node of it. Returns the root.
    pub fn instantiate(&mut self, asset: &AssetNode, owner: EntityId) -> NodeHandle {
        let root = self.add_node(Self::node_from_asset(asset, owner));

        let mut stack: Vec<(&AssetNode, NodeHandle)> = vec![(asset, root)];
        while let Some((source, parent)) = stack.pop() {
            for child in &source.children {
                let handle = self.add_to_parent(Self::node_from_asset(child, owner), parent);
                stack.push((child, handle));
            }
        }
        root
    }

    fn node_from_asset(asset: &AssetNode, owner: EntityId) -> Node {
        let mut node = Node::new(asset.name.clone());
        node.transform.position = asset.translation;
        node.bounds = asset.bounds;
        node.owner = Some(owner);
        node
    }

    /// Owning entity of any node, in one lookup.
    #[inline]
    #[must_use]
    pub fn owner_of(&self, handle: NodeHandle) -> Option<EntityId> {
        self.nodes.get(handle).and_then(|n| n.owner)
    }

    /// All nodes of the subtree rooted at `root`, root first.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Writes an entity's live pose onto its root node.
    pub fn apply_pose(&mut self, root: NodeHandle, pose: &Pose) {
        if let Some(node) = self.nodes.get_mut(root) {
            node.transform.position = pose.position;
            node.transform.set_rotation_y(pose.rotation_y);
            node.transform.set_uniform_scale(pose.scale);
        }
    }

    /// Propagates local transforms down to world matrices.
    pub fn update_world_matrices(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);
        for &root in self.root_nodes.iter().rev() {
            stack.push((root, Affine3A::IDENTITY, false));
        }

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let local_changed = node.transform.update_local_matrix();
            let world_needs_update = local_changed || parent_changed;
            if world_needs_update {
                let world = parent_world * *node.transform.local_matrix();
                node.transform.set_world_matrix(world);
            }

            let current_world = node.transform.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, current_world, world_needs_update));
            }
        }
    }

    /// World-space bounds of a geometry node.
    #[must_use]
    pub fn world_bounds(&self, handle: NodeHandle) -> Option<BoundingBox> {
        let node = self.nodes.get(handle)?;
        let local = node.bounds?;
        Some(local.transform(node.transform.world_matrix()))
    }

    /// Nearest visible geometry node along `ray`, searching only the given
    /// subtrees. Collapsed (zero-scale) geometry is never hit.
    #[must_use]
    pub fn raycast(&self, ray: &Ray, roots: &[NodeHandle]) -> Option<SceneHit> {
        let mut best: Option<SceneHit> = None;

        for &root in roots {
            for handle in self.collect_subtree(root) {
                let Some(node) = self.nodes.get(handle) else {
                    continue;
                };
                if !node.visible {
                    continue;
                }
                let Some(bounds) = self.world_bounds(handle) else {
                    continue;
                };
                if bounds.is_degenerate() {
                    continue;
                }
                if let Some(distance) = ray.intersect_box(&bounds)
                    && best.is_none_or(|b| distance < b.distance)
                {
                    best = Some(SceneHit {
                        node: handle,
                        owner: node.owner,
                        distance,
                    });
                }
            }
        }
        best
    }
}
