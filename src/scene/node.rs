use crate::roster::EntityId;
use crate::scene::NodeHandle;
use crate::scene::bounds::BoundingBox;
use crate::scene::transform::Transform;

/// A scene node in an entity's ownership tree.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: List of child node handles
///
/// # Ownership
///
/// `owner` is written once, when the subtree is instantiated from a loaded
/// asset, and names the entity the node belongs to. Hit-testing resolves a
/// hit node to its entity by reading this field, never by walking parents.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub name: String,
    pub transform: Transform,
    pub visible: bool,

    /// Local-space geometry bounds. Only nodes with bounds can be hit.
    pub bounds: Option<BoundingBox>,
    pub(crate) owner: Option<EntityId>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: name.into(),
            transform: Transform::new(),
            visible: true,
            bounds: None,
            owner: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
