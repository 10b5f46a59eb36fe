//! Roster Module
//!
//! Loaded presentation entities and the asynchronous path that produces them:
//! - [`Entity`]: configured schedule and placement plus live animated state
//! - [`Roster`]: entities kept in `order_index` order, whatever order they loaded in
//! - [`LoadQueue`]: per-entity load futures drained once per tick

pub mod entity;
pub mod loader;

pub use entity::{Entity, EntityId, Label, Pose};
pub use loader::{AssetLoader, AssetNode, LoadCompleter, LoadCompletion, LoadProgress, LoadQueue};

/// All successfully loaded entities, ordered by `order_index`.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    entities: Vec<Entity>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity at its `order_index` slot.
    ///
    /// An entity with the same id replaces the previous record in place.
    pub fn insert(&mut self, entity: Entity) {
        if let Some(existing) = self.entities.iter_mut().find(|e| e.id == entity.id) {
            *existing = entity;
            self.entities.sort_by_key(|e| e.order_index);
            return;
        }
        let at = self
            .entities
            .partition_point(|e| e.order_index <= entity.order_index);
        self.entities.insert(at, entity);
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Entities in ascending `order_index`.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
