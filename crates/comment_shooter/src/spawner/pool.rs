//! Reusable comment entities.
//!
//! Entities are never despawned while the pool is alive. Each one is either on
//! its kind's free list or in the active map, never both.

use bevy::ecs::entity::EntityHashMap;
use bevy::prelude::*;

use crate::comment::{CommentKind, PerKind};

/// Present on every entity the pool owns.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PooledComment {
    pub kind: CommentKind,
}

/// Present while the entity is out of the pool and in play.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ActiveComment;

#[derive(Resource, Debug, Default)]
pub struct CommentPool {
    free: PerKind<Vec<Entity>>,
    active: EntityHashMap<CommentKind>,
    allocated: PerKind<usize>,
}

impl CommentPool {
    /// Takes a free entity of `kind` and marks it active.
    pub fn acquire(&mut self, kind: CommentKind) -> Option<Entity> {
        let entity = self.free.get_mut(kind).pop()?;
        self.active.insert(entity, kind);
        Some(entity)
    }

    /// Records a freshly allocated entity that goes straight into play.
    pub fn adopt(&mut self, kind: CommentKind, entity: Entity) {
        *self.allocated.get_mut(kind) += 1;
        self.active.insert(entity, kind);
    }

    /// Records a freshly allocated entity that waits on the free list.
    pub fn stock(&mut self, kind: CommentKind, entity: Entity) {
        *self.allocated.get_mut(kind) += 1;
        self.free.get_mut(kind).push(entity);
    }

    /// Returns an active entity to its free list. Releasing twice is a no-op.
    pub fn release(&mut self, entity: Entity) -> Option<CommentKind> {
        let kind = self.active.remove(&entity)?;
        self.free.get_mut(kind).push(entity);
        Some(kind)
    }

    /// Releases every active entity and returns them.
    pub fn release_all(&mut self) -> Vec<Entity> {
        let entities: Vec<Entity> = self.active.keys().copied().collect();
        for &entity in &entities {
            self.release(entity);
        }
        entities
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.active.contains_key(&entity)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active_of(&self, kind: CommentKind) -> usize {
        self.active.values().filter(|&&active| active == kind).count()
    }

    pub fn free_count(&self, kind: CommentKind) -> usize {
        self.free.get(kind).len()
    }

    /// Entities ever created for `kind`.
    pub fn allocated(&self, kind: CommentKind) -> usize {
        *self.allocated.get(kind)
    }

    pub fn total_allocated(&self) -> usize {
        self.allocated.iter().map(|(_, count)| count).sum()
    }
}
