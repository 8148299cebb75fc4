//! Slot-reusing entity pool
//!
//! Dead entities stay in place until a later `add` overwrites them, so the
//! backing `Vec` only grows to the peak live count and never reallocates under
//! steady churn. An index is only meaningful until the next `add`.

use super::state::{Color, Entity, EntityKind};

#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    slots: Vec<Entity>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Store an entity in the first dead slot, or append one
    pub fn add(&mut self, entity: Entity) -> usize {
        if let Some(index) = self.slots.iter().position(|e| !e.alive) {
            self.slots[index] = entity;
            index
        } else {
            self.slots.push(entity);
            self.slots.len() - 1
        }
    }

    /// Mark a slot dead; nothing moves
    pub fn kill(&mut self, index: usize) {
        debug_assert!(index < self.slots.len(), "kill out of range: {}", index);
        self.slots[index].alive = false;
    }

    /// Swap a dying entity for an explosion effect at the same spot
    ///
    /// The effect is added while `index` is still alive, so it can never land
    /// in the slot being killed.
    pub fn replace_with_effect(
        &mut self,
        index: usize,
        mut effect: Entity,
        rotation: f32,
        rotation_delta: f32,
        tint: Color,
    ) -> usize {
        debug_assert!(self.slots[index].alive, "exploding a dead slot: {}", index);
        debug_assert_eq!(effect.kind, EntityKind::Explosion);
        effect.pos = self.slots[index].pos;
        effect.rotation = rotation;
        effect.rotation_delta = rotation_delta;
        effect.tint = tint;
        let new_index = self.add(effect);
        self.kill(index);
        new_index
    }

    /// Kill every live entity (new run)
    pub fn kill_all(&mut self) {
        for e in &mut self.slots {
            e.alive = false;
        }
    }

    /// Slot count, dead ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_alive(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|e| e.alive)
    }

    pub fn is_alive_kind(&self, index: usize, kind: EntityKind) -> bool {
        self.slots.get(index).is_some_and(|e| e.alive && e.kind == kind)
    }

    /// Live entities with their slot index, in pool order
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots.iter().enumerate().filter(|(_, e)| e.alive)
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Entity] {
        &mut self.slots
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|e| e.alive).count()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.iter_alive().filter(|(_, e)| e.kind == kind).count()
    }
}

impl std::ops::Index<usize> for EntityPool {
    type Output = Entity;

    fn index(&self, index: usize) -> &Entity {
        &self.slots[index]
    }
}

impl std::ops::IndexMut<usize> for EntityPool {
    fn index_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.slots[index]
    }
}
