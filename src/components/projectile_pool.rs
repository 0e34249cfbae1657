use bevy::prelude::*;

use crate::components::weapon::ProjectileSlots;
use crate::components::WeaponKind;
use crate::resources::WeaponConfig;

/// Handle to a slot in a [`ProjectilePool`].
///
/// The generation changes every time the slot is handed out again, so a handle
/// held by an old projectile stops being live once the slot is recycled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct SlotId {
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone, Reflect)]
struct Slot {
    generation: u32,
    active: bool,
}

/// Fixed-capacity set of reusable projectile slots.
///
/// Slots are created lazily up to the active limit and are never freed on
/// their own; a projectile that expires or is cleared only marks its slot
/// inactive so the next shot can take it over.
#[derive(Debug, Clone, Reflect)]
pub struct ProjectilePool {
    slots: Vec<Slot>,
    max_active: usize,
    /// Generation given to freshly created slots. Outlives destroyed slots so
    /// handles issued before a destroying clear never match again.
    next_generation: u32,
}

impl ProjectilePool {
    pub fn new(max_active: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_active),
            max_active,
            next_generation: 0,
        }
    }

    pub fn max_active(&self) -> usize {
        self.max_active
    }

    /// Number of slots created so far, active or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// Returns true while `id` still refers to the projectile it was issued for.
    pub fn is_live(&self, id: SlotId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.active && slot.generation == id.generation)
    }

    /// Marks the slot free again. Returns false if the handle was stale.
    pub fn release(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.active && slot.generation == id.generation => {
                slot.active = false;
                true
            }
            _ => false,
        }
    }
}

impl ProjectileSlots for ProjectilePool {
    fn acquire(&mut self, _position: Vec2, _texture_key: &str) -> Option<SlotId> {
        if self.active_count() >= self.max_active {
            return None;
        }

        let index = match self.slots.iter().position(|slot| !slot.active) {
            Some(index) => {
                self.slots[index].generation = self.slots[index].generation.wrapping_add(1);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: self.next_generation,
                    active: false,
                });
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        slot.active = true;

        Some(SlotId {
            index: index as u32,
            generation: slot.generation,
        })
    }

    fn set_active_limit(&mut self, max: usize) {
        self.max_active = max;
    }

    fn clear_all(&mut self, destroy: bool) {
        if destroy {
            let retired = self.slots.iter().map(|slot| slot.generation.wrapping_add(1)).max();
            if let Some(retired) = retired {
                self.next_generation = self.next_generation.max(retired);
            }
            self.slots.clear();
        } else {
            for slot in &mut self.slots {
                slot.active = false;
            }
        }
    }
}

/// The projectile pools of one ship, one per weapon.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ProjectilePools {
    pub lasers: ProjectilePool,
    pub meteors: ProjectilePool,
}

impl ProjectilePools {
    pub fn from_config(config: &WeaponConfig) -> Self {
        Self {
            lasers: ProjectilePool::new(config.max_lasers),
            meteors: ProjectilePool::new(config.max_meteors),
        }
    }

    pub fn pool(&self, weapon: WeaponKind) -> &ProjectilePool {
        match weapon {
            WeaponKind::Laser => &self.lasers,
            WeaponKind::Meteor => &self.meteors,
        }
    }

    pub fn pool_mut(&mut self, weapon: WeaponKind) -> &mut ProjectilePool {
        match weapon {
            WeaponKind::Laser => &mut self.lasers,
            WeaponKind::Meteor => &mut self.meteors,
        }
    }
}

impl Default for ProjectilePools {
    fn default() -> Self {
        Self::from_config(&WeaponConfig::default())
    }
}
