use bevy::prelude::*;

use crate::components::projectile_pool::SlotId;

/// The two weapons every ship carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponKind {
    /// Magazine-fed primary weapon.
    Laser,
    /// Pool-only secondary weapon.
    Meteor,
}

impl WeaponKind {
    /// Name of the peer event announcing a shot from this weapon.
    pub fn event_name(&self) -> &'static str {
        match self {
            WeaponKind::Laser => "bulletFired",
            WeaponKind::Meteor => "meteorFired",
        }
    }
}

/// Component applied to projectiles fired by a locally simulated ship.
#[derive(Component, Debug, Clone, Reflect)]
pub struct Projectile {
    /// Ship that fired the projectile and owns its slot.
    pub owner: Entity,
    pub weapon: WeaponKind,
    pub slot: SlotId,
}

/// Marker for projectiles replayed from a peer's fire event.
#[derive(Component, Debug, Default)]
pub struct RemoteProjectile;

/// Despawns a projectile once it has been in flight for a while.
#[derive(Component, Debug)]
pub struct ProjectileLifetime(pub Timer);

impl ProjectileLifetime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

impl Default for ProjectileLifetime {
    fn default() -> Self {
        Self::from_seconds(3.0)
    }
}
