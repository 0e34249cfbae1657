//! Ammunition and reload rules for a ship's two weapons.
//!
//! The primary weapon ([`LaserBank`]) is magazine-fed: rounds come out of a
//! loaded magazine backed by a finite reserve, and a reload refills the
//! magazine from that reserve. The secondary weapon ([`MeteorBattery`]) is a
//! plain pool of shots with no magazine and no reload.
//!
//! Neither weapon touches the ECS directly. Every operation receives its
//! collaborators explicitly:
//! - [`ProjectileSlots`]: bounded pool of reusable projectile slots.
//! - [`FiringPosition`]: where the firing ship is and which way it faces.
//! - [`AmmoDisplay`]: the HUD indicator for the weapon.
//!
//! A refused shot is [`FireResult::Denied`], which is an ordinary outcome and
//! not an error.

use bevy::prelude::*;

use crate::components::projectile_pool::SlotId;
use crate::resources::WeaponConfig;

/// Bounded pool of reusable projectile slots owned by one ship.
pub trait ProjectileSlots {
    /// Claims a free slot at `position`, or `None` when the pool is at capacity
    /// and nothing can be recycled.
    fn acquire(&mut self, position: Vec2, texture_key: &str) -> Option<SlotId>;

    /// Lowers (or raises) the number of slots that may be active at once.
    fn set_active_limit(&mut self, max: usize);

    /// Removes every projectile from the world. With `destroy == false` the
    /// slots survive and stay available as capacity.
    fn clear_all(&mut self, destroy: bool);
}

/// Read-only view of the firing ship's position and heading.
pub trait FiringPosition {
    fn position(&self) -> Vec2;

    /// Heading in radians, counter-clockwise from +X.
    fn rotation(&self) -> f32;
}

impl FiringPosition for Transform {
    fn position(&self) -> Vec2 {
        self.translation.truncate()
    }

    fn rotation(&self) -> f32 {
        self.rotation.to_euler(EulerRot::ZYX).0
    }
}

/// HUD indicator for a weapon's ammunition.
pub trait AmmoDisplay {
    fn set_text(&mut self, text: &str);
    fn set_texture(&mut self, key: &str);
}

/// Fixed position/heading pair. Used for remote shots and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Muzzle {
    pub position: Vec2,
    pub rotation: f32,
}

impl FiringPosition for Muzzle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }
}

/// Launch parameters of a freshly spawned projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
}

impl Kinematics {
    /// Projectile leaving `position` along `rotation` at `speed`.
    pub fn launch(position: Vec2, rotation: f32, speed: f32) -> Self {
        Self {
            position,
            rotation,
            velocity: Vec2::from_angle(rotation) * speed,
        }
    }
}

/// Outcome of a fire attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FireResult {
    /// Out of ammunition or no free projectile slot. Nothing changed.
    Denied,
    /// A projectile may be spawned with these parameters.
    Spawned {
        slot: SlotId,
        kinematics: Kinematics,
        /// Uniform sprite scale of the projectile.
        scale: f32,
        texture_key: String,
    },
}

impl FireResult {
    pub fn is_spawned(&self) -> bool {
        matches!(self, FireResult::Spawned { .. })
    }
}

/// Outcome of a primary-weapon reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The magazine was refilled and in-flight lasers were cleared.
    Reloaded { magazine_limit: i32 },
    /// Less than a full magazine remains; only the active-projectile cap changed.
    Capped { max_active: u32 },
}

/// HUD text for the primary weapon: `"{magazine}|{reloads left}"`.
pub fn laser_readout(current_magazine_ammo: i32, magazine_limit: i32) -> String {
    format!("{}|{}", current_magazine_ammo, magazine_limit)
}

/// Texture key of the secondary weapon's ammo-level indicator.
pub fn meteor_indicator_key(prefix: &str, ammo_pool: u32) -> String {
    format!("{}{}", prefix, ammo_pool)
}

/// Primary weapon: a magazine-fed laser.
///
/// Only `ammo_total` gates firing. The loaded magazine is a display counter
/// and keeps counting down past zero until the player reloads.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LaserBank {
    ammo_total: u32,
    magazine_size: u32,
    magazine_limit: i32,
    current_magazine_ammo: i32,
    muzzle_speed: f32,
    texture_key: String,
}

impl LaserBank {
    /// Creates a laser bank with a full first magazine.
    ///
    /// `magazine_size` must be non-zero. Configuration is validated before it
    /// reaches this point.
    pub fn new(ammo_total: u32, magazine_size: u32, muzzle_speed: f32, texture_key: impl Into<String>) -> Self {
        Self {
            ammo_total,
            magazine_size,
            magazine_limit: ammo_total.div_ceil(magazine_size) as i32 - 1,
            current_magazine_ammo: magazine_size as i32,
            muzzle_speed,
            texture_key: texture_key.into(),
        }
    }

    pub fn from_config(config: &WeaponConfig) -> Self {
        Self::new(
            config.laser_ammo,
            config.magazine_size,
            config.muzzle_speed,
            config.laser_texture.clone(),
        )
    }

    pub fn ammo_total(&self) -> u32 {
        self.ammo_total
    }

    pub fn magazine_size(&self) -> u32 {
        self.magazine_size
    }

    /// Full reloads left once the loaded magazine is spent.
    pub fn magazine_limit(&self) -> i32 {
        self.magazine_limit
    }

    pub fn current_magazine_ammo(&self) -> i32 {
        self.current_magazine_ammo
    }

    pub fn readout(&self) -> String {
        laser_readout(self.current_magazine_ammo, self.magazine_limit)
    }

    /// Fires one laser if any ammunition is left and the pool has a free slot.
    pub fn fire(
        &mut self,
        firer: &impl FiringPosition,
        slots: &mut impl ProjectileSlots,
        display: &mut impl AmmoDisplay,
    ) -> FireResult {
        if self.ammo_total == 0 {
            return FireResult::Denied;
        }

        let position = firer.position();
        let Some(slot) = slots.acquire(position, &self.texture_key) else {
            return FireResult::Denied;
        };

        self.current_magazine_ammo -= 1;
        self.ammo_total -= 1;
        display.set_text(&self.readout());

        FireResult::Spawned {
            slot,
            kinematics: Kinematics::launch(position, firer.rotation(), self.muzzle_speed),
            scale: 1.0,
            texture_key: self.texture_key.clone(),
        }
    }

    /// Refills the magazine from the reserve.
    ///
    /// With at least a full magazine left the magazine is reset and every
    /// laser in flight is cleared, keeping its slot. Otherwise the pool is
    /// capped to the rounds remaining and the counters stay as they are.
    pub fn reload(
        &mut self,
        slots: &mut impl ProjectileSlots,
        display: &mut impl AmmoDisplay,
    ) -> ReloadOutcome {
        if self.ammo_total >= self.magazine_size {
            self.magazine_limit =
                (self.ammo_total - self.magazine_size).div_ceil(self.magazine_size) as i32;
            self.current_magazine_ammo = self.magazine_size as i32;
            display.set_text(&self.readout());
            slots.clear_all(false);
            ReloadOutcome::Reloaded {
                magazine_limit: self.magazine_limit,
            }
        } else {
            slots.set_active_limit(self.ammo_total as usize);
            ReloadOutcome::Capped {
                max_active: self.ammo_total,
            }
        }
    }
}

/// Secondary weapon: a finite pool of heavy meteor shots. Never reloads.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MeteorBattery {
    ammo_pool: u32,
    muzzle_speed: f32,
    projectile_scale: f32,
    texture_key: String,
    indicator_prefix: String,
}

impl MeteorBattery {
    pub fn new(
        ammo_pool: u32,
        muzzle_speed: f32,
        projectile_scale: f32,
        texture_key: impl Into<String>,
        indicator_prefix: impl Into<String>,
    ) -> Self {
        Self {
            ammo_pool,
            muzzle_speed,
            projectile_scale,
            texture_key: texture_key.into(),
            indicator_prefix: indicator_prefix.into(),
        }
    }

    pub fn from_config(config: &WeaponConfig) -> Self {
        Self::new(
            config.meteor_ammo,
            config.muzzle_speed,
            config.meteor_scale,
            config.meteor_texture.clone(),
            config.meteor_indicator_prefix.clone(),
        )
    }

    pub fn ammo_pool(&self) -> u32 {
        self.ammo_pool
    }

    pub fn is_empty(&self) -> bool {
        self.ammo_pool == 0
    }

    /// Texture key of the indicator for the current pool level.
    pub fn indicator_key(&self) -> String {
        meteor_indicator_key(&self.indicator_prefix, self.ammo_pool)
    }

    pub fn fire(
        &mut self,
        firer: &impl FiringPosition,
        slots: &mut impl ProjectileSlots,
        display: &mut impl AmmoDisplay,
    ) -> FireResult {
        if self.ammo_pool == 0 {
            return FireResult::Denied;
        }

        let position = firer.position();
        let Some(slot) = slots.acquire(position, &self.texture_key) else {
            return FireResult::Denied;
        };

        self.ammo_pool -= 1;
        display.set_texture(&self.indicator_key());

        FireResult::Spawned {
            slot,
            kinematics: Kinematics::launch(position, firer.rotation(), self.muzzle_speed),
            scale: self.projectile_scale,
            texture_key: self.texture_key.clone(),
        }
    }
}
