use bevy::prelude::*;

use crate::components::{LaserBank, MeteorBattery, Projectile, ProjectilePools, SlotId, WeaponKind};
use crate::events::{AmmoReadoutChanged, WeaponCommand};
use crate::plugins::core::GameState;
use crate::systems::*;

/// Plugin that manages ship handling, weapons and projectiles.
///
/// Systems run only when in `GameState::Arena`.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        register_weapon_types(app);

        app.add_event::<WeaponCommand>()
            .add_event::<AmmoReadoutChanged>()
            .init_resource::<ShipInputBuffer>()
            .add_systems(
                Update,
                (
                    buffer_ship_input,
                    weapon_input_system,
                    weapon_command_system,
                    sync_projectile_slots,
                )
                    .chain()
                    .run_if(in_state(GameState::Arena)),
            )
            .add_systems(
                Update,
                (projectile_lifetime_system, update_name_labels).run_if(in_state(GameState::Arena)),
            )
            .add_systems(
                FixedUpdate,
                ship_physics_system.run_if(in_state(GameState::Arena)),
            );
    }
}

/// Registers weapon state with the type registry.
fn register_weapon_types(app: &mut App) {
    app.register_type::<WeaponKind>()
        .register_type::<SlotId>()
        .register_type::<Projectile>()
        .register_type::<LaserBank>()
        .register_type::<MeteorBattery>()
        .register_type::<ProjectilePools>();
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use bevy::ecs::reflect::ReflectComponent;

    use super::*;

    #[test]
    fn test_weapon_components_are_reflectable() {
        let mut app = App::new();
        register_weapon_types(&mut app);

        let registry = app.world().resource::<AppTypeRegistry>().read();
        for type_id in [
            TypeId::of::<LaserBank>(),
            TypeId::of::<MeteorBattery>(),
            TypeId::of::<ProjectilePools>(),
        ] {
            let registration = registry.get(type_id).unwrap();
            assert!(registration.data::<ReflectComponent>().is_some());
        }
        assert!(registry.get(TypeId::of::<SlotId>()).is_some());
    }
}
