use bevy::prelude::*;
use avian2d::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::*;
use crate::events::{AmmoReadoutChanged, WeaponAction, WeaponCommand};
use crate::plugins::input::PlayerAction;
use crate::resources::{ArenaAssets, ArenaConfig, PeerEmitter, PeerEvent, PeerOutbox};
use crate::systems::hud::HudSignals;

/// Size of a laser sprite before scaling.
const PROJECTILE_SIZE: Vec2 = Vec2::new(8.0, 3.0);

/// Turns weapon key presses into [`WeaponCommand`] events.
/// One press fires one shot; holding the key does not repeat.
pub fn weapon_input_system(
    query: Query<(Entity, &ActionState<PlayerAction>), (With<Ship>, With<Player>)>,
    mut weapon_commands: EventWriter<WeaponCommand>,
) {
    for (ship, action_state) in &query {
        let pressed = [
            (PlayerAction::FireLaser, WeaponAction::FireLaser),
            (PlayerAction::FireMeteor, WeaponAction::FireMeteor),
            (PlayerAction::Reload, WeaponAction::Reload),
        ];
        for (input, action) in pressed {
            if action_state.just_pressed(&input) {
                weapon_commands.send(WeaponCommand { ship, action });
            }
        }
    }
}

/// Runs weapon commands against the ship's ammunition and spawns the
/// projectiles they allow.
///
/// Every spawned projectile is announced to the other pilots through the
/// [`PeerOutbox`].
pub fn weapon_command_system(
    mut commands: Commands,
    mut weapon_commands: EventReader<WeaponCommand>,
    mut ships: Query<(&Transform, &mut LaserBank, &mut MeteorBattery, &mut ProjectilePools), With<Ship>>,
    mut readouts: EventWriter<AmmoReadoutChanged>,
    mut outbox: ResMut<PeerOutbox>,
    assets: Res<ArenaAssets>,
    config: Res<ArenaConfig>,
) {
    for command in weapon_commands.read() {
        let Ok((transform, mut lasers, mut meteors, mut pools)) = ships.get_mut(command.ship) else {
            warn!("Weapon command for missing ship {:?}", command.ship);
            continue;
        };

        let (weapon, result) = match command.action {
            WeaponAction::FireLaser => {
                let mut display = HudSignals {
                    ship: command.ship,
                    weapon: WeaponKind::Laser,
                    writer: &mut readouts,
                };
                let result = lasers.fire(transform, &mut pools.lasers, &mut display);
                (WeaponKind::Laser, result)
            }
            WeaponAction::FireMeteor => {
                let mut display = HudSignals {
                    ship: command.ship,
                    weapon: WeaponKind::Meteor,
                    writer: &mut readouts,
                };
                let result = meteors.fire(transform, &mut pools.meteors, &mut display);
                (WeaponKind::Meteor, result)
            }
            WeaponAction::Reload => {
                let mut display = HudSignals {
                    ship: command.ship,
                    weapon: WeaponKind::Laser,
                    writer: &mut readouts,
                };
                let outcome = lasers.reload(&mut pools.lasers, &mut display);
                info!(
                    "Reload on {:?}: {:?} ({} rounds left)",
                    command.ship,
                    outcome,
                    lasers.ammo_total()
                );
                continue;
            }
        };

        let FireResult::Spawned { slot, kinematics, scale, texture_key } = result else {
            debug!("{:?} on {:?} denied", command.action, command.ship);
            continue;
        };

        spawn_projectile(
            &mut commands,
            &assets,
            &config,
            Projectile {
                owner: command.ship,
                weapon,
                slot,
            },
            &kinematics,
            scale,
            &texture_key,
        );
        outbox.emit(PeerEvent::shot(weapon, &kinematics));
        debug!("{} from {:?} at {:?}", weapon.event_name(), command.ship, kinematics.position);
    }
}

/// Spawns the physical projectile for a shot granted by a weapon.
pub fn spawn_projectile(
    commands: &mut Commands,
    assets: &ArenaAssets,
    config: &ArenaConfig,
    projectile: Projectile,
    kinematics: &Kinematics,
    scale: f32,
    texture_key: &str,
) -> Entity {
    let name = match projectile.weapon {
        WeaponKind::Laser => "Laser",
        WeaponKind::Meteor => "Meteor",
    };
    commands
        .spawn((
            Name::new(name),
            projectile,
            projectile_body(assets, config, kinematics, scale, texture_key),
        ))
        .id()
}

/// Sprite, transform and physics shared by local and remote projectiles.
pub fn projectile_body(
    assets: &ArenaAssets,
    config: &ArenaConfig,
    kinematics: &Kinematics,
    scale: f32,
    texture_key: &str,
) -> impl Bundle {
    (
        ArenaEntity,
        Sprite {
            image: assets.texture(texture_key),
            custom_size: Some(PROJECTILE_SIZE),
            ..default()
        },
        Transform::from_translation(kinematics.position.extend(0.5))
            .with_rotation(Quat::from_rotation_z(kinematics.rotation))
            .with_scale(Vec3::splat(scale)),
        RigidBody::Kinematic,
        Collider::circle(PROJECTILE_SIZE.y / 2.0),
        Sensor,
        LinearVelocity(kinematics.velocity),
        ProjectileLifetime::from_seconds(config.weapons.projectile_lifetime),
    )
}

/// Despawns projectiles whose slot was cleared or handed to a newer shot,
/// and projectiles whose ship is gone.
pub fn sync_projectile_slots(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile)>,
    ships: Query<&ProjectilePools>,
) {
    for (entity, projectile) in &projectiles {
        let live = ships
            .get(projectile.owner)
            .is_ok_and(|pools| pools.pool(projectile.weapon).is_live(projectile.slot));
        if !live {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Expires projectiles and gives their slot back to the owning ship.
pub fn projectile_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut ProjectileLifetime, Option<&Projectile>)>,
    mut ships: Query<&mut ProjectilePools>,
) {
    for (entity, mut lifetime, projectile) in &mut projectiles {
        if !lifetime.0.tick(time.delta()).finished() {
            continue;
        }
        if let Some(projectile) = projectile {
            if let Ok(mut pools) = ships.get_mut(projectile.owner) {
                pools.pool_mut(projectile.weapon).release(projectile.slot);
            }
        }
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AmmoReadout, AmmoReadoutChanged};

    fn combat_app() -> App {
        let mut app = App::new();
        app.add_event::<WeaponCommand>()
            .add_event::<AmmoReadoutChanged>()
            .insert_resource(ArenaAssets::empty())
            .insert_resource(ArenaConfig::default())
            .init_resource::<PeerOutbox>()
            .add_systems(Update, (weapon_command_system, sync_projectile_slots).chain());
        app
    }

    fn spawn_armed_ship(app: &mut App) -> Entity {
        let weapons = ArenaConfig::default().weapons;
        app.world_mut()
            .spawn((
                Ship,
                Player,
                Transform::from_xyz(10.0, 20.0, 1.0),
                LaserBank::from_config(&weapons),
                MeteorBattery::from_config(&weapons),
                ProjectilePools::from_config(&weapons),
            ))
            .id()
    }

    fn send(app: &mut App, ship: Entity, action: WeaponAction, times: usize) {
        for _ in 0..times {
            app.world_mut().send_event(WeaponCommand { ship, action });
        }
        app.update();
    }

    fn projectile_count(app: &mut App, weapon: WeaponKind) -> usize {
        let mut query = app.world_mut().query::<&Projectile>();
        query.iter(app.world()).filter(|p| p.weapon == weapon).count()
    }

    #[test]
    fn test_fire_laser_spawns_projectile_and_notifies_peers() {
        let mut app = combat_app();
        let ship = spawn_armed_ship(&mut app);

        send(&mut app, ship, WeaponAction::FireLaser, 1);

        assert_eq!(projectile_count(&mut app, WeaponKind::Laser), 1);
        assert_eq!(app.world().get::<LaserBank>(ship).unwrap().ammo_total(), 59);

        let outbox = app.world().resource::<PeerOutbox>();
        assert_eq!(outbox.pending().len(), 1);
        let event = &outbox.pending()[0];
        assert_eq!(event.weapon(), WeaponKind::Laser);
        assert_eq!(event.payload().x, 10.0);
        assert_eq!(event.payload().y, 20.0);
        assert_eq!(event.payload().velocity.x, 600.0);

        let mut projectiles = app.world_mut().query::<(&Projectile, &LinearVelocity)>();
        let (_, velocity) = projectiles.single(app.world());
        assert_eq!(velocity.0, Vec2::new(600.0, 0.0));
    }

    #[test]
    fn test_thirteenth_laser_is_denied_until_reload() {
        let mut app = combat_app();
        let ship = spawn_armed_ship(&mut app);

        send(&mut app, ship, WeaponAction::FireLaser, 13);
        assert_eq!(projectile_count(&mut app, WeaponKind::Laser), 12);
        assert_eq!(app.world().get::<LaserBank>(ship).unwrap().ammo_total(), 48);
        assert_eq!(app.world().resource::<PeerOutbox>().pending().len(), 12);

        send(&mut app, ship, WeaponAction::Reload, 1);
        // Slot sync runs after the reload in the same frame.
        assert_eq!(projectile_count(&mut app, WeaponKind::Laser), 0);
        let lasers = app.world().get::<LaserBank>(ship).unwrap();
        assert_eq!(lasers.current_magazine_ammo(), 12);
        assert_eq!(lasers.magazine_limit(), 3);

        send(&mut app, ship, WeaponAction::FireLaser, 1);
        assert_eq!(projectile_count(&mut app, WeaponKind::Laser), 1);
    }

    #[test]
    fn test_reload_emits_readout() {
        let mut app = combat_app();
        let ship = spawn_armed_ship(&mut app);

        send(&mut app, ship, WeaponAction::FireLaser, 2);
        send(&mut app, ship, WeaponAction::Reload, 1);

        let events = app.world().resource::<Events<AmmoReadoutChanged>>();
        let last = events.iter_current_update_events().last().unwrap();
        assert_eq!(last.ship, ship);
        assert_eq!(last.readout, AmmoReadout::Text("12|4".to_string()));
    }

    #[test]
    fn test_meteor_fires_until_pool_is_empty() {
        let mut app = combat_app();
        let ship = spawn_armed_ship(&mut app);

        send(&mut app, ship, WeaponAction::FireMeteor, 11);

        assert_eq!(projectile_count(&mut app, WeaponKind::Meteor), 10);
        assert_eq!(app.world().get::<MeteorBattery>(ship).unwrap().ammo_pool(), 0);
        let outbox = app.world().resource::<PeerOutbox>();
        assert!(outbox.pending().iter().all(|e| e.weapon() == WeaponKind::Meteor));
        assert_eq!(outbox.pending().len(), 10);

        let mut meteors = app.world_mut().query::<(&Projectile, &Transform)>();
        assert!(meteors.iter(app.world()).all(|(_, t)| t.scale == Vec3::splat(3.0)));
    }

    #[test]
    fn test_command_for_missing_ship_is_ignored() {
        let mut app = combat_app();
        let ghost = app.world_mut().spawn_empty().id();

        send(&mut app, ghost, WeaponAction::FireLaser, 1);

        assert_eq!(projectile_count(&mut app, WeaponKind::Laser), 0);
        assert!(app.world().resource::<PeerOutbox>().pending().is_empty());
    }

    #[test]
    fn test_expired_projectile_frees_its_slot() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, projectile_lifetime_system);
        let ship = app.world_mut().spawn(ProjectilePools::default()).id();
        let slot = app
            .world_mut()
            .get_mut::<ProjectilePools>(ship)
            .unwrap()
            .lasers
            .acquire(Vec2::ZERO, "laser")
            .unwrap();
        let mut lifetime = ProjectileLifetime::from_seconds(1.0);
        lifetime.0.tick(std::time::Duration::from_secs(2));
        let projectile = app
            .world_mut()
            .spawn((
                Projectile {
                    owner: ship,
                    weapon: WeaponKind::Laser,
                    slot,
                },
                lifetime,
            ))
            .id();

        app.update();

        assert!(!app.world().entities().contains(projectile));
        let pools = app.world().get::<ProjectilePools>(ship).unwrap();
        assert_eq!(pools.lasers.active_count(), 0);
        assert_eq!(pools.lasers.len(), 1);
    }
}
