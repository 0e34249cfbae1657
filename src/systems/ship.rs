use bevy::prelude::*;
use avian2d::prelude::*;
use leafwing_input_manager::prelude::*;
use rand::Rng;

use crate::components::*;
use crate::plugins::input::get_default_input_map;
use crate::resources::{ArenaAssets, ArenaConfig, PilotProfile, SHIP_TEXTURE};

/// Spawns the local pilot's ship somewhere inside the arena, armed and with
/// its name label.
/// This function is designed to be called from an `OnEnter(GameState::Arena)` system.
pub fn spawn_player_ship(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    assets: Res<ArenaAssets>,
    pilot: Res<PilotProfile>,
) {
    let half = config.arena.half_extents() * 0.8;
    let mut rng = rand::thread_rng();
    let position = Vec2::new(rng.gen_range(-half.x..=half.x), rng.gen_range(-half.y..=half.y));

    let ship = spawn_ship(&mut commands, &config, &assets, &pilot, position);
    commands
        .entity(ship)
        .insert((Player, InputManagerBundle::with_map(get_default_input_map())));

    info!("Spawned {} at ({:.0}, {:.0})", pilot.name, position.x, position.y);
}

/// Spawns an armed ship and its name label. Returns the ship entity.
pub fn spawn_ship(
    commands: &mut Commands,
    config: &ArenaConfig,
    assets: &ArenaAssets,
    pilot: &PilotProfile,
    position: Vec2,
) -> Entity {
    let body = &config.ship;
    let weapons = &config.weapons;

    let ship = commands
        .spawn((
            Name::new(format!("Ship ({})", pilot.name)),
            // Marker components
            Ship,
            ArenaEntity,
            // Data components
            Pilot {
                name: pilot.name.clone(),
                colour: pilot.colour,
            },
            Boost::default(),
            LaserBank::from_config(weapons),
            MeteorBattery::from_config(weapons),
            ProjectilePools::from_config(weapons),
            // Visual components
            Sprite {
                image: assets.texture(SHIP_TEXTURE),
                custom_size: Some(Vec2::new(body.width, body.height)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
        ))
        .insert((
            // Physics components
            RigidBody::Dynamic,
            Collider::rectangle(body.width, body.height),
            Restitution::new(body.restitution).with_combine_rule(CoefficientCombine::Max),
            LinearVelocity(Vec2::ZERO),
            AngularVelocity(0.0),
            ExternalForce::default(),
            LinearDamping(body.linear_damping),
            AngularDamping(body.angular_damping),
            MaxLinearSpeed(body.max_speed),
        ))
        .id();

    let offset = Vec2::new(-body.name_offset[0], -body.name_offset[1]);
    commands.spawn((
        Name::new(format!("Name Label ({})", pilot.name)),
        ArenaEntity,
        NameLabel { ship, offset },
        Text2d::new(pilot.name.clone()),
        TextFont {
            font_size: body.name_font_size,
            ..default()
        },
        TextColor(pilot.colour),
        Transform::from_translation((position + offset).extend(2.0)),
    ));

    ship
}

/// Keeps every name label under its ship; drops labels of ships that are gone.
pub fn update_name_labels(
    mut commands: Commands,
    mut labels: Query<(Entity, &NameLabel, &mut Transform), Without<Ship>>,
    ships: Query<&Transform, With<Ship>>,
) {
    for (entity, label, mut transform) in &mut labels {
        match ships.get(label.ship) {
            Ok(ship_transform) => {
                let target = ship_transform.translation.truncate() + label.offset;
                transform.translation.x = target.x;
                transform.translation.y = target.y;
            }
            Err(_) => commands.entity(entity).despawn_recursive(),
        }
    }
}

/// Spawns the four static walls ships bounce off.
pub fn spawn_arena_walls(mut commands: Commands, config: Res<ArenaConfig>) {
    let half = config.arena.half_extents();
    let thickness = config.arena.wall_thickness;
    let walls = [
        (Vec2::new(0.0, half.y + thickness / 2.0), Vec2::new(config.arena.width + thickness * 2.0, thickness)),
        (Vec2::new(0.0, -half.y - thickness / 2.0), Vec2::new(config.arena.width + thickness * 2.0, thickness)),
        (Vec2::new(-half.x - thickness / 2.0, 0.0), Vec2::new(thickness, config.arena.height)),
        (Vec2::new(half.x + thickness / 2.0, 0.0), Vec2::new(thickness, config.arena.height)),
    ];

    for (centre, size) in walls {
        commands.spawn((
            Name::new("Arena Wall"),
            ArenaEntity,
            Transform::from_translation(centre.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Restitution::new(1.0),
        ));
    }
}

/// Removes everything spawned for the arena.
pub fn despawn_arena(mut commands: Commands, query: Query<Entity, With<ArenaEntity>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
