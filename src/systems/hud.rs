use bevy::prelude::*;

use crate::components::{
    ArenaEntity, AmmoDisplay, LaserBank, MeteorBattery, Player, WeaponKind,
};
use crate::events::{AmmoReadout, AmmoReadoutChanged};
use crate::resources::ArenaAssets;

/// Marker for the laser magazine text in the bottom-right corner.
#[derive(Component, Debug, Default)]
pub struct LaserAmmoText;

/// Marker for the meteor ammo-level image.
#[derive(Component, Debug, Default)]
pub struct MeteorAmmoIndicator;

/// [`AmmoDisplay`] that turns indicator updates into [`AmmoReadoutChanged`]
/// events for one ship's weapon.
pub struct HudSignals<'a, 'w> {
    pub ship: Entity,
    pub weapon: WeaponKind,
    pub writer: &'a mut EventWriter<'w, AmmoReadoutChanged>,
}

impl AmmoDisplay for HudSignals<'_, '_> {
    fn set_text(&mut self, text: &str) {
        self.writer.send(AmmoReadoutChanged {
            ship: self.ship,
            weapon: self.weapon,
            readout: AmmoReadout::Text(text.to_string()),
        });
    }

    fn set_texture(&mut self, key: &str) {
        self.writer.send(AmmoReadoutChanged {
            ship: self.ship,
            weapon: self.weapon,
            readout: AmmoReadout::Texture(key.to_string()),
        });
    }
}

/// Spawns the two ammo indicators, seeded from the local player's weapons.
/// Must run after the player's ship exists.
pub fn spawn_hud(
    mut commands: Commands,
    assets: Res<ArenaAssets>,
    player: Query<(&LaserBank, &MeteorBattery), With<Player>>,
) {
    let Ok((lasers, meteors)) = player.get_single() else {
        warn!("No player ship to show ammunition for");
        return;
    };

    commands.spawn((
        Name::new("Laser Ammo"),
        LaserAmmoText,
        ArenaEntity,
        Text::new(lasers.readout()),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(88.0),
            bottom: Val::Px(28.0),
            ..default()
        },
    ));

    commands.spawn((
        Name::new("Meteor Ammo"),
        MeteorAmmoIndicator,
        ArenaEntity,
        ImageNode::new(assets.texture(&meteors.indicator_key())),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            bottom: Val::Px(16.0),
            width: Val::Px(56.0),
            height: Val::Px(56.0),
            ..default()
        },
    ));
}

/// Applies readout changes of the local player's ship to the HUD.
pub fn apply_ammo_readouts(
    mut readouts: EventReader<AmmoReadoutChanged>,
    players: Query<(), With<Player>>,
    mut laser_text: Query<&mut Text, With<LaserAmmoText>>,
    mut meteor_indicator: Query<&mut ImageNode, With<MeteorAmmoIndicator>>,
    assets: Res<ArenaAssets>,
) {
    for change in readouts.read() {
        if !players.contains(change.ship) {
            continue;
        }

        match &change.readout {
            AmmoReadout::Text(text) => {
                for mut laser in &mut laser_text {
                    laser.0.clone_from(text);
                }
            }
            AmmoReadout::Texture(key) => {
                for mut indicator in &mut meteor_indicator {
                    indicator.image = assets.texture(key);
                }
            }
        }
    }
}
