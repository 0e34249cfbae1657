use bevy::prelude::*;

use crate::components::WeaponKind;

/// What a pilot asked their weapons to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponAction {
    FireLaser,
    FireMeteor,
    Reload,
}

/// Event emitted once per weapon key press.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponCommand {
    /// The ship whose weapons should act.
    pub ship: Entity,
    pub action: WeaponAction,
}

/// New contents for one of the ammo indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmmoReadout {
    /// Laser magazine text, e.g. `"11|4"`.
    Text(String),
    /// Meteor indicator texture key, e.g. `"ammo_9"`.
    Texture(String),
}

/// Event emitted whenever a fire or reload changes what the HUD should show.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AmmoReadoutChanged {
    pub ship: Entity,
    pub weapon: WeaponKind,
    pub readout: AmmoReadout,
}
