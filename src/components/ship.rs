use bevy::prelude::*;

/// Marker component that identifies an entity as a ship.
#[derive(Component, Debug, Default)]
pub struct Ship;

/// Marker component that identifies the locally controlled ship.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Name and colour the ship was launched with.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Pilot {
    pub name: String,
    pub colour: Color,
}

/// Text label that follows a ship around, drawn below it.
#[derive(Component, Debug, Clone, Copy)]
pub struct NameLabel {
    pub ship: Entity,
    /// Offset from the ship's centre, in world units.
    pub offset: Vec2,
}

/// Whether the ship's boost is engaged this frame.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Boost {
    pub active: bool,
}

/// Marker for everything that belongs to a running arena and is removed when
/// the pilot leaves it.
#[derive(Component, Debug, Default)]
pub struct ArenaEntity;
