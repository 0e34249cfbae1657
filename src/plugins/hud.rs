use bevy::prelude::*;

use crate::plugins::core::GameState;
use crate::systems::{apply_ammo_readouts, spawn_hud, spawn_player_ship, weapon_command_system};

/// Ammo indicators for the local pilot.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Arena), spawn_hud.after(spawn_player_ship))
            .add_systems(
                Update,
                apply_ammo_readouts
                    .after(weapon_command_system)
                    .run_if(in_state(GameState::Arena)),
            );
    }
}
