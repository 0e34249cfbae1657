use bevy::prelude::*;

use crate::components::{Player, Ship};
use crate::resources::{ArenaAssets, ArenaConfig, CliArgs, PilotProfile};
use crate::systems::despawn_arena;

#[derive(States, Default, Clone, Eq, PartialEq, Debug, Hash)]
pub enum GameState {
    #[default]
    Lobby,
    Arena,
}

/// Loads configuration, owns the game state and the camera.
///
/// Must be added after `DefaultPlugins`: the asset server has to exist when
/// the arena textures are requested.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let cli = CliArgs::parse();
        let config = ArenaConfig::load(cli.config.as_deref());
        let pilot = PilotProfile::from_cli(&cli);

        app.insert_resource(config)
            .insert_resource(pilot)
            .insert_resource(cli)
            .init_resource::<ArenaAssets>()
            .init_state::<GameState>()
            .add_systems(Startup, (spawn_camera, skip_lobby_when_named))
            .add_systems(OnExit(GameState::Arena), despawn_arena)
            .add_systems(Update, (
                log_state_transitions,
                camera_follow.run_if(in_state(GameState::Arena)),
            ));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 100.0),
    ));
}

fn camera_follow(
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
    player_query: Query<&Transform, (With<Player>, With<Ship>)>,
) {
    if let (Ok(mut camera_transform), Ok(player_transform)) = (camera_query.get_single_mut(), player_query.get_single()) {
        let player_pos = player_transform.translation;
        camera_transform.translation.x = player_pos.x;
        camera_transform.translation.y = player_pos.y;
    }
}

/// A pilot named on the command line goes straight into the arena.
fn skip_lobby_when_named(cli: Res<CliArgs>, mut next_state: ResMut<NextState<GameState>>) {
    if cli.name.is_some() {
        next_state.set(GameState::Arena);
    }
}

fn log_state_transitions(state: Res<State<GameState>>) {
    if state.is_changed() {
        info!("Current State: {:?}", state.get());
    }
}
