use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum PlayerAction {
    Thrust,
    TurnLeft,
    TurnRight,
    Boost,
    FireLaser,
    FireMeteor,
    Reload,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<PlayerAction>::default());
    }
}

pub fn get_default_input_map() -> InputMap<PlayerAction> {
    let mut input_map = InputMap::default();

    // Movement (Ship)
    input_map.insert(PlayerAction::Thrust, KeyCode::KeyW);
    input_map.insert(PlayerAction::Thrust, KeyCode::ArrowUp);
    input_map.insert(PlayerAction::TurnLeft, KeyCode::KeyA);
    input_map.insert(PlayerAction::TurnLeft, KeyCode::ArrowLeft);
    input_map.insert(PlayerAction::TurnRight, KeyCode::KeyD);
    input_map.insert(PlayerAction::TurnRight, KeyCode::ArrowRight);
    input_map.insert(PlayerAction::Boost, KeyCode::ShiftLeft);

    // Weapons
    input_map.insert(PlayerAction::FireLaser, KeyCode::KeyX);
    input_map.insert(PlayerAction::FireMeteor, KeyCode::KeyC);
    input_map.insert(PlayerAction::Reload, KeyCode::KeyR);

    input_map
}
