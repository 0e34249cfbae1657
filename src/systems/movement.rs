use bevy::prelude::*;
use avian2d::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::{Boost, Player, Ship};
use crate::plugins::input::PlayerAction;
use crate::resources::ArenaConfig;

/// Buffered input state for physics systems running in FixedUpdate.
/// This captures input state each frame so FixedUpdate systems can access it reliably.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipInputBuffer {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub boost: bool,
}

/// System that captures input state for use by physics systems.
/// Runs in Update to catch all input events.
pub fn buffer_ship_input(
    action_query: Query<&ActionState<PlayerAction>, (With<Ship>, With<Player>)>,
    mut input_buffer: ResMut<ShipInputBuffer>,
) {
    if let Ok(action_state) = action_query.get_single() {
        input_buffer.thrust = action_state.pressed(&PlayerAction::Thrust);
        input_buffer.turn_left = action_state.pressed(&PlayerAction::TurnLeft);
        input_buffer.turn_right = action_state.pressed(&PlayerAction::TurnRight);
        input_buffer.boost = action_state.pressed(&PlayerAction::Boost);
    }
}

/// Physics-based ship movement.
///
/// **Force Model:**
/// ```text
/// F_thrust = thrust * forward * (boost_multiplier if boosting else 1)
/// F_drag   = -linear_damping * velocity (handled by Avian)
/// |v|      <= max_speed (MaxLinearSpeed)
/// ```
/// Turning sets the angular velocity directly so the ship answers the stick
/// immediately; angular damping brings it to rest once released.
pub fn ship_physics_system(
    input_buffer: Res<ShipInputBuffer>,
    config: Res<ArenaConfig>,
    mut ship_query: Query<
        (&Transform, &mut Boost, &mut ExternalForce, &mut AngularVelocity),
        (With<Ship>, With<Player>),
    >,
) {
    for (transform, mut boost, mut force, mut ang_vel) in &mut ship_query {
        boost.active = input_buffer.boost;

        let forward = (transform.rotation * Vec3::X).truncate();
        let thrust = thrust_magnitude(&input_buffer, config.ship.thrust, config.ship.boost_multiplier);
        *force = ExternalForce::new(forward * thrust).with_persistence(false);

        if let Some(direction) = turn_direction(&input_buffer) {
            ang_vel.0 = direction * config.ship.turn_rate;
        }
    }
}

/// Thrust force for the buffered input.
pub fn thrust_magnitude(input: &ShipInputBuffer, thrust: f32, boost_multiplier: f32) -> f32 {
    match (input.thrust, input.boost) {
        (false, _) => 0.0,
        (true, false) => thrust,
        (true, true) => thrust * boost_multiplier,
    }
}

/// +1 for counter-clockwise, -1 for clockwise, `None` when no turn key
/// (or both) is held.
pub fn turn_direction(input: &ShipInputBuffer) -> Option<f32> {
    match (input.turn_left, input.turn_right) {
        (true, false) => Some(1.0),
        (false, true) => Some(-1.0),
        _ => None,
    }
}
