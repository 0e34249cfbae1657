use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use astro_arena::plugins::core::CorePlugin;
use astro_arena::plugins::input::InputPlugin;
use astro_arena::plugins::debug_ui::DebugUiPlugin;
use astro_arena::plugins::physics::PhysicsPlugin;
use astro_arena::plugins::combat::CombatPlugin;
use astro_arena::plugins::hud::HudPlugin;
use astro_arena::plugins::lobby::LobbyPlugin;
use astro_arena::plugins::network::NetworkPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .add_plugins(EguiPlugin)
        .add_plugins(CorePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(LobbyPlugin)
        .add_plugins(DebugUiPlugin)
        .add_plugins(PhysicsPlugin)
        .add_plugins(CombatPlugin)
        .add_plugins(HudPlugin)
        .add_plugins(NetworkPlugin)
        .run();
}
