use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy_egui::{egui, EguiContexts};

use crate::components::{LaserBank, MeteorBattery, Player, ProjectilePools};
use crate::plugins::core::GameState;
use crate::resources::PeerOutbox;

pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }

        app.add_systems(Update, debug_panel.run_if(in_state(GameState::Arena)));
    }
}

fn debug_panel(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<GameState>>,
    diagnostics: Res<DiagnosticsStore>,
    weapons: Query<(&LaserBank, &MeteorBattery, &ProjectilePools), With<Player>>,
    outbox: Res<PeerOutbox>,
) {
    egui::Window::new("Debug Panel").show(contexts.ctx_mut(), |ui| {
        if let Some(fps) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|diag| diag.smoothed())
        {
            ui.label(format!("FPS: {:.1}", fps));
        }

        ui.separator();
        ui.heading("Weapons");

        if let Ok((lasers, meteors, pools)) = weapons.get_single() {
            ui.label(format!(
                "Laser: {} (magazine {} / {}, {} rounds total)",
                lasers.readout(),
                lasers.current_magazine_ammo(),
                lasers.magazine_size(),
                lasers.ammo_total()
            ));
            ui.label(format!(
                "Lasers in flight: {} / {} ({} slots)",
                pools.lasers.active_count(),
                pools.lasers.max_active(),
                pools.lasers.len()
            ));
            ui.label(format!("Meteors: {} ({})", meteors.ammo_pool(), meteors.indicator_key()));
            ui.label(format!(
                "Meteors in flight: {} / {}",
                pools.meteors.active_count(),
                pools.meteors.max_active()
            ));
        } else {
            ui.label("No ship");
        }

        ui.label(format!("Peer events sent: {}", outbox.emitted));

        ui.separator();
        if ui.button("Leave Arena").clicked() {
            next_state.set(GameState::Lobby);
        }
    });
}
