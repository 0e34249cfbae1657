//! Lobby UI plugin.
//!
//! Lets the pilot pick a name and colour before launching into the arena.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::plugins::core::GameState;
use crate::resources::PilotProfile;

/// Plugin for the Lobby UI.
pub struct LobbyPlugin;

impl Plugin for LobbyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LobbyForm>()
            .add_systems(OnEnter(GameState::Lobby), reset_lobby_form)
            .add_systems(Update, lobby_ui_system.run_if(in_state(GameState::Lobby)));
    }
}

/// Values being edited in the lobby.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LobbyForm {
    pub name: String,
    pub colour: [f32; 3],
}

impl Default for LobbyForm {
    fn default() -> Self {
        Self::from_profile(&PilotProfile::default())
    }
}

impl LobbyForm {
    pub fn from_profile(profile: &PilotProfile) -> Self {
        let srgba = profile.colour.to_srgba();
        Self {
            name: profile.name.clone(),
            colour: [srgba.red, srgba.green, srgba.blue],
        }
    }

    /// The profile to launch with, or `None` while the name is blank.
    pub fn to_profile(&self) -> Option<PilotProfile> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let [red, green, blue] = self.colour;
        Some(PilotProfile {
            name: name.to_string(),
            colour: Color::srgb(red, green, blue),
        })
    }
}

fn reset_lobby_form(mut commands: Commands, profile: Res<PilotProfile>) {
    commands.insert_resource(LobbyForm::from_profile(&profile));
}

/// Renders the lobby with name and colour selection.
fn lobby_ui_system(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<GameState>>,
    mut form: ResMut<LobbyForm>,
    mut profile: ResMut<PilotProfile>,
) {
    egui::CentralPanel::default().show(contexts.ctx_mut(), |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(egui::RichText::new("ASTRO ARENA").size(48.0).strong());
            ui.add_space(40.0);

            ui.horizontal(|ui| {
                ui.label("Pilot name");
                ui.text_edit_singleline(&mut form.name);
            });
            ui.horizontal(|ui| {
                ui.label("Colour");
                ui.color_edit_button_rgb(&mut form.colour);
            });

            ui.add_space(20.0);
            let launch = form.to_profile();
            let clicked = ui
                .add_enabled(launch.is_some(), egui::Button::new(egui::RichText::new("Launch").size(24.0)))
                .clicked();
            if let (true, Some(launch)) = (clicked, launch) {
                info!("Launching as {}", launch.name);
                *profile = launch;
                next_state.set(GameState::Arena);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_cannot_launch() {
        let form = LobbyForm {
            name: "   ".to_string(),
            colour: [1.0, 1.0, 1.0],
        };
        assert_eq!(form.to_profile(), None);
    }

    #[test]
    fn test_form_round_trips_profile() {
        let profile = PilotProfile {
            name: "Ace".to_string(),
            colour: Color::srgb(1.0, 0.0, 0.5),
        };
        assert_eq!(LobbyForm::from_profile(&profile).to_profile(), Some(profile));
    }
}
