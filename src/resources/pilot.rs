use bevy::prelude::*;

use crate::resources::CliArgs;

/// Name and colour the local pilot launches with.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PilotProfile {
    pub name: String,
    pub colour: Color,
}

impl Default for PilotProfile {
    fn default() -> Self {
        Self {
            name: "Pilot".to_string(),
            colour: Color::WHITE,
        }
    }
}

impl PilotProfile {
    pub fn from_cli(cli: &CliArgs) -> Self {
        let mut profile = Self::default();
        if let Some(name) = &cli.name {
            profile.name = name.clone();
        }
        if let Some(hex) = &cli.colour {
            match parse_colour(hex) {
                Some(colour) => profile.colour = colour,
                None => warn!("CLI: '{}' is not a hex colour, using white", hex),
            }
        }
        profile
    }
}

/// Parses `#rrggbb`, `rrggbb` and the short `#rgb` forms.
pub fn parse_colour(hex: &str) -> Option<Color> {
    Srgba::hex(hex.trim()).ok().map(Color::Srgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colour() {
        assert_eq!(parse_colour("#ff0000"), Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(parse_colour("00ff00"), Some(Color::srgb(0.0, 1.0, 0.0)));
        assert_eq!(parse_colour("teal"), None);
    }

    #[test]
    fn test_profile_from_cli() {
        let cli = CliArgs {
            name: Some("Ace".to_string()),
            colour: Some("nope".to_string()),
            ..default()
        };
        let profile = PilotProfile::from_cli(&cli);
        assert_eq!(profile.name, "Ace");
        assert_eq!(profile.colour, Color::WHITE);
    }
}
