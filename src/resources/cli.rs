use std::path::PathBuf;

use bevy::prelude::*;

/// Command-line arguments parsed at startup.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// Arena config file to use instead of the one in the config directory.
    /// Usage: `cargo run -- --config arena.json`
    pub config: Option<PathBuf>,

    /// Pilot name. When given, the lobby is skipped.
    /// Usage: `cargo run -- --name Maverick`
    pub name: Option<String>,

    /// Pilot colour as a hex string.
    /// Usage: `cargo run -- --colour "#ff8800"`
    pub colour: Option<String>,
}

impl CliArgs {
    /// Parse the process arguments.
    pub fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse arguments (without the program name).
    /// Supports:
    /// - `--config <path>`: Load arena config from this file
    /// - `--name <pilot>`: Launch straight into the arena as this pilot
    /// - `--colour <hex>` (or `--color`): Pilot colour
    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Self {
        let args: Vec<String> = args.into_iter().collect();
        let mut cli = CliArgs::default();

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--config" => {
                    if let Some(path) = value {
                        info!("CLI: Using arena config '{}'", path);
                        cli.config = Some(PathBuf::from(path));
                        i += 2;
                    } else {
                        warn!("CLI: --config requires a file path argument");
                        i += 1;
                    }
                }
                "--name" => {
                    if let Some(name) = value {
                        cli.name = Some(name);
                        i += 2;
                    } else {
                        warn!("CLI: --name requires a pilot name argument");
                        i += 1;
                    }
                }
                "--colour" | "--color" => {
                    if let Some(colour) = value {
                        cli.colour = Some(colour);
                        i += 2;
                    } else {
                        warn!("CLI: --colour requires a hex colour argument");
                        i += 1;
                    }
                }
                arg => {
                    if arg.starts_with('-') {
                        warn!("CLI: Unknown argument '{}'", arg);
                    }
                    i += 1;
                }
            }
        }

        cli
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = CliArgs::parse_from(args(&["--config", "arena.json", "--name", "Ace", "--color", "#00ff00"]));
        assert_eq!(cli.config, Some(PathBuf::from("arena.json")));
        assert_eq!(cli.name.as_deref(), Some("Ace"));
        assert_eq!(cli.colour.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_missing_value_is_ignored() {
        let cli = CliArgs::parse_from(args(&["--name"]));
        assert_eq!(cli, CliArgs::default());
    }

    #[test]
    fn test_unknown_flags_are_skipped() {
        let cli = CliArgs::parse_from(args(&["--fullscreen", "--name", "Ace"]));
        assert_eq!(cli.name.as_deref(), Some("Ace"));
    }
}
