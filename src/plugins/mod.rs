pub mod core;
pub mod input;
pub mod debug_ui;
pub mod physics;
pub mod combat;
pub mod hud;
pub mod lobby;
pub mod network;
