//! Astro Arena: ships, lasers and meteors in a shared 2D arena.
//!
//! The ammunition rules live in [`components::weapon`] and run without an
//! engine loop; everything else wires them into Bevy.

pub mod components;
pub mod events;
pub mod plugins;
pub mod resources;
pub mod systems;
