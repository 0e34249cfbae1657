pub mod ship;
pub mod movement;
pub mod combat;
pub mod hud;
pub mod network;

pub use ship::*;
pub use movement::*;
pub use combat::*;
pub use hud::*;
pub use network::*;
