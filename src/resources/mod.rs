pub mod assets;
pub mod cli;
pub mod config;
pub mod network;
pub mod pilot;

pub use assets::*;
pub use cli::*;
pub use config::*;
pub use network::*;
pub use pilot::*;
