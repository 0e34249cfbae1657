pub mod ship;
pub mod combat;
pub mod weapon;
pub mod projectile_pool;

pub use ship::*;
pub use combat::*;
pub use weapon::*;
pub use projectile_pool::*;
