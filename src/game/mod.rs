// Game logic for the box-chase arena
//
// A player box chases a teleporting enemy box for points while a second
// enemy drifts down from the top of the arena. Touching the enemy scores;
// five points completes the level; letting the second enemy reach the
// center wall loses the game.

pub mod arena;
pub mod control;
pub mod entities;
pub mod movement;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use arena::Arena;
pub use control::Direction;
pub use session::{GameSession, SessionEvent};
