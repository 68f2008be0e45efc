// Arena geometry and gameplay constants

use glam::Vec2;
use rand::Rng;

/// Thickness of the boundary walls
pub const WALL_THICKNESS: f32 = 40.0;

/// Side length of the player box
pub const PLAYER_SIZE: f32 = 30.0;

/// Side length of the chaseable enemy box
pub const ENEMY_SIZE: f32 = 50.0;

/// Width of the falling enemy
pub const ENEMY2_WIDTH: f32 = 40.0;

/// Height of the falling enemy
pub const ENEMY2_HEIGHT: f32 = 80.0;

/// Player speed per axis for directional commands
pub const MOVE_SPEED: f32 = 3.0;

/// Standing downward drift applied to the falling enemy each frame
pub const FALL_SPEED: f32 = 1.0;

/// Upward velocity given to the falling enemy when the player deflects it
pub const BOUNCE_VELOCITY: f32 = -50.0;

/// Score needed to complete the level
pub const WIN_SCORE: u32 = 5;

/// Scale applied to raw drag deltas before moving the enemy
pub const DRAG_SCALE: f32 = 0.8;

/// Fraction of the scaled drag delta kept as residual velocity
pub const DRAG_DRIFT: f32 = 0.5;

/// Fixed arena dimensions for one session
///
/// The arena matches the device screen at startup and never changes while
/// a session is alive. The y axis points down: (0, 0) is the top-left
/// corner and the center wall sits at `height / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pick a random enemy spawn position in the upper half of the arena,
    /// inset by the enemy size so the box lands clear of the walls
    pub fn random_upper_position(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(ENEMY_SIZE..self.width - ENEMY_SIZE),
            rng.random_range(ENEMY_SIZE..self.height / 2.0 - ENEMY_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_upper_position_bounds() {
        let arena = Arena::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(1);

        for _ in 0..1000 {
            let position = arena.random_upper_position(&mut rng);
            assert!(position.x >= ENEMY_SIZE && position.x < arena.width - ENEMY_SIZE);
            assert!(position.y >= ENEMY_SIZE && position.y < arena.height / 2.0 - ENEMY_SIZE);
        }
    }

    #[test]
    fn test_random_upper_position_stays_in_upper_half() {
        let arena = Arena::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(2);

        for _ in 0..100 {
            let position = arena.random_upper_position(&mut rng);
            assert!(position.y < arena.height / 2.0);
        }
    }

    #[test]
    fn test_positions_vary() {
        let arena = Arena::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let first = arena.random_upper_position(&mut rng);
        let second = arena.random_upper_position(&mut rng);
        assert_ne!(first, second);
    }
}
