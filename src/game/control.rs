// Control surface: directional commands and drag gestures

use glam::Vec2;

use crate::core::math::clamp;
use crate::engine::physics::PhysicsWorld;

use super::arena::{DRAG_DRIFT, DRAG_SCALE, MOVE_SPEED};
use super::entities::GameEntities;

/// Discrete movement command for the player box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Velocity the command sets on the player
    pub fn velocity(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -MOVE_SPEED),
            Self::Down => Vec2::new(0.0, MOVE_SPEED),
            Self::Left => Vec2::new(-MOVE_SPEED, 0.0),
            Self::Right => Vec2::new(MOVE_SPEED, 0.0),
        }
    }
}

/// Set the player's velocity from a directional command
///
/// Commands arriving before a session has started are dropped; input must
/// never crash the frame loop.
pub fn move_player(world: &mut PhysicsWorld, entities: Option<&GameEntities>, direction: Direction) {
    let Some(entities) = entities else {
        log::debug!("move_player ignored: no active session");
        return;
    };
    world.set_velocity(entities.player.body, direction.velocity());
}

/// Stop the player dead
pub fn stop_player(world: &mut PhysicsWorld, entities: Option<&GameEntities>) {
    let Some(entities) = entities else {
        log::debug!("stop_player ignored: no active session");
        return;
    };
    world.set_velocity(entities.player.body, Vec2::ZERO);
}

/// Apply one incremental drag-gesture delta to the chaseable enemy
///
/// The enemy teleports to its current position plus the scaled delta,
/// clamped so its bounding box stays inside the right and bottom walls,
/// and keeps half the scaled delta as residual velocity so it drifts a
/// little when the drag ends.
pub fn drag_enemy(world: &mut PhysicsWorld, entities: Option<&GameEntities>, delta: Vec2) {
    let Some(entities) = entities else {
        log::debug!("drag_enemy ignored: no active session");
        return;
    };
    let enemy = entities.enemy.body;
    let (Some(position), Some(right_wall), Some(bottom_wall)) = (
        world.position(enemy),
        world.position(entities.right_wall.body),
        world.position(entities.bottom_wall.body),
    ) else {
        log::debug!("drag_enemy ignored: bodies missing from world");
        return;
    };

    let scaled = delta * DRAG_SCALE;
    let target = position + scaled;
    let half = entities.enemy.size / 2.0;

    let bounded = Vec2::new(
        clamp(target.x, half.x, right_wall.x - half.x),
        clamp(target.y, half.y, bottom_wall.y - half.y),
    );

    world.set_position(enemy, bounded);
    world.set_velocity(enemy, scaled * DRAG_DRIFT);
}
