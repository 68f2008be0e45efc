// Per-frame step: physics, collision dispatch, then the standing fall rule

use glam::Vec2;
use rand::Rng;

use crate::engine::physics::PhysicsWorld;

use super::arena::FALL_SPEED;
use super::entities::GameEntities;
use super::rules::CollisionResolver;
use super::session::SessionState;

/// Advance the simulation by one frame.
///
/// Order matters: the physics step runs first, its contact pairs are
/// dispatched to the resolver, and only then is the fall rule applied, so
/// an upward deflection the resolver set this step survives the frame.
pub fn step_frame(
    world: &mut PhysicsWorld,
    entities: &mut GameEntities,
    resolver: Option<&CollisionResolver>,
    state: &mut SessionState,
    rng: &mut impl Rng,
    delta_ms: f32,
) {
    world.step(delta_ms);

    let pairs = world.drain_contact_starts();
    if let Some(resolver) = resolver {
        resolver.resolve(&pairs, world, entities, state, rng);
    }

    apply_fall_rule(world, entities);
}

/// Keep the falling enemy drifting down.
///
/// World gravity is disabled, so the drift is a standing velocity rule:
/// whenever the falling enemy is not actively moving upward from a recent
/// deflection, its velocity is forced back to straight down.
fn apply_fall_rule(world: &mut PhysicsWorld, entities: &GameEntities) {
    let enemy2 = entities.enemy2.body;
    let Some(velocity) = world.velocity(enemy2) else {
        log::debug!("fall rule skipped: falling enemy missing from world");
        return;
    };
    if velocity.y >= 0.0 {
        world.set_velocity(enemy2, Vec2::new(0.0, FALL_SPEED));
    }
}
