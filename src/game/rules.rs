// Collision rules: translating contact pairs into game-state transitions

use glam::Vec2;
use rand::Rng;

use crate::core::color::Color;
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle};

use super::arena::{Arena, BOUNCE_VELOCITY};
use super::entities::{BodyLabel, GameEntities};
use super::session::SessionState;

/// What a contact pair means for the game, with the relevant bodies oriented
enum Contact {
    /// Player touched the chaseable enemy: score, respawn, recolor
    Score {
        player: RigidBodyHandle,
        enemy: RigidBodyHandle,
    },
    /// Player hit a boundary or the center divider: stop dead
    Stop { player: RigidBodyHandle },
    /// Player touched the falling enemy: knock it back up
    Deflect { enemy2: RigidBodyHandle },
    /// The falling enemy reached the center divider: game lost
    Loss,
}

/// Classify an unordered label pair. Exactly one rule can match; labels are
/// mutually exclusive by construction.
fn classify(a: RigidBodyHandle, la: BodyLabel, b: RigidBodyHandle, lb: BodyLabel) -> Option<Contact> {
    use BodyLabel::*;
    match (la, lb) {
        (Player, Enemy) => Some(Contact::Score { player: a, enemy: b }),
        (Enemy, Player) => Some(Contact::Score { player: b, enemy: a }),
        (Player, Wall) | (Player, CenterWall) => Some(Contact::Stop { player: a }),
        (Wall, Player) | (CenterWall, Player) => Some(Contact::Stop { player: b }),
        (Player, Enemy2) => Some(Contact::Deflect { enemy2: b }),
        (Enemy2, Player) => Some(Contact::Deflect { enemy2: a }),
        (Enemy2, CenterWall) | (CenterWall, Enemy2) => Some(Contact::Loss),
        _ => None,
    }
}

/// Resolves the contact pairs a physics step produced into score, respawn,
/// recolor, win, and loss transitions.
///
/// One resolver is installed per session and removed when the session ends,
/// so a superseded session can never keep mutating state.
pub struct CollisionResolver {
    arena: Arena,
}

impl CollisionResolver {
    pub fn new(arena: Arena) -> Self {
        Self { arena }
    }

    /// Process one step's batch of contact pairs.
    ///
    /// Pairs are handled independently, in report order. If a loss fires
    /// anywhere in the batch it is re-asserted after all pairs are
    /// processed, so a win and a loss landing in the same step always
    /// resolve to the loss no matter which pair the engine reported first.
    pub fn resolve(
        &self,
        pairs: &[(RigidBodyHandle, RigidBodyHandle)],
        world: &mut PhysicsWorld,
        entities: &mut GameEntities,
        state: &mut SessionState,
        rng: &mut impl Rng,
    ) {
        let mut loss_in_batch = false;

        for &(a, b) in pairs {
            let (Some(la), Some(lb)) = (label_of(world, a), label_of(world, b)) else {
                continue;
            };
            log::trace!("contact: {} / {}", la.as_str(), lb.as_str());

            match classify(a, la, b, lb) {
                Some(Contact::Score { player, enemy }) => {
                    let score = state.add_point();
                    log::debug!("player caught enemy, score {score}");
                    world.set_velocity(player, Vec2::ZERO);
                    world.set_position(enemy, self.arena.random_upper_position(rng));
                    entities.player.color = Color::random(rng);
                }
                Some(Contact::Stop { player }) => {
                    world.set_velocity(player, Vec2::ZERO);
                    entities.player.color = Color::random(rng);
                }
                Some(Contact::Deflect { enemy2 }) => {
                    world.set_velocity(enemy2, Vec2::new(0.0, BOUNCE_VELOCITY));
                    entities.enemy2.color = Color::random(rng);
                }
                Some(Contact::Loss) => {
                    state.end(false);
                    loss_in_batch = true;
                }
                None => {}
            }
        }

        // Tie-break: a loss anywhere in the batch beats a win from the same
        // batch, independent of pair order.
        if loss_in_batch {
            state.end(false);
        }
    }
}

fn label_of(world: &PhysicsWorld, handle: RigidBodyHandle) -> Option<BodyLabel> {
    world.body_tag(handle).and_then(BodyLabel::from_tag)
}
