// Session lifecycle: score, win/loss flags, and world ownership

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::core::color::Color;
use crate::engine::physics::PhysicsWorld;

use super::arena::{Arena, WIN_SCORE};
use super::control::{self, Direction};
use super::entities::{build_world, GameEntities};
use super::movement;
use super::rules::CollisionResolver;

/// A state change observers care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A game started (first start or restart)
    Started,
    /// The score changed to the carried value
    ScoreChanged(u32),
    /// The game ended; `won` distinguishes a completed level from a loss
    GameOver { won: bool },
}

/// Score and lifecycle flags for one play-through
///
/// All mutation funnels through the methods here, each of which records a
/// [`SessionEvent`] so observers see every transition in the order it
/// happened rather than polling for differences.
#[derive(Debug, Default)]
pub struct SessionState {
    score: u32,
    is_game_started: bool,
    is_game_over: bool,
    level_completed: bool,
    events: Vec<SessionEvent>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_started(&self) -> bool {
        self.is_game_started
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn level_completed(&self) -> bool {
        self.level_completed
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Mark a new game as running.
    ///
    /// The score carries over from a completed level but resets after a
    /// loss.
    pub(crate) fn begin(&mut self) {
        if self.is_game_over && !self.level_completed {
            self.score = 0;
            self.events.push(SessionEvent::ScoreChanged(0));
        }
        self.is_game_started = true;
        self.is_game_over = false;
        self.level_completed = false;
        self.events.push(SessionEvent::Started);
    }

    /// Add one point, completing the level in the same transition when the
    /// score reaches the winning threshold
    pub(crate) fn add_point(&mut self) -> u32 {
        self.score += 1;
        self.events.push(SessionEvent::ScoreChanged(self.score));
        if self.score >= WIN_SCORE {
            self.end(true);
        }
        self.score
    }

    /// End the game. Repeated calls with the same outcome are absorbed.
    pub(crate) fn end(&mut self, won: bool) {
        if self.is_game_over && self.level_completed == won {
            return;
        }
        self.is_game_over = true;
        self.level_completed = won;
        self.events.push(SessionEvent::GameOver { won });
    }
}

/// One renderable box: where to draw an entity and in what color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub name: &'static str,
    /// Top-left corner (body position minus half the size)
    pub top_left: Vec2,
    pub size: Vec2,
    pub color: Color,
}

/// Owns everything alive during play: the physics world, the entity set,
/// the collision resolver, the session RNG, and the score/flag state.
///
/// The world, entities, and resolver are replaced together on every start,
/// so nothing from a superseded session can touch the new one; removing
/// the resolver before installing the next is what makes re-registration
/// idempotent.
pub struct GameSession {
    arena: Arena,
    state: SessionState,
    world: PhysicsWorld,
    entities: Option<GameEntities>,
    resolver: Option<CollisionResolver>,
    rng: Pcg32,
}

impl GameSession {
    /// Create a session with an entropy-seeded RNG
    pub fn new(arena: Arena) -> Self {
        Self::with_seed(arena, rand::random())
    }

    /// Create a session with a fixed seed; spawn positions and colors are
    /// then fully reproducible
    pub fn with_seed(arena: Arena, seed: u64) -> Self {
        Self {
            arena,
            state: SessionState::new(),
            world: PhysicsWorld::new(),
            entities: None,
            resolver: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start a new game, tearing down whatever game came before.
    ///
    /// Works for the first start and for restarts from the game-over
    /// screen; score handling across restarts lives in
    /// [`SessionState::begin`].
    pub fn start_game(&mut self) {
        self.end_session();
        self.state.begin();

        let (world, entities) = build_world(&self.arena, &mut self.rng);
        self.world = world;
        self.entities = Some(entities);
        self.resolver = Some(CollisionResolver::new(self.arena));

        log::info!(
            "game started ({}x{} arena, score {})",
            self.arena.width,
            self.arena.height,
            self.state.score()
        );
    }

    /// Release the active collision resolver, if any
    fn end_session(&mut self) {
        if self.resolver.take().is_some() {
            log::debug!("collision resolver removed");
        }
    }

    /// Advance the game by one frame of `delta_ms` milliseconds
    ///
    /// Does nothing unless a game is running. When a frame ends the game,
    /// the resolver is released immediately so no further contacts can
    /// mutate the finished session.
    pub fn update(&mut self, delta_ms: f32) {
        if !self.state.is_game_started || self.state.is_game_over {
            return;
        }
        let Some(entities) = self.entities.as_mut() else {
            return;
        };

        movement::step_frame(
            &mut self.world,
            entities,
            self.resolver.as_ref(),
            &mut self.state,
            &mut self.rng,
            delta_ms,
        );

        if self.state.is_game_over {
            self.end_session();
        }
    }

    /// Send the player off in a fixed direction
    pub fn move_player(&mut self, direction: Direction) {
        control::move_player(&mut self.world, self.entities.as_ref(), direction);
    }

    /// Stop the player dead
    pub fn stop_player(&mut self) {
        control::stop_player(&mut self.world, self.entities.as_ref());
    }

    /// Feed one incremental drag-gesture delta to the chaseable enemy
    pub fn drag_enemy(&mut self, delta: Vec2) {
        control::drag_enemy(&mut self.world, self.entities.as_ref(), delta);
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn is_game_started(&self) -> bool {
        self.state.is_game_started()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn level_completed(&self) -> bool {
        self.state.level_completed()
    }

    /// Take the state-change events recorded since the last poll
    pub fn poll_events(&mut self) -> Vec<SessionEvent> {
        self.state.drain_events()
    }

    /// Snapshot every entity as a drawable box
    ///
    /// Empty until a game has been started.
    pub fn sprites(&self) -> Vec<Sprite> {
        let Some(entities) = self.entities.as_ref() else {
            return Vec::new();
        };
        entities
            .iter()
            .filter_map(|(name, entity)| {
                let position = self.world.position(entity.body)?;
                Some(Sprite {
                    name,
                    top_left: position - entity.size / 2.0,
                    size: entity.size,
                    color: entity.color,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::RigidBodyHandle;
    use crate::game::arena::{ENEMY_SIZE, PLAYER_SIZE};

    fn session() -> GameSession {
        GameSession::with_seed(Arena::new(400.0, 800.0), 99)
    }

    /// Feed a synthetic contact batch through the installed resolver, the
    /// same path a physics step takes.
    fn inject(session: &mut GameSession, pairs: &[(RigidBodyHandle, RigidBodyHandle)]) {
        let entities = session.entities.as_mut().expect("session not started");
        let resolver = session.resolver.as_ref().expect("no resolver installed");
        resolver.resolve(
            pairs,
            &mut session.world,
            entities,
            &mut session.state,
            &mut session.rng,
        );
    }

    fn player_enemy(session: &GameSession) -> (RigidBodyHandle, RigidBodyHandle) {
        let entities = session.entities.as_ref().unwrap();
        (entities.player.body, entities.enemy.body)
    }

    fn enemy2_center_wall(session: &GameSession) -> (RigidBodyHandle, RigidBodyHandle) {
        let entities = session.entities.as_ref().unwrap();
        (entities.enemy2.body, entities.center_wall.body)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert!(!session.is_game_started());
        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert!(session.sprites().is_empty());
    }

    #[test]
    fn test_start_game_builds_entities() {
        let mut session = session();
        session.start_game();
        assert!(session.is_game_started());
        assert_eq!(session.sprites().len(), 8);
        assert_eq!(session.poll_events(), vec![SessionEvent::Started]);
    }

    #[test]
    fn test_update_before_start_is_a_noop() {
        let mut session = session();
        session.update(16.0);
        assert!(!session.is_game_started());
    }

    #[test]
    fn test_commands_before_start_are_noops() {
        let mut session = session();
        session.move_player(Direction::Up);
        session.stop_player();
        session.drag_enemy(Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_five_catches_complete_the_level() {
        let mut session = session();
        session.start_game();
        let (player, enemy) = player_enemy(&session);

        let mut seen_positions = Vec::new();
        for expected in 1..=5 {
            inject(&mut session, &[(player, enemy)]);
            assert_eq!(session.score(), expected);
            assert_eq!(session.world.velocity(player), Some(Vec2::ZERO));

            let position = session.world.position(enemy).unwrap();
            assert!(position.x >= ENEMY_SIZE && position.x < 400.0 - ENEMY_SIZE);
            assert!(position.y >= ENEMY_SIZE && position.y < 400.0 - ENEMY_SIZE);
            assert!(!seen_positions.contains(&position));
            seen_positions.push(position);
        }

        assert!(session.is_game_over());
        assert!(session.level_completed());
    }

    #[test]
    fn test_loss_leaves_score_untouched() {
        let mut session = session();
        session.start_game();
        let loss = enemy2_center_wall(&session);
        inject(&mut session, &[loss]);

        assert!(session.is_game_over());
        assert!(!session.level_completed());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_restart_after_loss_resets_score() {
        let mut session = session();
        session.start_game();
        let catch = player_enemy(&session);
        let loss = enemy2_center_wall(&session);
        inject(&mut session, &[catch]);
        inject(&mut session, &[loss]);
        assert_eq!(session.score(), 1);
        assert!(session.is_game_over());

        session.start_game();
        assert_eq!(session.score(), 0);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_restart_after_win_preserves_score() {
        let mut session = session();
        session.start_game();
        let catch = player_enemy(&session);
        for _ in 0..5 {
            inject(&mut session, &[catch]);
        }
        assert!(session.level_completed());

        session.start_game();
        assert_eq!(session.score(), 5);
        assert!(!session.is_game_over());
        assert!(!session.level_completed());
    }

    #[test]
    fn test_repeated_starts_keep_one_resolver() {
        let mut session = session();
        session.start_game();
        session.start_game();
        session.start_game();

        let catch = player_enemy(&session);
        inject(&mut session, &[catch]);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_game_over_releases_resolver() {
        let mut session = session();
        session.start_game();

        // Force a loss through the real frame path: park the falling enemy
        // on the center wall and step.
        let (enemy2, center_wall) = enemy2_center_wall(&session);
        let wall_position = session.world.position(center_wall).unwrap();
        session.world.set_position(enemy2, wall_position);
        for _ in 0..3 {
            session.update(16.0);
            if session.is_game_over() {
                break;
            }
        }

        assert!(session.is_game_over());
        assert!(session.resolver.is_none());
    }

    #[test]
    fn test_event_stream_orders_transitions() {
        let mut session = session();
        session.start_game();
        session.poll_events();

        let catch = player_enemy(&session);
        for _ in 0..5 {
            inject(&mut session, &[catch]);
        }

        let events = session.poll_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::ScoreChanged(1),
                SessionEvent::ScoreChanged(2),
                SessionEvent::ScoreChanged(3),
                SessionEvent::ScoreChanged(4),
                SessionEvent::ScoreChanged(5),
                SessionEvent::GameOver { won: true },
            ]
        );
    }

    #[test]
    fn test_sprites_use_top_left_corners() {
        let mut session = session();
        session.start_game();

        let sprites = session.sprites();
        let player = sprites.iter().find(|s| s.name == "player").unwrap();
        assert_eq!(player.size, Vec2::splat(PLAYER_SIZE));
        // Body center is (width/2, height/4)
        assert_eq!(
            player.top_left,
            Vec2::new(200.0 - PLAYER_SIZE / 2.0, 200.0 - PLAYER_SIZE / 2.0)
        );
    }

    #[test]
    fn test_seeded_sessions_reproduce_spawns() {
        let mut a = GameSession::with_seed(Arena::new(400.0, 800.0), 7);
        let mut b = GameSession::with_seed(Arena::new(400.0, 800.0), 7);
        a.start_game();
        b.start_game();

        let enemy_a = a.entities.as_ref().unwrap().enemy.body;
        let enemy_b = b.entities.as_ref().unwrap().enemy.body;
        assert_eq!(a.world.position(enemy_a), b.world.position(enemy_b));
    }
}
