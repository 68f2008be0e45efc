// Entity set and world construction

use glam::Vec2;
use rand::Rng;

use crate::core::color::Color;
use crate::engine::physics::{
    BodyBuilder, ColliderBuilder2D, ColliderHandle, PhysicsWorld, RigidBodyHandle,
};

use super::arena::{
    Arena, ENEMY2_HEIGHT, ENEMY2_WIDTH, ENEMY_SIZE, PLAYER_SIZE, WALL_THICKNESS,
};

/// Label identifying what kind of body was involved in a collision
///
/// The four boundary walls share one label; the center divider has its own
/// so the rules can tell a boundary bounce from a lost game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Player,
    Wall,
    CenterWall,
    Enemy,
    Enemy2,
}

impl BodyLabel {
    /// Display name of the label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Wall => "wall",
            Self::CenterWall => "centerWall",
            Self::Enemy => "enemy",
            Self::Enemy2 => "Enemy2",
        }
    }

    /// Tag stored on the body in the physics world
    pub(crate) fn tag(self) -> u64 {
        self as u64
    }

    pub(crate) fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            0 => Some(Self::Player),
            1 => Some(Self::Wall),
            2 => Some(Self::CenterWall),
            3 => Some(Self::Enemy),
            4 => Some(Self::Enemy2),
            _ => None,
        }
    }
}

/// A named game object: a physics body plus its presentation data
#[derive(Debug)]
pub struct Entity {
    /// Handle to the entity's rigid body in the physics world
    pub body: RigidBodyHandle,
    /// Handle to the entity's collider
    pub collider: ColliderHandle,
    /// Render size (width, height); the physics shape is fixed at creation
    pub size: Vec2,
    /// Current display color
    pub color: Color,
}

/// The full entity set for one session, keyed by name
///
/// Rebuilt wholesale on every start or restart; nothing here outlives a
/// session.
#[derive(Debug)]
pub struct GameEntities {
    pub player: Entity,
    pub enemy: Entity,
    pub enemy2: Entity,
    pub top_wall: Entity,
    pub bottom_wall: Entity,
    pub left_wall: Entity,
    pub right_wall: Entity,
    pub center_wall: Entity,
}

impl GameEntities {
    /// Iterate over every entity with its render name
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Entity)> {
        [
            ("player", &self.player),
            ("enemy", &self.enemy),
            ("enemy2", &self.enemy2),
            ("topWall", &self.top_wall),
            ("bottomWall", &self.bottom_wall),
            ("leftWall", &self.left_wall),
            ("rightWall", &self.right_wall),
            ("centerWall", &self.center_wall),
        ]
        .into_iter()
    }
}

/// Build a fresh physics world and entity set for a new session
///
/// Infallible given valid arena geometry: walls, player, and both enemies
/// are always created, each category added as a batch.
pub fn build_world(arena: &Arena, rng: &mut impl Rng) -> (PhysicsWorld, GameEntities) {
    let mut world = PhysicsWorld::new();

    let [top_wall, bottom_wall, left_wall, right_wall, center_wall] =
        spawn_walls(&mut world, arena);
    let player = spawn_player(&mut world, arena);
    let (enemy, enemy2) = spawn_enemies(&mut world, arena, rng);

    let entities = GameEntities {
        player: entity(player, Vec2::splat(PLAYER_SIZE), Color::RED),
        enemy: entity(enemy, Vec2::splat(ENEMY_SIZE), Color::GREEN),
        enemy2: entity(enemy2, Vec2::new(ENEMY2_WIDTH, ENEMY2_HEIGHT), Color::BLACK),
        top_wall: entity(top_wall, Vec2::new(arena.width, WALL_THICKNESS), Color::WALL),
        bottom_wall: entity(bottom_wall, Vec2::new(arena.width, WALL_THICKNESS), Color::WALL),
        left_wall: entity(left_wall, Vec2::new(WALL_THICKNESS, arena.height), Color::WALL),
        right_wall: entity(right_wall, Vec2::new(WALL_THICKNESS, arena.height), Color::WALL),
        center_wall: entity(
            center_wall,
            Vec2::new(arena.width, WALL_THICKNESS / 2.0),
            Color::WALL,
        ),
    };

    (world, entities)
}

fn entity(handles: (RigidBodyHandle, ColliderHandle), size: Vec2, color: Color) -> Entity {
    Entity {
        body: handles.0,
        collider: handles.1,
        size,
        color,
    }
}

fn spawn_static_box(
    world: &mut PhysicsWorld,
    label: BodyLabel,
    center: Vec2,
    size: Vec2,
) -> (RigidBodyHandle, ColliderHandle) {
    let body = BodyBuilder::new_fixed().position(center.x, center.y).build();
    let handle = world.add_rigid_body(body);
    let collider = world.add_collider(
        ColliderBuilder2D::box_shape(size.x / 2.0, size.y / 2.0).build(),
        handle,
    );
    world.set_body_tag(handle, label.tag());
    (handle, collider)
}

/// Create the four boundary walls and the center divider
fn spawn_walls(world: &mut PhysicsWorld, arena: &Arena) -> [(RigidBodyHandle, ColliderHandle); 5] {
    let (w, h) = (arena.width, arena.height);
    [
        spawn_static_box(
            world,
            BodyLabel::Wall,
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w, WALL_THICKNESS),
        ),
        spawn_static_box(
            world,
            BodyLabel::Wall,
            Vec2::new(w / 2.0, h),
            Vec2::new(w, WALL_THICKNESS),
        ),
        spawn_static_box(
            world,
            BodyLabel::Wall,
            Vec2::new(0.0, h / 2.0),
            Vec2::new(WALL_THICKNESS, h),
        ),
        spawn_static_box(
            world,
            BodyLabel::Wall,
            Vec2::new(w, h / 2.0),
            Vec2::new(WALL_THICKNESS, h),
        ),
        spawn_static_box(
            world,
            BodyLabel::CenterWall,
            Vec2::new(w / 2.0, h / 2.0),
            Vec2::new(w, WALL_THICKNESS / 2.0),
        ),
    ]
}

/// Create the player body: no friction, no velocity decay, no bounce, and
/// rotation locked, so it moves exactly as commanded
fn spawn_player(world: &mut PhysicsWorld, arena: &Arena) -> (RigidBodyHandle, ColliderHandle) {
    let body = BodyBuilder::new_dynamic()
        .position(arena.width / 2.0, arena.height / 4.0)
        .linear_damping(0.0)
        .lock_rotation()
        .can_sleep(false)
        .build();
    let handle = world.add_rigid_body(body);
    let collider = world.add_collider(
        ColliderBuilder2D::box_shape(PLAYER_SIZE / 2.0, PLAYER_SIZE / 2.0)
            .friction(0.0)
            .restitution(0.0)
            .build(),
        handle,
    );
    world.set_body_tag(handle, BodyLabel::Player.tag());
    (handle, collider)
}

/// Create both enemies: the chaseable enemy somewhere in the upper half,
/// the falling enemy at the very top at a random x
fn spawn_enemies(
    world: &mut PhysicsWorld,
    arena: &Arena,
    rng: &mut impl Rng,
) -> (
    (RigidBodyHandle, ColliderHandle),
    (RigidBodyHandle, ColliderHandle),
) {
    let spawn = arena.random_upper_position(rng);
    let body = BodyBuilder::new_dynamic()
        .position(spawn.x, spawn.y)
        .linear_damping(0.2)
        .lock_rotation()
        .can_sleep(false)
        .build();
    let enemy = world.add_rigid_body(body);
    let enemy_collider = world.add_collider(
        ColliderBuilder2D::box_shape(ENEMY_SIZE / 2.0, ENEMY_SIZE / 2.0)
            .friction(0.1)
            .restitution(0.2)
            .build(),
        enemy,
    );
    world.set_body_tag(enemy, BodyLabel::Enemy.tag());

    let drop_point = arena.random_upper_position(rng);
    let body = BodyBuilder::new_dynamic()
        .position(drop_point.x, 0.0)
        .lock_rotation()
        .can_sleep(false)
        .build();
    let enemy2 = world.add_rigid_body(body);
    let enemy2_collider = world.add_collider(
        ColliderBuilder2D::box_shape(ENEMY2_WIDTH / 2.0, ENEMY2_HEIGHT / 2.0).build(),
        enemy2,
    );
    world.set_body_tag(enemy2, BodyLabel::Enemy2.tag());

    ((enemy, enemy_collider), (enemy2, enemy2_collider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use rapier2d::prelude::RigidBodyType;

    fn build() -> (Arena, PhysicsWorld, GameEntities) {
        let arena = Arena::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let (world, entities) = build_world(&arena, &mut rng);
        (arena, world, entities)
    }

    #[test]
    fn test_entity_set_is_complete() {
        let (_, _, entities) = build();
        assert_eq!(entities.iter().count(), 8);
    }

    #[test]
    fn test_player_spawns_at_center_of_upper_half() {
        let (arena, world, entities) = build();
        let position = world.position(entities.player.body).unwrap();
        assert_eq!(position, Vec2::new(arena.width / 2.0, arena.height / 4.0));
    }

    #[test]
    fn test_player_contact_parameters() {
        let (_, world, entities) = build();
        let collider = world.get_collider(entities.player.collider).unwrap();
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(collider.restitution(), 0.0);

        let body = world.get_rigid_body(entities.player.body).unwrap();
        assert!(body.is_rotation_locked());
        assert_eq!(body.linear_damping(), 0.0);
    }

    #[test]
    fn test_enemy_contact_parameters() {
        let (_, world, entities) = build();
        let collider = world.get_collider(entities.enemy.collider).unwrap();
        assert_eq!(collider.friction(), 0.1);
        assert_eq!(collider.restitution(), 0.2);

        let body = world.get_rigid_body(entities.enemy.body).unwrap();
        assert_eq!(body.linear_damping(), 0.2);
    }

    #[test]
    fn test_enemy_spawns_in_upper_half() {
        let (arena, world, entities) = build();
        let position = world.position(entities.enemy.body).unwrap();
        assert!(position.x >= ENEMY_SIZE && position.x < arena.width - ENEMY_SIZE);
        assert!(position.y >= ENEMY_SIZE && position.y < arena.height / 2.0 - ENEMY_SIZE);
    }

    #[test]
    fn test_enemy2_drops_from_the_top() {
        let (arena, world, entities) = build();
        let position = world.position(entities.enemy2.body).unwrap();
        assert_eq!(position.y, 0.0);
        assert!(position.x >= ENEMY_SIZE && position.x < arena.width - ENEMY_SIZE);
    }

    #[test]
    fn test_walls_are_static() {
        let (_, world, entities) = build();
        for name in ["topWall", "bottomWall", "leftWall", "rightWall", "centerWall"] {
            let entity = entities
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, e)| e)
                .unwrap();
            let body = world.get_rigid_body(entity.body).unwrap();
            assert_eq!(body.body_type(), RigidBodyType::Fixed, "{name} must be static");
        }
    }

    #[test]
    fn test_body_labels_roundtrip() {
        let (_, world, entities) = build();
        let label = |e: &Entity| world.body_tag(e.body).and_then(BodyLabel::from_tag);
        assert_eq!(label(&entities.player), Some(BodyLabel::Player));
        assert_eq!(label(&entities.enemy), Some(BodyLabel::Enemy));
        assert_eq!(label(&entities.enemy2), Some(BodyLabel::Enemy2));
        assert_eq!(label(&entities.top_wall), Some(BodyLabel::Wall));
        assert_eq!(label(&entities.center_wall), Some(BodyLabel::CenterWall));
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(BodyLabel::Player.as_str(), "player");
        assert_eq!(BodyLabel::CenterWall.as_str(), "centerWall");
        assert_eq!(BodyLabel::Enemy2.as_str(), "Enemy2");
    }
}
