// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyBuilder, ColliderBuilder2D};
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};
