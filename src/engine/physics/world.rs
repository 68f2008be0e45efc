use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::ContactQueue;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
///
/// Wraps the rapier pipeline behind the handful of operations the game
/// needs: add bodies, step by a frame delta, mutate velocity/position by
/// command, and drain the contact pairs a step produced.
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Contact-start event collector
    contact_queue: ContactQueue,

    /// User data mapping from body handles to game tags
    body_tags: HashMap<RigidBodyHandle, u64>,
}

impl PhysicsWorld {
    /// Create a new physics world with gravity disabled
    ///
    /// Velocities in this game only change through explicit commands and
    /// contact resolution, never through world gravity.
    pub fn new() -> Self {
        Self::with_gravity(Vector::zeros())
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            contact_queue: ContactQueue::new(),
            body_tags: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by `delta_ms` milliseconds
    ///
    /// The timestep is whatever the frame loop measured; there is no fixed
    /// timestep. Contact-start pairs detected during the step are collected
    /// and stay available from [`drain_contact_starts`](Self::drain_contact_starts)
    /// until the next step.
    pub fn step(&mut self, delta_ms: f32) {
        self.integration_parameters.dt = delta_ms.max(0.0) / 1000.0;

        // Clear previous frame's contact events
        self.contact_queue.clear();

        // Step the physics simulation
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.contact_queue,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Associate a game tag with a rigid body
    pub fn set_body_tag(&mut self, body_handle: RigidBodyHandle, tag: u64) {
        self.body_tags.insert(body_handle, tag);
    }

    /// Get the game tag associated with a rigid body
    pub fn body_tag(&self, body_handle: RigidBodyHandle) -> Option<u64> {
        self.body_tags.get(&body_handle).copied()
    }

    /// Get a body's linear velocity
    pub fn velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
    }

    /// Set a body's linear velocity, waking it
    ///
    /// Silently ignores handles that no longer resolve to a body.
    pub fn set_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => body.set_linvel(vector![velocity.x, velocity.y], true),
            None => log::debug!("set_velocity ignored: unknown body handle {:?}", handle),
        }
    }

    /// Get a body's position (center of mass frame translation)
    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Teleport a body to a new position, waking it
    ///
    /// Silently ignores handles that no longer resolve to a body.
    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => body.set_translation(vector![position.x, position.y], true),
            None => log::debug!("set_position ignored: unknown body handle {:?}", handle),
        }
    }

    /// Take the contact-start pairs collected during the last step, resolved
    /// to the parent rigid bodies of the touching colliders
    pub fn drain_contact_starts(&mut self) -> Vec<(RigidBodyHandle, RigidBodyHandle)> {
        self.contact_queue
            .drain()
            .into_iter()
            .filter_map(|contact| {
                let a = self.collider_set.get(contact.collider1)?.parent()?;
                let b = self.collider_set.get(contact.collider2)?.parent()?;
                Some((a, b))
            })
            .collect()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
