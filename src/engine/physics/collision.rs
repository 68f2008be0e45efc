use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// A pair of colliders that started touching during a physics step
#[derive(Debug, Clone, Copy)]
pub struct CollisionStart {
    pub collider1: ColliderHandle,
    pub collider2: ColliderHandle,
}

/// Queue for collecting contact-start events during a physics step
///
/// Only contact starts matter to the game rules; stop events are ignored.
pub struct ContactQueue {
    events: Arc<Mutex<Vec<CollisionStart>>>,
}

impl ContactQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(8))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Take all contact starts collected during the last step
    pub fn drain(&self) -> Vec<CollisionStart> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionStart) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for ContactQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for ContactQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) = event {
            self.push(CollisionStart {
                collider1: h1,
                collider2: h2,
            });
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Force events are not used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collider_handle() -> (ColliderSet, ColliderHandle) {
        let mut colliders = ColliderSet::new();
        let handle = colliders.insert(ColliderBuilder::cuboid(1.0, 1.0).build());
        (colliders, handle)
    }

    #[test]
    fn test_started_events_are_queued() {
        let queue = ContactQueue::new();
        let bodies = RigidBodySet::new();
        let (colliders, handle) = collider_handle();

        queue.handle_collision_event(
            &bodies,
            &colliders,
            CollisionEvent::Started(handle, handle, CollisionEventFlags::empty()),
            None,
        );

        let events = queue.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].collider1, handle);
    }

    #[test]
    fn test_stopped_events_are_ignored() {
        let queue = ContactQueue::new();
        let bodies = RigidBodySet::new();
        let (colliders, handle) = collider_handle();

        queue.handle_collision_event(
            &bodies,
            &colliders,
            CollisionEvent::Stopped(handle, handle, CollisionEventFlags::empty()),
            None,
        );

        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_drain_empties_queue() {
        let queue = ContactQueue::new();
        let bodies = RigidBodySet::new();
        let (colliders, handle) = collider_handle();

        queue.handle_collision_event(
            &bodies,
            &colliders,
            CollisionEvent::Started(handle, handle, CollisionEventFlags::empty()),
            None,
        );

        assert_eq!(queue.drain().len(), 1);
        assert!(queue.drain().is_empty());
    }
}
