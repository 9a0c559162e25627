//! Physics events (contacts detected during a step)

use crate::body::BodyHandle;
use crate::collision::{CollisionOutcome, Contact};

/// Type of collision event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventType {
    /// Bodies overlapped and an impulse pushed them apart
    Resolved,
    /// Bodies overlapped but were already moving apart
    Separating,
}

/// A contact between two bodies during the last step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// First body of the pair (contact normal points toward it)
    pub body1: BodyHandle,
    /// Second body of the pair
    pub body2: BodyHandle,
    /// Event type
    pub event_type: CollisionEventType,
    /// Contact geometry as detected, before positional correction
    pub contact: Contact,
    /// Impulse magnitude applied along the normal (0 when separating)
    pub impulse: f32,
}

impl CollisionEvent {
    /// Build an event from a pair check; `None` when the shapes did not touch
    pub fn from_outcome(
        body1: BodyHandle,
        body2: BodyHandle,
        outcome: &CollisionOutcome,
    ) -> Option<Self> {
        let (event_type, contact, impulse) = match *outcome {
            CollisionOutcome::Resolved { contact, impulse } => {
                (CollisionEventType::Resolved, contact, impulse)
            }
            CollisionOutcome::Separating { contact } => {
                (CollisionEventType::Separating, contact, 0.0)
            }
            CollisionOutcome::NoContact | CollisionOutcome::Unsupported { .. } => return None,
        };

        Some(Self {
            body1,
            body2,
            event_type,
            contact,
            impulse,
        })
    }

    /// Check if an impulse was applied
    pub fn is_resolved(&self) -> bool {
        self.event_type == CollisionEventType::Resolved
    }

    /// Check whether `body` took part in this contact
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body1 == body || self.body2 == body
    }
}

/// Handler trait for physics events
pub trait PhysicsEventHandler {
    /// Called once per contact detected in the last step
    fn on_collision(&mut self, event: &CollisionEvent);
}

/// Default event handler that collects events into a buffer
#[derive(Debug, Default)]
pub struct EventCollector {
    /// Collision events this step
    pub collision_events: Vec<CollisionEvent>,
}

impl EventCollector {
    /// Create a new event collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all collected events
    pub fn clear(&mut self) {
        self.collision_events.clear();
    }

    /// Get events where an impulse was applied
    pub fn resolved(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter().filter(|e| e.is_resolved())
    }

    /// Total impulse applied over all events
    pub fn total_impulse(&self) -> f32 {
        self.collision_events.iter().map(|e| e.impulse).sum()
    }
}

impl PhysicsEventHandler for EventCollector {
    fn on_collision(&mut self, event: &CollisionEvent) {
        self.collision_events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impulse_math::Vec3;

    fn contact() -> Contact {
        Contact {
            overlap: 0.5,
            normal: Vec3::X,
            contact_point: Vec3::ZERO,
        }
    }

    #[test]
    fn test_from_outcome() {
        let (h1, h2) = (BodyHandle::from_raw(0), BodyHandle::from_raw(1));

        let resolved = CollisionOutcome::Resolved { contact: contact(), impulse: 2.0 };
        let event = CollisionEvent::from_outcome(h1, h2, &resolved).unwrap();
        assert!(event.is_resolved());
        assert!(event.involves(h2));
        assert_eq!(event.impulse, 2.0);

        let separating = CollisionOutcome::Separating { contact: contact() };
        let event = CollisionEvent::from_outcome(h1, h2, &separating).unwrap();
        assert_eq!(event.event_type, CollisionEventType::Separating);

        assert!(CollisionEvent::from_outcome(h1, h2, &CollisionOutcome::NoContact).is_none());
    }

    #[test]
    fn test_collector() {
        let (h1, h2) = (BodyHandle::from_raw(0), BodyHandle::from_raw(1));
        let mut collector = EventCollector::new();

        for outcome in [
            CollisionOutcome::Resolved { contact: contact(), impulse: 1.5 },
            CollisionOutcome::Separating { contact: contact() },
            CollisionOutcome::Resolved { contact: contact(), impulse: 0.5 },
        ] {
            if let Some(event) = CollisionEvent::from_outcome(h1, h2, &outcome) {
                collector.on_collision(&event);
            }
        }

        assert_eq!(collector.collision_events.len(), 3);
        assert_eq!(collector.resolved().count(), 2);
        assert_eq!(collector.total_impulse(), 2.0);

        collector.clear();
        assert!(collector.collision_events.is_empty());
    }
}
