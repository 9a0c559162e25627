//! Log output for the frame loop

use impulse_physics::{CollisionEvent, PhysicsEventHandler, PhysicsWorld};

/// Logs every contact as it is dispatched and keeps a running tally
#[derive(Debug, Default)]
pub struct ContactLog {
    /// Frame the next dispatched events belong to
    pub frame: u64,
    /// Contacts that received an impulse
    pub resolved: u32,
    /// Contacts skipped because the bodies were already separating
    pub separating: u32,
    /// Sum of impulse magnitudes applied
    pub total_impulse: f32,
}

impl PhysicsEventHandler for ContactLog {
    fn on_collision(&mut self, event: &CollisionEvent) {
        if event.is_resolved() {
            self.resolved += 1;
            self.total_impulse += event.impulse;
            log::info!(
                "Frame {}: contact {} / {} resolved, impulse {:.4}, overlap {:.4}",
                self.frame,
                event.body1,
                event.body2,
                event.impulse,
                event.contact.overlap
            );
        } else {
            self.separating += 1;
            log::debug!(
                "Frame {}: contact {} / {} already separating",
                self.frame,
                event.body1,
                event.body2
            );
        }
    }
}

/// Log the pose of every body in the world
pub fn log_poses(world: &PhysicsWorld) {
    log::info!("Frame {}:", world.frame());
    for (handle, pose) in world.poses() {
        let p = pose.position;
        let o = pose.orientation;
        log::info!(
            "  {} position ({:.3}, {:.3}, {:.3}) orientation ({:.1}, {:.1}, {:.1})",
            handle,
            p.x,
            p.y,
            p.z,
            o.x,
            o.y,
            o.z
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_log_tallies_demo_collision() {
        let (mut world, _) = PhysicsWorld::two_sphere_demo().unwrap();
        let mut contacts = ContactLog::default();

        for _ in 0..1200 {
            world.step(1.0 / 60.0).unwrap();
            contacts.frame = world.frame();
            world.dispatch_events(&mut contacts);
        }

        assert_eq!(contacts.resolved, 1);
        assert!(contacts.total_impulse > 0.0);
    }
}
