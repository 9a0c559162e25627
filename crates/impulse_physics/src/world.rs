//! Physics world - main simulation container

use crate::body::{BodyHandle, Pose, RigidBodyDesc};
use crate::collider::PhysicsBody;
use crate::collision::check_collision;
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::{CollisionEvent, EventCollector, PhysicsEventHandler};
use crate::sphere::SphereBody;
use impulse_math::Vec3;

/// Owns every body in the simulation and steps them one frame at a time.
///
/// There is no broad phase: only pairs registered with
/// [`add_collision_pair`](Self::add_collision_pair) are checked. A step runs
/// to completion synchronously and needs exclusive access to the world.
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Gravity
    gravity: Vec3,

    /// Body slots, indexed by handle. Removed bodies leave `None` so
    /// handles are never reused.
    bodies: Vec<Option<PhysicsBody>>,

    /// Candidate pairs checked every step, in insertion order
    pairs: Vec<(BodyHandle, BodyHandle)>,

    /// Event collector
    events: EventCollector,

    /// Number of completed steps
    frame: u64,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Creating physics world (gravity {:?}, restitution {})",
            config.gravity,
            config.restitution
        );
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity_vec(),
            config,
            bodies: Vec::new(),
            pairs: Vec::new(),
            events: EventCollector::new(),
            frame: 0,
        }
    }

    /// The two-sphere scene: a large sphere on the left and a small one on
    /// the right, each moving toward the other at unit speed
    pub fn two_sphere_demo() -> Result<(Self, [BodyHandle; 2])> {
        Self::two_sphere_demo_with(PhysicsConfig::default())
    }

    /// [`two_sphere_demo`](Self::two_sphere_demo) under a custom configuration
    pub fn two_sphere_demo_with(config: PhysicsConfig) -> Result<(Self, [BodyHandle; 2])> {
        let mut world = Self::new(config)?;

        let mut left = SphereBody::at(-10.0, 0.0, 0.0, 2.5)?;
        left.body_mut().add_velocity(Vec3::new(1.0, 0.0, 0.0));
        let mut right = SphereBody::at(10.0, 0.0, 0.0, 1.0)?;
        right.body_mut().add_velocity(Vec3::new(-1.0, 0.0, 0.0));

        let left = world.add_body(left);
        let right = world.add_body(right);
        world.add_collision_pair(left, right)?;
        Ok((world, [left, right]))
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Set gravity
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.gravity = Vec3::new(x, y, z);
    }

    /// Get gravity
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    // ==================== Bodies ====================

    /// Add a body, returning its handle
    pub fn add_body(&mut self, body: impl Into<PhysicsBody>) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(Some(body.into()));
        handle
    }

    /// Create a body from a description
    pub fn create_body(&mut self, desc: &RigidBodyDesc) -> Result<BodyHandle> {
        let body = PhysicsBody::from_desc(desc)?;
        Ok(self.add_body(body))
    }

    /// Remove a body along with every collision pair that mentions it
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<PhysicsBody> {
        let body = self
            .bodies
            .get_mut(handle.index())
            .and_then(Option::take)
            .ok_or(PhysicsError::BodyNotFound(handle))?;

        let before = self.pairs.len();
        self.pairs.retain(|&(a, b)| a != handle && b != handle);
        if self.pairs.len() != before {
            log::debug!(
                "Dropped {} collision pair(s) with removed body {}",
                before - self.pairs.len(),
                handle
            );
        }
        Ok(body)
    }

    /// Get a body
    pub fn body(&self, handle: BodyHandle) -> Result<&PhysicsBody> {
        self.bodies
            .get(handle.index())
            .and_then(Option::as_ref)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get a body mutably
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut PhysicsBody> {
        self.bodies
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Handles of all live bodies, in creation order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| BodyHandle(index as u32))
    }

    /// Register a pair to check for collisions every step. Registering the
    /// same pair twice (in either order) has no further effect.
    pub fn add_collision_pair(&mut self, a: BodyHandle, b: BodyHandle) -> Result<()> {
        if a == b {
            return Err(PhysicsError::SelfPair(a));
        }
        self.body(a)?;
        self.body(b)?;

        let exists = self
            .pairs
            .iter()
            .any(|&pair| pair == (a, b) || pair == (b, a));
        if !exists {
            self.pairs.push((a, b));
        }
        Ok(())
    }

    /// Registered collision pairs
    pub fn collision_pairs(&self) -> &[(BodyHandle, BodyHandle)] {
        &self.pairs
    }

    // ==================== Simulation ====================

    /// Advance the simulation by `dt` seconds.
    ///
    /// Integrates every body under gravity, optionally clears the force and
    /// torque accumulators, then checks each registered pair. Gravity acts
    /// for this step only and is never stored in the accumulators. If a body
    /// fails to integrate the step stops there with an error: bodies before
    /// it have already moved and no collisions are checked.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        self.events.clear();

        for body in self.bodies.iter_mut().flatten() {
            let rigid = body.rigid_mut();
            rigid.integrate_with_gravity(dt, self.gravity)?;
            if self.config.clear_accumulators {
                rigid.clear_force();
                rigid.clear_torque();
            }
        }

        for &(h1, h2) in &self.pairs {
            let Some((a, b)) = pair_mut(&mut self.bodies, h1.index(), h2.index()) else {
                continue;
            };
            let outcome = check_collision(a, b, &self.config);
            if let Some(event) = CollisionEvent::from_outcome(h1, h2, &outcome) {
                self.events.on_collision(&event);
            }
        }

        self.frame += 1;
        Ok(())
    }

    /// Number of completed steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ==================== Output ====================

    /// Position and orientation of a body, for building a model transform
    pub fn pose(&self, handle: BodyHandle) -> Result<Pose> {
        self.body(handle).map(|b| b.rigid().pose())
    }

    /// Poses of all live bodies
    pub fn poses(&self) -> impl Iterator<Item = (BodyHandle, Pose)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref().map(|b| (BodyHandle(index as u32), b.rigid().pose()))
            })
    }

    /// Sum of linear momentum over all bodies
    pub fn total_momentum(&self) -> Vec3 {
        self.bodies
            .iter()
            .flatten()
            .fold(Vec3::ZERO, |sum, b| sum + b.rigid().momentum())
    }

    /// Sum of linear kinetic energy over all bodies
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .flatten()
            .map(|b| 0.5 * b.rigid().mass() * b.rigid().velocity().magnitude_squared())
            .sum()
    }

    // ==================== Events ====================

    /// Get collision events from the last step
    pub fn collision_events(&self) -> &[CollisionEvent] {
        &self.events.collision_events
    }

    /// Feed the last step's events to `handler`
    pub fn dispatch_events(&self, handler: &mut dyn PhysicsEventHandler) {
        for event in &self.events.collision_events {
            handler.on_collision(event);
        }
    }

    // ==================== Debug ====================

    /// Get number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_valid_config(PhysicsConfig::default())
    }
}

/// Borrow two distinct live slots mutably
fn pair_mut(
    bodies: &mut [Option<PhysicsBody>],
    i: usize,
    j: usize,
) -> Option<(&mut PhysicsBody, &mut PhysicsBody)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    let (a, b) = if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    };
    Some((a.as_mut()?, b.as_mut()?))
}
