//! Impulse Physics - rigid-body sphere simulation
//!
//! Explicit-Euler rigid bodies with force/torque accumulators, spherical
//! collision volumes, and impulse-based sphere/sphere contact resolution.
//!
//! # Features
//!
//! - Rigid body integration (position, velocity, orientation, angular velocity)
//! - Forces and impulses applied at arbitrary world points
//! - Sphere/sphere detection with mass-weighted positional correction
//! - Restitution-based impulse response along the contact normal
//! - Shape-pair dispatch with explicit results for unsupported pairs
//! - A stepping world with explicit collision pairs and contact events
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 PhysicsWorld                    │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────┐  │
//! │  │ PhysicsBody │  │ Collision   │  │ Events  │  │
//! │  │   slots     │  │   pairs     │  │         │  │
//! │  └─────────────┘  └─────────────┘  └─────────┘  │
//! │  ┌─────────────────────────────────────────────┐│
//! │  │  step: gravity → integrate → check pairs    ││
//! │  └─────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────┘
//!                        │
//!         ┌──────────────┼──────────────┐
//!         ▼              ▼              ▼
//!    ┌─────────┐   ┌──────────┐   ┌───────────┐
//!    │RigidBody│   │SphereBody│   │ Collision │
//!    │         │   │          │   │  Outcome  │
//!    └─────────┘   └──────────┘   └───────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use impulse_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
//!
//! let a = physics
//!     .create_body(&RigidBodyDesc::sphere(2.0).with_linear_velocity(1.0, 0.0, 0.0))
//!     .unwrap();
//! let b = physics
//!     .create_body(&RigidBodyDesc::sphere(2.0).with_position(3.0, 0.0, 0.0))
//!     .unwrap();
//! physics.add_collision_pair(a, b).unwrap();
//!
//! physics.step(1.0 / 60.0).unwrap();
//! assert_eq!(physics.collision_events().len(), 1);
//! ```

pub mod body;
pub mod collider;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod sphere;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{BodyHandle, Pose, RigidBody, RigidBodyDesc};
    pub use crate::collider::{ColliderShape, PhysicsBody, ShapeKind};
    pub use crate::collision::{
        check_collision, detect_sphere_sphere, resolve, resolve_contact, CollisionOutcome, Contact,
    };
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{
        CollisionEvent, CollisionEventType, EventCollector, PhysicsEventHandler,
    };
    pub use crate::sphere::SphereBody;
    pub use crate::world::PhysicsWorld;
    pub use impulse_math::Vec3;
}

pub use prelude::*;
