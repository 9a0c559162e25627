//! Contact detection and impulse-based resolution
//!
//! Detection produces an ephemeral [`Contact`]; resolution consumes it in the
//! same call, first pushing the bodies apart along the contact normal and
//! then applying equal and opposite impulses at the contact point.
//!
//! Conventions:
//! - The normal points from body B toward body A.
//! - The contact point sits in the middle of the overlap region on the line
//!   between the centres, rather than `overlap` away from B's centre. Both
//!   lie on the normal line, so for sphere pairs the choice does not change
//!   the impulse. Resolution shifts the point with A's positional correction
//!   and computes lever arms after both bodies have moved.

use crate::body::RigidBody;
use crate::collider::{PhysicsBody, ShapeKind};
use crate::config::PhysicsConfig;
use crate::sphere::SphereBody;
use impulse_math::Vec3;
use log::{debug, trace, warn};

/// Contact between two overlapping bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Penetration depth, positive when the bodies overlap
    pub overlap: f32,
    /// Unit normal pointing from B toward A
    pub normal: Vec3,
    /// World-space point used for lever arms
    pub contact_point: Vec3,
}

/// Raw contact geometry between two spheres, whether or not they overlap.
///
/// Coincident centres have no defined direction between them; `fallback_normal`
/// (expected to be unit length) is used instead.
pub fn sphere_sphere_contact(a: &SphereBody, b: &SphereBody, fallback_normal: Vec3) -> Contact {
    let separation = a.position() - b.position();
    let overlap = a.radius() + b.radius() - separation.magnitude();
    let normal = match separation.try_normalize() {
        Some(normal) => normal,
        None => {
            warn!(
                "Concentric spheres at {:?}, using fallback normal {:?}",
                b.position(),
                fallback_normal
            );
            fallback_normal
        }
    };

    Contact {
        overlap,
        normal,
        contact_point: b.position() + normal * (b.radius() - overlap * 0.5),
    }
}

/// Detect overlap between two spheres. Touching spheres (zero overlap) do
/// not count as a contact.
pub fn detect_sphere_sphere(
    a: &SphereBody,
    b: &SphereBody,
    fallback_normal: Vec3,
) -> Option<Contact> {
    let separation = a.position() - b.position();
    let reach = a.radius() + b.radius();
    if separation.magnitude_squared() >= reach * reach {
        return None;
    }

    let contact = sphere_sphere_contact(a, b, fallback_normal);
    if contact.overlap > 0.0 {
        debug!(
            "Sphere contact: overlap {:.4}, normal {:?}",
            contact.overlap, contact.normal
        );
        Some(contact)
    } else {
        None
    }
}

/// Resolve `contact` between `a` and `b`.
///
/// Returns the impulse magnitude applied along the normal, or `None` when no
/// impulse was applied: either the contact no longer overlaps (nothing is
/// touched), or the bodies are already separating at the contact point, or
/// the impulse would leave either body with non-finite velocity. In the last
/// two cases the positional correction has still been applied.
pub fn resolve_contact(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    restitution: f32,
) -> Option<f32> {
    // Also rejects NaN
    if !(contact.overlap > 0.0) {
        return None;
    }
    let normal = contact.normal;

    // Split the correction by inverse mass so the heavier body moves less
    let reduced_mass = 1.0 / (a.inverse_mass() + b.inverse_mass());
    let a_shift = normal * (reduced_mass * contact.overlap / a.mass());
    let b_shift = -normal * (reduced_mass * contact.overlap / b.mass());
    a.translate(a_shift);
    b.translate(b_shift);

    let contact_point = contact.contact_point + a_shift;
    let s1 = contact_point - a.position();
    let s2 = contact_point - b.position();

    let vel_a = a.velocity() + a.angular_velocity().cross(s1);
    let vel_b = b.velocity() + b.angular_velocity().cross(s2);
    let closing_speed = (vel_a - vel_b).dot(normal);
    if closing_speed >= 0.0 {
        trace!("Contact already separating ({:.4}), skipping impulse", closing_speed);
        return None;
    }

    let s1n = s1.cross(normal);
    let s2n = s2.cross(normal);
    let effective_inv_mass = a.inverse_mass()
        + b.inverse_mass()
        + s1n.magnitude_squared() / a.moment_of_inertia().magnitude()
        + s2n.magnitude_squared() / b.moment_of_inertia().magnitude();

    let j = -(1.0 + restitution) * closing_speed / effective_inv_mass;
    let responses = a
        .impulse_response(normal * j, contact_point)
        .and_then(|ra| Ok((ra, b.impulse_response(-normal * j, contact_point)?)));
    let ((va, wa), (vb, wb)) = match responses {
        Ok(responses) => responses,
        Err(e) => {
            warn!("Dropping contact impulse {}: {}", j, e);
            return None;
        }
    };
    a.set_velocity(va);
    a.set_angular_velocity(wa);
    b.set_velocity(vb);
    b.set_angular_velocity(wb);

    debug!("Applied contact impulse {:.4} at {:?}", j, contact_point);
    Some(j)
}

/// Resolve `contact`, returning whether an impulse was applied
pub fn resolve(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    restitution: f32,
) -> bool {
    resolve_contact(a, b, contact, restitution).is_some()
}

/// Result of checking one candidate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// The shapes do not overlap
    NoContact,
    /// Overlap was corrected but the bodies were already moving apart
    Separating { contact: Contact },
    /// Overlap was corrected and an impulse of magnitude `impulse` applied
    Resolved { contact: Contact, impulse: f32 },
    /// No resolution exists for this pair of shapes; nothing was touched
    Unsupported { a: ShapeKind, b: ShapeKind },
}

impl CollisionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// The contact, if the shapes overlapped
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Separating { contact } | Self::Resolved { contact, .. } => Some(contact),
            Self::NoContact | Self::Unsupported { .. } => None,
        }
    }

    /// Impulse magnitude, if one was applied
    pub fn impulse(&self) -> Option<f32> {
        match self {
            Self::Resolved { impulse, .. } => Some(*impulse),
            _ => None,
        }
    }
}

/// Detect and resolve a collision between two bodies, dispatching on the
/// pair of shapes. Only sphere/sphere has a resolution; every other pair is
/// reported as [`CollisionOutcome::Unsupported`].
pub fn check_collision(
    a: &mut PhysicsBody,
    b: &mut PhysicsBody,
    config: &PhysicsConfig,
) -> CollisionOutcome {
    match (a, b) {
        (PhysicsBody::Sphere(a), PhysicsBody::Sphere(b)) => {
            collide_spheres(a, b, config)
        }
        (a, b) => {
            trace!("No collision resolution for {} / {}", a.kind(), b.kind());
            CollisionOutcome::Unsupported {
                a: a.kind(),
                b: b.kind(),
            }
        }
    }
}

fn collide_spheres(
    a: &mut SphereBody,
    b: &mut SphereBody,
    config: &PhysicsConfig,
) -> CollisionOutcome {
    let Some(contact) = detect_sphere_sphere(a, b, config.fallback_normal_vec()) else {
        return CollisionOutcome::NoContact;
    };

    match resolve_contact(a.body_mut(), b.body_mut(), &contact, config.restitution) {
        Some(impulse) => CollisionOutcome::Resolved { contact, impulse },
        None => CollisionOutcome::Separating { contact },
    }
}
