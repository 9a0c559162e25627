//! Invariant tests for impulse_physics
//!
//! These tests exercise contact detection and resolution through the public
//! API only, the way a host frame loop drives it.

use approx::assert_relative_eq;
use impulse_physics::collision::sphere_sphere_contact;
use impulse_physics::prelude::*;

fn moving_sphere(x: f32, radius: f32, vx: f32) -> SphereBody {
    let mut sphere = SphereBody::at(x, 0.0, 0.0, radius).unwrap();
    sphere.body_mut().set_velocity(Vec3::new(vx, 0.0, 0.0));
    sphere
}

fn relative_normal_speed(a: &RigidBody, b: &RigidBody, normal: Vec3) -> f32 {
    (a.velocity() - b.velocity()).dot(normal)
}

/// INVARIANT: Overlapping spheres produce a contact whose normal points from B to A
#[test]
fn invariant_overlap_detected_with_fixed_normal() {
    let a = SphereBody::at(0.0, 0.0, 0.0, 2.0).unwrap();
    let b = SphereBody::at(3.0, 0.0, 0.0, 2.0).unwrap();

    let contact = detect_sphere_sphere(&a, &b, Vec3::Y).expect("spheres overlap");
    assert_relative_eq!(contact.overlap, 1.0);
    assert!(contact.normal.nearly_equals(Vec3::new(-1.0, 0.0, 0.0), 1e-6));
}

/// INVARIANT: Separated spheres produce no contact
#[test]
fn invariant_separated_spheres_no_contact() {
    let a = SphereBody::at(0.0, 0.0, 0.0, 1.0).unwrap();
    let b = SphereBody::at(5.0, 0.0, 0.0, 1.0).unwrap();

    assert!(detect_sphere_sphere(&a, &b, Vec3::Y).is_none());
}

/// INVARIANT: Concentric spheres never produce a NaN normal
#[test]
fn invariant_concentric_spheres_use_fallback() {
    let a = SphereBody::at(1.0, 1.0, 1.0, 1.0).unwrap();
    let b = SphereBody::at(1.0, 1.0, 1.0, 0.5).unwrap();

    let contact = detect_sphere_sphere(&a, &b, Vec3::Z).expect("concentric spheres overlap");
    assert_eq!(contact.normal, Vec3::Z);
    assert!(contact.contact_point.is_finite());
    assert_relative_eq!(contact.overlap, 1.5);
}

/// INVARIANT: After resolution, approaching equal-mass spheres are no longer closing
#[test]
fn invariant_resolution_stops_closing() {
    for (va, vb) in [(1.0, -1.0), (3.0, 0.0), (0.25, -4.0)] {
        // A sits right of B, so the normal is +X and A moving left closes the gap
        let mut a = moving_sphere(3.0, 2.0, -va);
        let mut b = moving_sphere(0.0, 2.0, -vb);

        let contact = detect_sphere_sphere(&a, &b, Vec3::Y).unwrap();
        assert!(relative_normal_speed(a.body(), b.body(), contact.normal) < 0.0);

        assert!(resolve(a.body_mut(), b.body_mut(), &contact, 0.5));
        assert!(relative_normal_speed(a.body(), b.body(), contact.normal) >= 0.0);
    }
}

/// INVARIANT: Impulses are equal and opposite, so pair momentum is conserved
#[test]
fn invariant_momentum_conserved() {
    let mut a = moving_sphere(0.0, 1.0, 2.0);
    let mut b = moving_sphere(1.5, 1.0, -1.0);
    a.body_mut().set_mass(3.0).unwrap();
    b.body_mut().set_mass(0.5).unwrap();

    let before = a.body().momentum() + b.body().momentum();
    let contact = detect_sphere_sphere(&a, &b, Vec3::Y).unwrap();
    let j = resolve_contact(a.body_mut(), b.body_mut(), &contact, 0.8).unwrap();
    let after = a.body().momentum() + b.body().momentum();

    assert!(j > 0.0);
    assert!(before.nearly_equals(after, 1e-5));
}

/// INVARIANT: Resolving an already-separated pair is a no-op, however often it is repeated
#[test]
fn invariant_resolve_separated_pair_is_noop() {
    let mut a = moving_sphere(0.0, 1.0, 1.0);
    let mut b = moving_sphere(1.5, 1.0, -1.0);

    // Run until the pair has pushed itself apart
    let mut frames = 0;
    loop {
        let contact = sphere_sphere_contact(&a, &b, Vec3::Y);
        if contact.overlap <= 0.0 {
            break;
        }
        resolve(a.body_mut(), b.body_mut(), &contact, 0.5);
        a.body_mut().integrate(1.0 / 60.0).unwrap();
        b.body_mut().integrate(1.0 / 60.0).unwrap();
        frames += 1;
        assert!(frames < 600, "pair never separated");
    }

    let contact = sphere_sphere_contact(&a, &b, Vec3::Y);
    assert!(!resolve(a.body_mut(), b.body_mut(), &contact, 0.5));
    let (a_first, b_first) = (a.clone(), b.clone());

    assert!(!resolve(a.body_mut(), b.body_mut(), &contact, 0.5));
    assert_eq!(a, a_first);
    assert_eq!(b, b_first);
}

/// INVARIANT: Pairs without a resolution report so instead of silently passing
#[test]
fn invariant_unsupported_pair_is_explicit() {
    let mut particle = PhysicsBody::from(RigidBody::new());
    let mut sphere = PhysicsBody::from(SphereBody::default());
    let before = particle.clone();

    let outcome = check_collision(&mut particle, &mut sphere, &PhysicsConfig::default());
    assert_eq!(
        outcome,
        CollisionOutcome::Unsupported {
            a: ShapeKind::Particle,
            b: ShapeKind::Sphere,
        }
    );
    assert_eq!(particle, before);
}

/// INVARIANT: The demo scene collides exactly once and the spheres then drift apart
#[test]
fn invariant_demo_scene_collides_once() {
    let (mut world, [left, right]) = PhysicsWorld::two_sphere_demo().unwrap();
    let dt = world.config().timestep;
    let momentum = world.total_momentum();

    let mut resolved = 0;
    for _ in 0..1200 {
        world.step(dt).unwrap();
        resolved += world
            .collision_events()
            .iter()
            .filter(|e| e.is_resolved())
            .count();
    }

    assert_eq!(resolved, 1);
    assert!(world.total_momentum().nearly_equals(momentum, 1e-4));

    let left_pose = world.pose(left).unwrap();
    let right_pose = world.pose(right).unwrap();
    let left_v = world.body(left).unwrap().rigid().velocity();
    let right_v = world.body(right).unwrap().rigid().velocity();
    assert!(left_pose.position.x < right_pose.position.x);
    assert!(left_v.x < right_v.x, "spheres should be moving apart");
}

/// INVARIANT: Restitution 1 preserves kinetic energy along the normal
#[test]
fn invariant_elastic_contact_preserves_energy() {
    let mut world = PhysicsWorld::new(PhysicsConfig::elastic()).unwrap();
    let a = world
        .create_body(&RigidBodyDesc::sphere(1.0).with_linear_velocity(2.0, 0.0, 0.0))
        .unwrap();
    let b = world
        .create_body(
            &RigidBodyDesc::sphere(1.0)
                .with_position(1.9, 0.0, 0.0)
                .with_mass(2.0),
        )
        .unwrap();
    world.add_collision_pair(a, b).unwrap();

    let energy = world.kinetic_energy();
    world.step(0.0).unwrap();

    assert!(world.collision_events()[0].is_resolved());
    assert_relative_eq!(world.kinetic_energy(), energy, epsilon = 1e-4);
}
