//! Impulse Sandbox
//!
//! Headless host loop for the physics core. It builds a scene from
//! configuration, steps it at a fixed timestep and logs body poses and
//! contacts as it goes.
//!
//! Run with: cargo run -p impulse_sandbox
//!       or: cargo run --bin impulse-sandbox

mod config;
mod report;

use std::time::Instant;

use crate::config::SandboxConfig;
use crate::report::ContactLog;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = run() {
        log::error!("Sandbox stopped: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SandboxConfig::load()?;
    config.print_summary();

    let mut world = config.build_world()?;
    let dt = world.config().timestep;
    let frame_time = config.frame_interval()?;
    let mut contacts = ContactLog::default();

    log::info!(
        "Starting simulation: {} bodies, momentum {:?}, energy {:.4}",
        world.body_count(),
        world.total_momentum(),
        world.kinetic_energy()
    );
    report::log_poses(&world);

    for _ in 0..config.frames {
        let started = Instant::now();

        world.step(dt)?;
        contacts.frame = world.frame();
        world.dispatch_events(&mut contacts);

        if config.report_every > 0 && world.frame() % u64::from(config.report_every) == 0 {
            report::log_poses(&world);
        }

        if config.realtime {
            if let Some(remaining) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    log::info!(
        "Finished after {} frames: {} contacts resolved ({} separating), total impulse {:.4}",
        world.frame(),
        contacts.resolved,
        contacts.separating,
        contacts.total_impulse
    );
    log::info!(
        "Final momentum {:?}, energy {:.4}",
        world.total_momentum(),
        world.kinetic_energy()
    );
    Ok(())
}
