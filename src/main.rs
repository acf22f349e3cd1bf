//! Lane Runner headless entry point
//!
//! Plays one attract-mode run at a fixed 60 Hz and logs how it went.
//! Usage: `lane-runner [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use lane_runner::{
    Tuning,
    consts::SIM_DT,
    sim::{GameEvent, RunController, RunPhase, autopilot},
};

/// Ten minutes of sim time
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Lane Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => 0x5EED,
    };
    let tuning = match args.next() {
        Some(path) => {
            log::info!("Loading tuning from {path}");
            Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Tuning::default(),
    };

    let mut controller = RunController::new(tuning, seed)?;
    controller.start();

    let mut spawned = 0usize;
    while controller.phase() == RunPhase::Running && controller.session().ticks < MAX_TICKS {
        let input = autopilot::plan(&controller);
        controller.tick(&input, SIM_DT);
        for event in controller.drain_events() {
            log::trace!("{event:?}");
            if let GameEvent::ObstacleSpawned { .. } = event {
                spawned += 1;
            }
        }
    }

    let session = controller.session();
    match session.final_score() {
        Some(score) => log::info!(
            "Run over after {:.1}s: score {score}, tier {}, {spawned} obstacles spawned",
            session.clock,
            session.tier()
        ),
        None => log::info!(
            "Run survived {:.1}s: distance {:.1}, tier {}, {spawned} obstacles spawned",
            session.clock,
            session.progress.traveled(),
            session.tier()
        ),
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_runner::web::wasm_main, this is just to satisfy the compiler
}
