//! Gift Catch - headless runner
//!
//! Plays one run on autopilot, saves the score to the local leaderboard
//! and prints the board.
//!
//! Usage: gift-catch [NAME] [TUNING_JSON]
//! Set `GIFT_CATCH_SEED` for a reproducible run, `GIFT_CATCH_TOP` for the
//! board size and `RUST_LOG` for logging.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::Path;
    use std::process::ExitCode;

    use gift_catch::highscores::{clamp_limit, format_age};
    use gift_catch::persistence::{FileScoreStore, unix_millis};
    use gift_catch::{Game, SaveStatus, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "Autopilot".to_string());
    let tuning = match args.next() {
        Some(path) => match Tuning::load(Path::new(&path)) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seed = std::env::var("GIFT_CATCH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(unix_millis);

    let settings = Settings::load(Path::new("data/settings.json"));
    let store = FileScoreStore::open("data/leaderboard.json");
    let mut game = Game::new(seed, tuning, settings, store);
    game.set_autopilot(true);

    let mut ticket = match game.submit_name(&name) {
        Ok(ticket) => Some(ticket),
        Err(e) => {
            eprintln!("error: invalid name: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Gift Catch (headless) seed={seed}");

    let mut time = 0.0;
    let mut frames = 0;
    while let Some(current) = ticket {
        if frames >= MAX_FRAMES {
            game.stop();
            log::warn!("Run still going after {frames} frames, stopping");
            break;
        }
        time += FRAME_MS;
        frames += 1;
        ticket = game.frame(current, time);
        for cue in game.take_cues() {
            log::trace!("cue {:?} at {:.2}", cue.effect, cue.volume);
        }
    }

    game.flush_save();

    let snapshot = game.snapshot();
    println!(
        "{} scored {} (level {}) in {:.1}s",
        name.trim(),
        snapshot.score,
        snapshot.level,
        game.session().now
    );
    match game.save_status() {
        SaveStatus::Saved { id } => println!("Saved as entry #{id}"),
        SaveStatus::Skipped => println!("Nothing to save"),
        SaveStatus::Failed(reason) => println!("Score not saved: {reason}"),
        SaveStatus::Idle | SaveStatus::Pending => {}
    }

    let limit = clamp_limit(
        std::env::var("GIFT_CATCH_TOP")
            .ok()
            .and_then(|s| s.trim().parse().ok()),
    );
    println!("\nLeaderboard ({})", game.sink().path().display());
    let now = unix_millis();
    for entry in game.leaderboard(limit) {
        println!(
            "{:>3}. {:<20} {:>6}  {}",
            entry.rank,
            entry.username,
            entry.score,
            format_age(now, entry.created_at_ms)
        );
    }
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
