//! Scripted build-step display.
//!
//! The `build` command shows a canned sequence of status lines with a
//! progress bar that only ever moves forward. This is presentation only:
//! the sequence is fixed, each step runs for a fixed delay, nothing here
//! performs I/O or can fail, and the display is fully decoupled from the
//! generation functions. It must not be extended into real process
//! supervision.

use std::{thread, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

/// Fixed status lines shown while a production build runs.
pub const BUILD_STEPS: &[&str] = &[
    "Analyzing project structure...",
    "Generating production Dockerfile...",
    "Generating nginx configuration...",
    "Setting up production environment...",
];

/// Delay each scripted step is displayed for.
const STEP_DELAY: Duration = Duration::from_millis(350);

/// Play a scripted step sequence on a progress bar.
///
/// Each step is shown as the bar's message for a fixed delay before the bar
/// advances; the position is strictly monotonically increasing. When `quiet`
/// is set, the bar is hidden and the delays are skipped so `--json` runs
/// stay instant.
pub fn play(steps: &[&str], quiet: bool) {
    if quiet {
        return;
    }

    let pb = ProgressBar::new(steps.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for step in steps {
        pb.set_message((*step).to_string());
        thread::sleep(STEP_DELAY);
        pb.inc(1);
    }

    pb.finish_and_clear();
}
