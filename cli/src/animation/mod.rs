//! Super Mode Animation
//!
//! The figure glides across the bottom of the terminal, stops in the middle
//! to show what it said in cycling colors, then glides out.
//!
//! A spawned [`FrameProducer`] renders every frame into a bounded channel.
//! The [`Player`] drains it on the caller's task at a fixed cadence and is
//! the only writer to the terminal. Only frame strings cross the channel.

mod line_buffer;
mod player;
mod producer;
mod writer;

use std::io::{self, Write};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use bonesay_core::Bone;

pub use line_buffer::{split_lines, ClusterLine};
pub use player::{PlayOutcome, Player};
pub use producer::{stand_frames, Cue, FrameProducer, Scene, COLOR_SPREAD, COLOR_STEP, SPAN, STAND};
pub use writer::FrameWriter;

use crate::interrupt::Interrupt;
use crate::screen::{self, Geometry, Screen};

#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("too tall for terminal ({lines} lines, {height} rows)")]
    TooTall { lines: usize, height: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Said and not-said artifacts for `phrase`
///
/// The not-said artifact keeps the balloon's rows as blank lines and draws
/// the same figure with a blank thought connector.
pub fn artifacts(bone: &Bone, phrase: &str) -> (String, String) {
    let figure = bone.figure();
    let balloon = bone.balloon(phrase, figure.balloon_offset);

    let mut not_said = "\n".repeat(balloon.matches('\n').count());
    not_said.push_str(&bone.silent().figure().text);

    let mut said = balloon;
    said.push_str(&figure.text);
    (said, not_said)
}

/// Play the animation on `out`
///
/// The geometry check happens before the terminal is touched. The screen is
/// restored whether playback completes or is interrupted.
pub async fn run_animation<W: Write>(
    said: &str,
    not_said: &str,
    geometry: Geometry,
    bold: bool,
    interrupt: &mut Interrupt,
    out: W,
) -> Result<PlayOutcome, AnimationError> {
    let scene = Scene::new(said, not_said, geometry)?;
    debug!(
        width = geometry.width,
        height = geometry.height,
        frames = scene.frame_count(),
        "Starting animation"
    );

    let (tx, mut rx) = mpsc::channel(scene.max().max(1));
    let producer = FrameProducer::new(scene, bold);

    let mut screen = Screen::enter(out)?;
    let task = tokio::spawn(producer.run(tx));

    let outcome = Player::new(&mut screen).play(&mut rx, interrupt).await;
    // a cancelled run leaves the producer to notice the closed channel
    drop(rx);

    if let Ok(PlayOutcome::Completed { .. }) = outcome {
        match task.await {
            Ok(Ok(frames)) => debug!(frames, "Producer finished"),
            Ok(Err(e)) => warn!(error = %e, "Producer failed to format a frame"),
            Err(e) => warn!(error = %e, "Producer task failed"),
        }
    }

    screen.restore()?;
    Ok(outcome?)
}

/// Animate `phrase` on stdout, stopping on SIGINT / SIGTERM / SIGHUP
pub async fn run_super(bone: &Bone, phrase: &str, bold: bool) -> Result<PlayOutcome, AnimationError> {
    let (said, not_said) = artifacts(bone, phrase);
    let geometry = Geometry::current()?;
    let mut interrupt = Interrupt::from_signals()?;
    screen::install_panic_hook();
    run_animation(&said, &not_said, geometry, bold, &mut interrupt, io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonesay_core::{BoneConfig, FigureLibrary};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bone() -> Bone {
        let mut rng = StdRng::seed_from_u64(7);
        Bone::new(BoneConfig::default(), &FigureLibrary::embedded(), &mut rng).unwrap()
    }

    #[test]
    fn test_artifacts_share_line_count() {
        let (said, not_said) = artifacts(&bone(), "hello\nthere");
        assert_eq!(said.lines().count(), not_said.lines().count());
        assert_eq!(said.matches('\n').count(), not_said.matches('\n').count());
    }

    #[test]
    fn test_not_said_has_no_balloon() {
        let (said, not_said) = artifacts(&bone(), "hello");
        assert!(said.contains("< hello >"));
        assert!(!not_said.contains("hello"));
        assert!(not_said.starts_with("\n\n\n"));
    }

    #[test]
    fn test_too_tall_message() {
        let err = AnimationError::TooTall { lines: 30, height: 24 };
        assert!(err.to_string().starts_with("too tall for terminal"));
    }
}
