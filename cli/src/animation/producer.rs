//! Frame Producer
//!
//! Generates the whole animation as a finite stream of frame strings: the
//! silent figure slides in from the right edge, reaches the middle step,
//! stands fully revealed with cycling colors, then slides out to the left.
//!
//! # Steps
//!
//! Step `i` runs from 1 to `max = screen width + figure width`. At
//! `middle = max / 2` the said artifact is emitted [`stand_frames`] times in
//! place of a single sliding frame. The color base advances every
//! [`COLOR_STEP`] steps, standing frames included.

use std::fmt::{self, Write};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::line_buffer::{split_lines, ClusterLine};
use super::writer::FrameWriter;
use super::AnimationError;
use crate::decoration::Decoration;
use crate::screen::Geometry;

/// Delay between two frames
pub const SPAN: Duration = Duration::from_millis(30);

/// How long the revealed figure stands still
pub const STAND: Duration = Duration::from_secs(3);

/// Steps per color advance
pub const COLOR_STEP: usize = 2;

/// Color base distance between two color advances
pub const COLOR_SPREAD: usize = 70;

/// Number of standing frames (`STAND / SPAN`)
pub fn stand_frames() -> usize {
    (STAND.as_millis() / SPAN.as_millis()) as usize
}

/// One frame of the plan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue {
    /// Position index, 1 to `max`
    pub step: usize,
    /// Color base handed to the decoration
    pub base: usize,
    /// Draw the said artifact instead of a sliding frame
    pub standing: bool,
}

/// Both artifacts plus the geometry captured at start
#[derive(Clone, Debug)]
pub struct Scene {
    said: String,
    lines: Vec<ClusterLine>,
    geometry: Geometry,
    max: usize,
    middle: usize,
    top: usize,
}

impl Scene {
    /// Reject artifacts taller than the terminal before anything is drawn
    pub fn new(said: &str, not_said: &str, geometry: Geometry) -> Result<Self, AnimationError> {
        let said_lines = said.matches('\n').count() + 1;
        if said_lines > geometry.height {
            return Err(AnimationError::TooTall {
                lines: said_lines,
                height: geometry.height,
            });
        }

        let lines = split_lines(not_said);
        let figure_width = lines.iter().map(ClusterLine::width).max().unwrap_or(0);
        let max = geometry.width + figure_width;

        Ok(Self {
            said: said.to_string(),
            lines,
            geometry,
            max,
            middle: max / 2,
            top: geometry.height - said_lines,
        })
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn middle(&self) -> usize {
        self.middle
    }

    /// Frames the producer will emit
    pub fn frame_count(&self) -> usize {
        if (1..=self.max).contains(&self.middle) {
            self.max - 1 + stand_frames()
        } else {
            self.max
        }
    }

    /// Every frame in order, with its color base
    pub fn cues(&self) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(self.frame_count());
        let mut x = 0;
        for step in 1..=self.max {
            if step == self.middle {
                for k in 0..stand_frames() {
                    cues.push(Cue {
                        step,
                        base: x * COLOR_SPREAD,
                        standing: true,
                    });
                    if k % COLOR_STEP == 0 {
                        x += 1;
                    }
                }
            } else {
                cues.push(Cue {
                    step,
                    base: x * COLOR_SPREAD,
                    standing: false,
                });
            }
            if step % COLOR_STEP == 0 {
                x += 1;
            }
        }
        cues
    }

    /// 1-based column of step `i`
    pub fn column(&self, i: usize) -> usize {
        self.geometry.width.saturating_sub(i).max(1)
    }

    /// The silent figure as seen at step `i`
    fn write_slide(&self, i: usize, out: &mut impl Write) -> fmt::Result {
        let width = self.geometry.width;
        for line in &self.lines {
            if i > width {
                // leaving through the left edge
                let n = i - width;
                if n < line.len() {
                    out.write_str(line.slice(n, line.len()))?;
                }
            } else if i <= line.len() {
                // entering through the right edge
                out.write_str(line.slice(0, i - 1))?;
            } else {
                out.write_str(line.raw())?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

pub struct FrameProducer {
    scene: Scene,
    writer: FrameWriter,
}

impl FrameProducer {
    pub fn new(scene: Scene, bold: bool) -> Self {
        let writer = FrameWriter::new(Decoration::aurora(0, bold), scene.column(0), scene.top);
        Self { scene, writer }
    }

    /// Emit every frame in order, returning how many were delivered
    ///
    /// Stops early without error when the receiver goes away.
    pub async fn run(self, tx: mpsc::Sender<String>) -> Result<usize, fmt::Error> {
        let Self { scene, mut writer } = self;
        let mut sent = 0;

        for cue in scene.cues() {
            writer.set_column(scene.column(cue.step));
            writer.set_color_base(cue.base);
            if cue.standing {
                writer.write_str(&scene.said)?;
            } else {
                scene.write_slide(cue.step, &mut writer)?;
            }
            if tx.send(writer.take()).await.is_err() {
                debug!(sent, "Frame receiver gone");
                return Ok(sent);
            }
            sent += 1;
            trace!(step = cue.step, base = cue.base, sent, "Produced frame");
        }

        debug!(sent, "Frame sequence complete");
        Ok(sent)
    }
}
