//! Frame Player
//!
//! Writes frames to the terminal in order at a fixed cadence. The first
//! frame goes out immediately, every later one after `span`. An interrupt
//! observed while waiting wins over both the next frame and the timer.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::mpsc;
use tracing::debug;

use super::producer::SPAN;
use crate::interrupt::Interrupt;

/// How playback ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The frame channel ran dry
    Completed { frames: usize },
    /// Stopped by an interrupt after `frames` were shown
    Cancelled { frames: usize },
}

impl PlayOutcome {
    pub fn frames(&self) -> usize {
        match self {
            Self::Completed { frames } | Self::Cancelled { frames } => *frames,
        }
    }
}

pub struct Player<W: Write> {
    out: W,
    span: Duration,
}

impl<W: Write> Player<W> {
    pub fn new(out: W) -> Self {
        Self::with_span(out, SPAN)
    }

    pub fn with_span(out: W, span: Duration) -> Self {
        Self { out, span }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub async fn play(
        &mut self,
        frames: &mut mpsc::Receiver<String>,
        interrupt: &mut Interrupt,
    ) -> io::Result<PlayOutcome> {
        let mut shown = 0;
        loop {
            let frame = tokio::select! {
                biased;
                _ = interrupt.fired() => return self.cancel(shown),
                frame = frames.recv() => frame,
            };
            let Some(frame) = frame else {
                break;
            };

            if shown > 0 {
                tokio::select! {
                    biased;
                    _ = interrupt.fired() => return self.cancel(shown),
                    _ = tokio::time::sleep(self.span) => {}
                }
            }

            self.out.write_all(frame.as_bytes())?;
            self.out.flush()?;
            shown += 1;
        }

        debug!(frames = shown, "Playback complete");
        Ok(PlayOutcome::Completed { frames: shown })
    }

    fn cancel(&mut self, shown: usize) -> io::Result<PlayOutcome> {
        debug!(frames = shown, "Playback interrupted");
        execute!(self.out, Clear(ClearType::All))?;
        Ok(PlayOutcome::Cancelled { frames: shown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupt::InterruptHandle;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    /// Records when each frame was flushed
    #[derive(Default)]
    struct Recorder {
        buf: Vec<u8>,
        flushed_at: Vec<Instant>,
        /// Fire this handle once `trigger_after` frames are flushed
        trigger: Option<(InterruptHandle, usize)>,
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushed_at.push(Instant::now());
            if let Some((handle, after)) = &self.trigger {
                if self.flushed_at.len() == *after {
                    handle.trigger();
                }
            }
            Ok(())
        }
    }

    async fn queued(frames: &[&str]) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(frames.len().max(1));
        for frame in frames {
            tx.send(frame.to_string()).await.unwrap();
        }
        rx
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_frame_immediate_then_cadence() {
        let mut rx = queued(&["a", "b", "c"]).await;
        let mut interrupt = Interrupt::never();
        let start = Instant::now();

        let mut player = Player::new(Recorder::default());
        let outcome = player.play(&mut rx, &mut interrupt).await.unwrap();
        assert_eq!(outcome, PlayOutcome::Completed { frames: 3 });

        let recorder = player.into_inner();
        assert_eq!(recorder.buf, b"abc");
        assert_eq!(recorder.flushed_at[0], start);
        for pair in recorder.flushed_at.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= SPAN && gap < SPAN + Duration::from_millis(2), "{gap:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_stops_after_k_frames() {
        let (handle, mut interrupt) = Interrupt::channel();
        let mut rx = queued(&["f1", "f2", "f3", "f4", "f5"]).await;
        let recorder = Recorder {
            trigger: Some((handle, 2)),
            ..Recorder::default()
        };

        let mut player = Player::new(recorder);
        let outcome = player.play(&mut rx, &mut interrupt).await.unwrap();
        assert_eq!(outcome, PlayOutcome::Cancelled { frames: 2 });
        assert_eq!(outcome.frames(), 2);

        let text = String::from_utf8(player.into_inner().buf).unwrap();
        assert_eq!(text, "f1f2\x1b[2J");
    }

    #[tokio::test]
    async fn test_pending_interrupt_wins_over_first_frame() {
        let (handle, mut interrupt) = Interrupt::channel();
        handle.trigger();
        let mut rx = queued(&["never"]).await;

        let mut player = Player::new(Recorder::default());
        let outcome = player.play(&mut rx, &mut interrupt).await.unwrap();
        assert_eq!(outcome, PlayOutcome::Cancelled { frames: 0 });
        assert_eq!(player.get_ref().buf, b"\x1b[2J");
    }

    #[tokio::test]
    async fn test_empty_channel_completes() {
        let (tx, mut rx) = mpsc::channel::<String>(1);
        drop(tx);
        let mut player = Player::new(Recorder::default());
        let outcome = player
            .play(&mut rx, &mut Interrupt::never())
            .await
            .unwrap();
        assert_eq!(outcome, PlayOutcome::Completed { frames: 0 });
    }
}
