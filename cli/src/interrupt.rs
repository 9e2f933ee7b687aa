//! Interrupt Source
//!
//! Delivers a single cancellation event to the animation player. In the
//! binaries the event comes from SIGINT / SIGTERM / SIGHUP; tests trigger it
//! through an [`InterruptHandle`].

use std::io;

use tokio::sync::mpsc;
use tracing::debug;

/// Sending half, cheap to clone
#[derive(Clone, Debug)]
pub struct InterruptHandle {
    tx: mpsc::Sender<()>,
}

impl InterruptHandle {
    /// Request cancellation (repeated requests collapse into one)
    pub fn trigger(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiving half, awaited by the player between frames
#[derive(Debug)]
pub struct Interrupt {
    rx: mpsc::Receiver<()>,
}

impl Interrupt {
    pub fn channel() -> (InterruptHandle, Interrupt) {
        let (tx, rx) = mpsc::channel(1);
        (InterruptHandle { tx }, Interrupt { rx })
    }

    /// An interrupt that never fires
    pub fn never() -> Self {
        Self::channel().1
    }

    /// Listen for termination signals on a background task
    #[cfg(unix)]
    pub fn from_signals() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        let mut hangup = signal(SignalKind::hangup())?;

        let (handle, rx) = Self::channel();
        tokio::spawn(async move {
            tokio::select! {
                _ = interrupt.recv() => debug!("Received SIGINT"),
                _ = terminate.recv() => debug!("Received SIGTERM"),
                _ = hangup.recv() => debug!("Received SIGHUP"),
            }
            handle.trigger();
        });
        Ok(rx)
    }

    /// Listen for ctrl-c on a background task
    #[cfg(not(unix))]
    pub fn from_signals() -> io::Result<Self> {
        let (handle, rx) = Self::channel();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Received ctrl-c");
                handle.trigger();
            }
        });
        Ok(rx)
    }

    /// Resolve once cancellation is requested
    ///
    /// Pends forever when every handle is gone without triggering. Cancel
    /// safe, so it can sit in a `select!` loop.
    pub async fn fired(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_fires() {
        let (handle, mut interrupt) = Interrupt::channel();
        handle.trigger();
        tokio::time::timeout(Duration::from_secs(1), interrupt.fired())
            .await
            .expect("interrupt should fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_never_fires() {
        let (handle, mut interrupt) = Interrupt::channel();
        drop(handle);
        let result = tokio::time::timeout(Duration::from_secs(5), interrupt.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_repeated_triggers_collapse() {
        let (handle, mut interrupt) = Interrupt::channel();
        handle.trigger();
        handle.trigger();
        interrupt.fired().await;
        assert!(interrupt.rx.try_recv().is_err());
    }
}
