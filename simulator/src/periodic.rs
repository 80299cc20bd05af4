//! Background periodic tasks with cooperative cancellation.
//!
//! Each task runs on its own thread and waits on a stop channel between ticks,
//! so [`PeriodicTask::stop`] interrupts the wait immediately instead of waiting
//! out the interval. A tick can also end the task by returning
//! [`ControlFlow::Break`] (e.g. once the HUD is destroyed).

use std::ops::ControlFlow;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{RecvTimeoutError, Sender, bounded};

/// Handle to a running periodic task. Dropping it stops and joins the thread.
pub struct PeriodicTask {
    name: &'static str,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Run `tick` now and then every `interval` until stopped.
    pub fn spawn<F>(
        name: &'static str,
        interval: Duration,
        mut tick: F,
    ) -> Result<Self>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                log::debug!("{name}: started ({}ms period)", interval.as_millis());
                loop {
                    if tick().is_break() {
                        log::debug!("{name}: finished");
                        break;
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                            log::debug!("{name}: stopped");
                            break;
                        }
                    }
                }
            })
            .with_context(|| format!("failed to spawn {name} thread"))?;

        Ok(Self {
            name,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    #[inline]
    pub const fn name(&self) -> &'static str { self.name }

    /// Cancel the task and wait for the thread to exit. No tick runs afterwards.
    pub fn stop(mut self) { self.shutdown(); }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel, which also wakes the wait
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("{}: thread panicked", self.name);
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) { self.shutdown(); }
}
