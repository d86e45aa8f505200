//! Real-time driver for a [`Session`].
//!
//! [`SimulationRunner::spawn`] moves a session into a tokio task that ticks
//! it at [`Session::tick_delay`]. Every operation, automatic or manual, goes
//! through one mutex, so at most one cycle is in flight at a time. The mutex
//! is never held across an `.await`.
//!
//! # Behavior
//!
//! - Paused: the loop parks until woken by [`SessionHandle::resume`] or
//!   [`SessionHandle::full_reset`].
//! - Running: the loop sleeps for the step delay, then ticks. In training
//!   mode the delay is zero and the loop only yields to the runtime
//!   between cycles.
//! - A delay or training-mode change applies from the next scheduled tick.
//! - Pausing during a wait prevents the pending tick from running a cycle.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::Result;
use crate::gridworld::Position;
use crate::learning::HyperParamsUpdate;
use crate::session::{CellView, CycleReport, EpisodeStats, Session, SessionSnapshot};

struct Shared {
    session: Mutex<Session>,
    wake: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        // a panicked cycle leaves the session readable
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Cloneable handle for reading and controlling a running session.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<Shared>,
}

impl SessionHandle {
    /// Runs `f` with exclusive access to the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.shared.lock())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().snapshot()
    }

    pub fn stats(&self) -> EpisodeStats {
        self.shared.lock().stats().clone()
    }

    pub fn position(&self) -> Position {
        self.shared.lock().position()
    }

    pub fn policy_grid(&self) -> Vec<CellView> {
        self.shared.lock().policy_grid()
    }

    pub fn is_paused(&self) -> bool {
        self.shared.lock().is_paused()
    }

    pub fn pause(&self) {
        self.shared.lock().pause();
    }

    pub fn resume(&self) {
        self.shared.lock().resume();
        self.shared.wake.notify_one();
    }

    /// Runs one cycle now, in any state.
    pub fn advance_one_step(&self) -> CycleReport {
        self.shared.lock().advance_one_step()
    }

    pub fn full_reset(&self) {
        self.shared.lock().full_reset();
        self.shared.wake.notify_one();
    }

    pub fn set_config(&self, update: HyperParamsUpdate) {
        self.shared.lock().set_config(update);
    }

    pub fn set_simulation_speed(&self, ms: u64) {
        self.shared.lock().set_simulation_speed(ms);
    }
}

/// Owns the ticking task of one session.
pub struct SimulationRunner {
    handle: SessionHandle,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SimulationRunner {
    /// Starts ticking `session` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(session: Session) -> Self {
        info!(session = %session.id(), "simulation runner started");
        let shared = Arc::new(Shared {
            session: Mutex::new(session),
            wake: Notify::new(),
        });
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(Arc::clone(&shared), shutdown_rx));

        Self {
            handle: SessionHandle { shared },
            shutdown,
            task,
        }
    }

    /// A handle for controlling the session from other tasks.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stops the loop and returns the session in its final state.
    ///
    /// # Errors
    ///
    /// [`Error::TaskFailed`](crate::Error::TaskFailed) if the loop panicked.
    pub async fn shutdown(self) -> Result<Session> {
        // The receiver is gone only if the task already ended; join reports why.
        let _ = self.shutdown.send(true);
        self.task.await?;

        let session = self.handle.with_session(|s| s.clone());
        info!(
            session = %session.id(),
            total_steps = session.stats().total_steps,
            "simulation runner stopped"
        );
        Ok(session)
    }
}

async fn run_loop(shared: Arc<Shared>, mut shutdown: watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            break;
        }

        let delay = {
            let session = shared.lock();
            if session.is_paused() {
                None
            } else {
                Some(session.tick_delay())
            }
        };

        match delay {
            None => {
                tokio::select! {
                    _ = shared.wake.notified() => {}
                    _ = shutdown.changed() => break,
                }
                continue;
            }
            Some(d) if d.is_zero() => tokio::task::yield_now().await,
            Some(d) => {
                tokio::select! {
                    _ = tokio::time::sleep(d) => {}
                    _ = shutdown.changed() => break,
                }
            }
        }

        if let Some(report) = shared.lock().tick() {
            if let Some(episode) = report.finished_episode {
                debug!(episode, win = report.step.is_win(), "runner finished episode");
            }
        }
    }
}
