/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{instrument, trace};

use crate::actor::{ActorBuilder, DisposableCell};
use crate::common::timer::Timer;
use crate::common::{
    ActorError, ActorRef, ForkBuilder, PoolScheduler, ShutdownSignal, SystemPhase, CONFIG,
};
use crate::traits::Scheduler;

const SHUTDOWN_REASON: &str = "shutdown";

/// Produces names for actors built without an explicit one.
pub(crate) type NameGenerator = Box<dyn Fn() -> String + Send + Sync + 'static>;

/// The actor system: registry, default scheduler, timer, and the shutdown
/// barrier.
///
/// A system is a cheap-to-clone handle; all clones address the same
/// registry. Create one with [`ActorSystem::create`], build actors with
/// [`actor_of`](ActorSystem::actor_of) or
/// [`actor_builder`](ActorSystem::actor_builder), and tear everything down
/// with [`shutdown`](ActorSystem::shutdown).
#[derive(Clone)]
pub struct ActorSystem {
    pub(crate) inner: Arc<SystemInner>,
}

pub(crate) struct SystemInner {
    name: String,
    pub(crate) registry: DashMap<u64, Arc<dyn DisposableCell>>,
    scheduler: Arc<dyn Scheduler>,
    pub(crate) timer: Timer,
    next_index: AtomicU64,
    name_generator: NameGenerator,
    shutting_down: AtomicBool,
    shut_down: AtomicBool,
    phase: watch::Sender<SystemPhase>,
    signal: ShutdownSignal,
}

impl ActorSystem {
    /// Creates a new actor system with the specified name.
    ///
    /// The system owns a default [`PoolScheduler`] and a running timer task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn create(name: impl Into<String>) -> Self {
        let prefix = CONFIG.defaults.actor_name_prefix.clone();
        Self::create_with_names(name, move || {
            format!("{}-{:016x}", prefix, rand::random::<u64>())
        })
    }

    /// Creates a system with an injected name generator for actors built
    /// without an explicit name. Tests use this to get deterministic names.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn create_with_names(
        name: impl Into<String>,
        name_generator: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let (phase, phase_rx) = watch::channel(SystemPhase::Running);
        let inner = Arc::new(SystemInner {
            timer: Timer::start(&name),
            name,
            registry: DashMap::new(),
            scheduler: Arc::new(PoolScheduler::new()),
            next_index: AtomicU64::new(0),
            name_generator: Box::new(name_generator),
            shutting_down: AtomicBool::new(false),
            shut_down: AtomicBool::new(false),
            phase,
            signal: ShutdownSignal::new(phase_rx),
        });
        trace!(system = %inner.name, "actor system created");
        Self { inner }
    }

    /// The system's name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of actors currently registered.
    pub fn actor_count(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns a builder for configuring a new actor under this system.
    pub fn actor_builder<T: Send + 'static>(&self) -> ActorBuilder<T> {
        ActorBuilder::new(self.clone())
    }

    /// Creates an actor from a state factory, with a generated name.
    ///
    /// # Errors
    ///
    /// Fails when the system is shutting down or shut down.
    pub fn actor_of<T: Send + 'static>(
        &self,
        constructor: impl FnOnce() -> T + Send + 'static,
    ) -> Result<ActorRef<T>, ActorError> {
        self.actor_builder().constructor(constructor).build()
    }

    /// Creates an actor from a state factory, with an explicit name.
    ///
    /// # Errors
    ///
    /// Fails when the system is shutting down or shut down.
    pub fn actor_of_named<T: Send + 'static>(
        &self,
        name: impl Into<String>,
        constructor: impl FnOnce() -> T + Send + 'static,
    ) -> Result<ActorRef<T>, ActorError> {
        self.actor_builder()
            .constructor(constructor)
            .name(name)
            .build()
    }

    /// Returns a fork/join builder for fanning homogeneous work out to
    /// per-key child actors.
    pub fn fork_builder<I, T>(&self) -> ForkBuilder<I, T>
    where
        I: Clone + Eq + std::hash::Hash + Send + 'static,
        T: Send + 'static,
    {
        ForkBuilder::new(self.clone())
    }

    /// Initiates an orderly shutdown of the actor system.
    ///
    /// Idempotent: only the first caller starts the barrier, every caller
    /// receives the same completion signal. The barrier runs on the timer
    /// context: it snapshots the registered actors, disposes each (running
    /// destructors in their own mailbox contexts), and once the last
    /// disposal completes it destroys the default scheduler, stops the
    /// timer, and resolves the signal with reason `"shutdown"`.
    ///
    /// Actors created concurrently with shutdown are rejected; operations
    /// still queued when the scheduler is destroyed are abandoned without
    /// notification.
    #[instrument(skip(self), fields(system = %self.inner.name))]
    pub fn shutdown(&self) -> ShutdownSignal {
        if self
            .inner
            .shutting_down
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            trace!("shutdown initiated");
            self.inner.phase.send_replace(SystemPhase::ShuttingDown);
            let inner = Arc::clone(&self.inner);
            self.inner
                .timer
                .execute(Box::new(move || SystemInner::run_barrier(inner)));
        }
        self.shutdown_completable()
    }

    /// The system's shared one-time shutdown completion signal. Safe to call
    /// any number of times, before or after [`shutdown`](ActorSystem::shutdown).
    pub fn shutdown_completable(&self) -> ShutdownSignal {
        self.inner.signal.clone()
    }

    /// Synchronous query: has the system fully shut down?
    pub fn is_shut_down(&self) -> bool {
        self.inner.shut_down.load(Ordering::SeqCst)
    }

    /// Schedules `task` on the timer context after `delay`.
    ///
    /// Once the timer has stopped (the system shut down), this is a silent
    /// no-op.
    pub fn later(&self, delay: Duration, task: impl FnOnce() + Send + 'static) {
        self.inner.timer.later(delay, Box::new(task));
    }

    /// Registration guard: fails unless the system is still running.
    pub(crate) fn check_shutdown(&self) -> Result<(), ActorError> {
        if self.inner.shut_down.load(Ordering::SeqCst) {
            return Err(ActorError::ShutDown);
        }
        if self.inner.shutting_down.load(Ordering::SeqCst) {
            return Err(ActorError::ShutdownInProgress);
        }
        Ok(())
    }

    pub(crate) fn register(
        &self,
        index: u64,
        entry: Arc<dyn DisposableCell>,
    ) -> Result<(), ActorError> {
        self.check_shutdown()?;
        trace!(system = %self.inner.name, actor = %entry.cell_id(), "actor registered");
        self.inner.registry.insert(index, entry);
        // Shutdown may have started between the guard check and the insert;
        // withdraw the entry rather than leave an undisposable actor behind.
        if let Err(err) = self.check_shutdown() {
            self.inner.registry.remove(&index);
            return Err(err);
        }
        Ok(())
    }

    pub(crate) fn generate_name(&self) -> String {
        (self.inner.name_generator)()
    }

    pub(crate) fn next_index(&self) -> u64 {
        self.inner.next_index.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn default_scheduler(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.inner.scheduler)
    }

    pub(crate) fn downgrade(&self) -> Weak<SystemInner> {
        Arc::downgrade(&self.inner)
    }
}

impl SystemInner {
    /// Runs on the timer context: dispose every registered actor and count
    /// the completions down to the final teardown.
    fn run_barrier(inner: Arc<SystemInner>) {
        let cells: Vec<Arc<dyn DisposableCell>> = inner
            .registry
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        trace!(system = %inner.name, actors = cells.len(), "shutdown barrier started");

        if cells.is_empty() {
            SystemInner::finish(&inner);
            return;
        }

        let remaining = Arc::new(AtomicUsize::new(cells.len()));
        for cell in cells {
            let inner = Arc::clone(&inner);
            let remaining = Arc::clone(&remaining);
            // The completion callback runs on the timer context, so the
            // countdown and the final teardown are serialized there.
            cell.dispose_with(Box::new(move || {
                if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                    SystemInner::finish(&inner);
                }
            }));
        }
    }

    fn finish(inner: &Arc<SystemInner>) {
        inner.scheduler.destroy();
        inner.timer.stop();
        inner.shut_down.store(true, Ordering::SeqCst);
        inner.phase.send_replace(SystemPhase::ShutDown {
            reason: SHUTDOWN_REASON.to_string(),
        });
        trace!(system = %inner.name, "actor system shut down");
    }
}

impl Debug for ActorSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorSystem")
            .field("name", &self.inner.name)
            .field("actors", &self.inner.registry.len())
            .finish()
    }
}

impl Display for ActorSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ActorSystem {}", self.inner.name)
    }
}
