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

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use anyhow::anyhow;
use parking_lot::Mutex;
use tracing::{error, trace};

use crate::common::{ActorId, SystemInner};
use crate::message::{CompletionCallback, Destructor, ExceptionHandler, Operation};
use crate::traits::Scheduler;

/// Binds one state object to a serial execution context multiplexed on a
/// shared scheduler.
///
/// Invariants:
/// * at most one turn per cell is queued or running (`scheduled` flag), so
///   no two operations against the same state object ever execute
///   concurrently, and the state mutex is never contended;
/// * operations execute in enqueue order;
/// * once disposal starts, the destructor is the last operation the mailbox
///   will ever hold.
pub(crate) struct ActorCell<T: Send + 'static> {
    id: ActorId,
    system: Weak<SystemInner>,
    scheduler: Arc<dyn Scheduler>,
    owns_scheduler: bool,
    state: Mutex<T>,
    mailbox: Mutex<VecDeque<Operation<T>>>,
    scheduled: AtomicBool,
    disposal: Mutex<DisposalPhase>,
    exception_handler: ExceptionHandler<T>,
    destructor: Mutex<Option<Destructor<T>>>,
}

/// Disposal progress. Completion callbacks that arrive while a disposal is
/// already in flight are queued and all delivered after the destructor runs,
/// so a concurrent `dispose` can never lose its completion.
enum DisposalPhase {
    Open,
    Closing(Vec<CompletionCallback>),
    Done,
}

impl<T: Send + 'static> ActorCell<T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: ActorId,
        system: Weak<SystemInner>,
        state: T,
        scheduler: Arc<dyn Scheduler>,
        owns_scheduler: bool,
        destructor: Option<Destructor<T>>,
        exception_handler: ExceptionHandler<T>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            system,
            scheduler,
            owns_scheduler,
            state: Mutex::new(state),
            mailbox: Mutex::new(VecDeque::new()),
            scheduled: AtomicBool::new(false),
            disposal: Mutex::new(DisposalPhase::Open),
            exception_handler,
            destructor: Mutex::new(destructor),
        })
    }

    pub(crate) fn id(&self) -> &ActorId {
        &self.id
    }

    /// Appends an operation to the mailbox and wakes the cell if it was idle.
    /// Operations enqueued at or after disposal are dropped silently.
    pub(crate) fn enqueue(self: &Arc<Self>, op: Operation<T>) {
        {
            let disposal = self.disposal.lock();
            if !matches!(*disposal, DisposalPhase::Open) {
                trace!(actor = %self.id, "operation dropped: actor disposed");
                return;
            }
            self.mailbox.lock().push_back(op);
        }
        self.request_turn();
    }

    /// Begins disposal: the destructor becomes the final mailbox operation,
    /// then the cell removes itself from the registry and `on_complete` is
    /// delivered on the timer context. Repeated calls only queue additional
    /// completion callbacks.
    pub(crate) fn dispose(self: &Arc<Self>, on_complete: Option<CompletionCallback>) {
        let mut on_complete = on_complete;
        let start_final = {
            let mut disposal = self.disposal.lock();
            match &mut *disposal {
                DisposalPhase::Open => {
                    *disposal = DisposalPhase::Closing(on_complete.take().into_iter().collect());
                    true
                }
                DisposalPhase::Closing(waiters) => {
                    if let Some(callback) = on_complete.take() {
                        waiters.push(callback);
                    }
                    false
                }
                DisposalPhase::Done => false,
            }
        };

        if start_final {
            trace!(actor = %self.id, "disposing");
            // The phase flip above already blocks new operations, so the
            // destructor is guaranteed to be the last thing in the mailbox.
            let cell = Arc::clone(self);
            self.mailbox.lock().push_back(Box::new(move |state: &mut T| {
                cell.finalize(state);
                Ok(())
            }));
            self.request_turn();
        } else if let Some(callback) = on_complete {
            // Disposal already finished; honor the completion contract.
            self.deliver_completions(vec![callback]);
        }
    }

    /// Queues a turn with the scheduler unless one is already in flight.
    fn request_turn(self: &Arc<Self>) {
        if self
            .scheduled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.schedule_turn();
        }
    }

    fn schedule_turn(self: &Arc<Self>) {
        let cell = Arc::clone(self);
        self.scheduler
            .schedule(&self.id, Box::new(move || cell.run_turn()));
    }

    /// Executes up to `throughput` operations, then either re-queues behind
    /// the scheduler's other actors or goes idle.
    fn run_turn(self: Arc<Self>) {
        let budget = self.scheduler.throughput().max(1);
        {
            let mut state = self.state.lock();
            for _ in 0..budget {
                let next = self.mailbox.lock().pop_front();
                let Some(op) = next else { break };
                self.invoke(&mut state, op);
            }
        }

        // Idle/wakeup handoff: clearing `scheduled` under the mailbox lock
        // means an enqueue can never observe an empty-looking cell that is
        // about to stop running.
        let mailbox = self.mailbox.lock();
        if mailbox.is_empty() {
            self.scheduled.store(false, Ordering::Release);
        } else {
            drop(mailbox);
            self.schedule_turn();
        }
    }

    /// Runs one operation, containing both `Err` results and panics: either
    /// is delivered to the exception handler and the mailbox keeps draining.
    fn invoke(&self, state: &mut T, op: Operation<T>) {
        match panic::catch_unwind(AssertUnwindSafe(|| op(&mut *state))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => self.handle_error(state, err),
            Err(payload) => {
                self.handle_error(state, anyhow!("operation panicked: {}", panic_note(&*payload)));
            }
        }
    }

    fn handle_error(&self, state: &mut T, err: anyhow::Error) {
        let handler_run =
            panic::catch_unwind(AssertUnwindSafe(|| (self.exception_handler)(&mut *state, &err)));
        if handler_run.is_err() {
            error!(actor = %self.id, error = %err, "exception handler panicked; original error dropped");
        }
    }

    /// The final mailbox operation: destructor, registry removal, owned
    /// scheduler teardown, completion delivery — in that order.
    fn finalize(self: &Arc<Self>, state: &mut T) {
        if let Some(destructor) = self.destructor.lock().take() {
            if panic::catch_unwind(AssertUnwindSafe(|| destructor(&mut *state))).is_err() {
                error!(actor = %self.id, "destructor panicked during disposal");
            }
        }

        if let Some(system) = self.system.upgrade() {
            system.registry.remove(&self.id.index());
        }

        if self.owns_scheduler {
            self.scheduler.destroy();
        }

        let waiters = {
            let mut disposal = self.disposal.lock();
            match mem::replace(&mut *disposal, DisposalPhase::Done) {
                DisposalPhase::Closing(waiters) => waiters,
                _ => Vec::new(),
            }
        };
        self.deliver_completions(waiters);
        trace!(actor = %self.id, "disposed");
    }

    fn deliver_completions(&self, callbacks: Vec<CompletionCallback>) {
        if let Some(system) = self.system.upgrade() {
            for callback in callbacks {
                system.timer.execute(callback);
            }
        } else {
            // System already gone; run inline rather than lose the signal.
            for callback in callbacks {
                callback();
            }
        }
    }
}

impl<T: Send + 'static> Debug for ActorCell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorCell").field("id", &self.id).finish()
    }
}

fn panic_note(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}

/// Registry-facing view of a cell: just enough to run the shutdown barrier.
pub(crate) trait DisposableCell: Send + Sync {
    fn dispose_with(&self, on_complete: CompletionCallback);
    fn cell_id(&self) -> &ActorId;
}

/// Type-erasing registry entry wrapping a concrete cell.
pub(crate) struct RegisteredCell<T: Send + 'static>(pub(crate) Arc<ActorCell<T>>);

impl<T: Send + 'static> DisposableCell for RegisteredCell<T> {
    fn dispose_with(&self, on_complete: CompletionCallback) {
        self.0.dispose(Some(on_complete));
    }

    fn cell_id(&self) -> &ActorId {
        self.0.id()
    }
}
