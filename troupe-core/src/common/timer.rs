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

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use futures::future::Either;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::message::Task;

/// Dedicated background context for delayed tasks and shutdown orchestration.
///
/// One timer exists per actor system. Tasks submitted through `execute` and
/// `later` run serially on the timer's own task, never on scheduler workers.
/// Once stopped, further submissions are silent no-ops and any tasks still
/// queued are abandoned.
#[derive(Debug, Clone)]
pub(crate) struct Timer {
    tx: mpsc::UnboundedSender<TimerCmd>,
    cancel: CancellationToken,
}

enum TimerCmd {
    Execute(Task),
    Later(Duration, Task),
}

impl Timer {
    /// Spawns the timer task. Must be called within a Tokio runtime.
    pub(crate) fn start(system_name: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let name = system_name.to_owned();
        tokio::spawn(run(rx, cancel.clone(), name));
        Self { tx, cancel }
    }

    /// Runs `task` on the timer context as soon as possible.
    pub(crate) fn execute(&self, task: Task) {
        if self.cancel.is_cancelled() || self.tx.send(TimerCmd::Execute(task)).is_err() {
            trace!("timer stopped; immediate task dropped");
        }
    }

    /// Runs `task` on the timer context after `delay`. Silent no-op once the
    /// timer has stopped.
    pub(crate) fn later(&self, delay: Duration, task: Task) {
        if self.cancel.is_cancelled() || self.tx.send(TimerCmd::Later(delay, task)).is_err() {
            trace!("timer stopped; delayed task dropped");
        }
    }

    /// Stops the timer task. Idempotent; queued tasks are abandoned.
    pub(crate) fn stop(&self) {
        self.cancel.cancel();
    }
}

/// A delayed task ordered by deadline; `seq` keeps submissions with equal
/// deadlines FIFO.
struct Delayed {
    at: Instant,
    seq: u64,
    task: Task,
}

impl PartialEq for Delayed {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for Delayed {}

impl PartialOrd for Delayed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Delayed {
    // Reversed so the earliest deadline sits on top of the max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other.at.cmp(&self.at).then(other.seq.cmp(&self.seq))
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<TimerCmd>, cancel: CancellationToken, name: String) {
    let mut queue: BinaryHeap<Delayed> = BinaryHeap::new();
    let mut seq: u64 = 0;

    loop {
        let sleep = match queue.peek() {
            Some(entry) => Either::Left(tokio::time::sleep_until(entry.at)),
            None => Either::Right(std::future::pending::<()>()),
        };

        tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = rx.recv() => match cmd {
                Some(TimerCmd::Execute(task)) => task(),
                Some(TimerCmd::Later(delay, task)) => {
                    queue.push(Delayed { at: Instant::now() + delay, seq, task });
                    seq += 1;
                }
                None => break,
            },
            _ = sleep => {
                if let Some(due) = queue.pop() {
                    (due.task)();
                }
            }
        }
    }

    trace!(system = %name, "timer stopped");
}
