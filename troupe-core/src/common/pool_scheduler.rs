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

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::trace;

use crate::common::{ActorId, CONFIG};
use crate::traits::{Scheduler, UnitOfWork};

/// Worker-pool scheduler backed by the ambient Tokio runtime.
///
/// This is the default scheduler owned by every actor system. Each unit of
/// work is spawned onto the runtime's worker threads, so actors sharing this
/// scheduler interleave at `throughput` granularity. The runtime handle is
/// captured at construction, which keeps `tell`/`ask` usable from threads
/// outside the runtime.
///
/// After [`destroy`](Scheduler::destroy), scheduling requests are dropped
/// silently and units already queued are skipped rather than run.
#[derive(Debug)]
pub struct PoolScheduler {
    handle: Handle,
    throughput: usize,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl PoolScheduler {
    /// Creates a scheduler with the configured default throughput.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_throughput(CONFIG.scheduler.throughput)
    }

    /// Creates a scheduler with an explicit throughput (clamped to ≥ 1).
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn with_throughput(throughput: usize) -> Self {
        Self {
            handle: Handle::current(),
            throughput: throughput.max(1),
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        }
    }
}

impl Default for PoolScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for PoolScheduler {
    fn schedule(&self, key: &ActorId, unit: UnitOfWork) {
        if self.cancel.is_cancelled() {
            trace!(actor = %key, "unit scheduled after destroy; dropped");
            return;
        }
        let cancel = self.cancel.clone();
        self.tracker.spawn_on(
            async move {
                // Re-check: destroy may have raced the spawn.
                if !cancel.is_cancelled() {
                    unit();
                }
            },
            &self.handle,
        );
    }

    fn throughput(&self) -> usize {
        self.throughput
    }

    fn destroy(&self) {
        self.cancel.cancel();
        self.tracker.close();
    }
}
