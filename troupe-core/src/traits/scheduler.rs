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

use crate::common::ActorId;

/// A type-erased unit of work handed to a [`Scheduler`].
///
/// The runtime submits at most one unit per actor at a time, so per-actor
/// FIFO ordering is preserved by any scheduler that simply executes the
/// units it receives.
pub type UnitOfWork = Box<dyn FnOnce() + Send + 'static>;

/// Capability that executes queued units of work on worker threads.
///
/// The actor system owns a shared default scheduler; individual actors may
/// be bound to a custom implementation instead (see
/// [`ActorBuilder::scheduler`](crate::prelude::ActorBuilder::scheduler)).
/// Implementations must uphold two properties:
///
/// * units scheduled for a fixed actor key run in submission order, and
/// * [`destroy`](Scheduler::destroy) is idempotent and releases the
///   underlying worker resources; units scheduled afterwards are dropped
///   silently.
///
/// Units must be short and non-blocking — a unit drains at most
/// [`throughput`](Scheduler::throughput) operations from one actor's mailbox
/// before the actor re-queues itself behind its peers.
pub trait Scheduler: Send + Sync + 'static {
    /// Submits a unit of work on behalf of the actor identified by `key`.
    fn schedule(&self, key: &ActorId, unit: UnitOfWork);

    /// Maximum consecutive mailbox operations one actor may run per turn.
    ///
    /// Larger values reduce per-actor scheduling overhead; smaller values
    /// yield sooner to other actors sharing this scheduler.
    fn throughput(&self) -> usize;

    /// Releases the scheduler's worker resources. Idempotent.
    fn destroy(&self);
}
