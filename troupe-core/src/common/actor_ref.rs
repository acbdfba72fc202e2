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
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use static_assertions::assert_impl_all;

use crate::actor::ActorCell;
use crate::common::ActorId;
use crate::message::Reply;

/// Shareable external reference to one actor.
///
/// A handle never grants direct access to the state object: all interaction
/// goes through the actor's mailbox, which executes operations one at a time
/// in enqueue order. Handles are cheap to clone and compare by actor
/// identity.
pub struct ActorRef<T: Send + 'static> {
    cell: Arc<ActorCell<T>>,
}

impl<T: Send + 'static> ActorRef<T> {
    pub(crate) fn from_cell(cell: Arc<ActorCell<T>>) -> Self {
        Self { cell }
    }

    /// Fire-and-forget: enqueues `action` against the actor's state and
    /// returns immediately.
    ///
    /// An `Err` result (or a panic) inside the action is delivered to the
    /// actor's exception handler; later operations still execute. Operations
    /// enqueued after the actor was disposed are dropped silently.
    ///
    /// Actions run on scheduler workers and must not block; express waiting
    /// as a continuation enqueued from a callback instead.
    pub fn tell(&self, action: impl FnOnce(&mut T) -> anyhow::Result<()> + Send + 'static) {
        self.cell.enqueue(Box::new(action));
    }

    /// Request/reply: enqueues `action` with a one-shot [`Reply`] handle;
    /// `callback` fires with the replied value, on the thread that invokes
    /// [`Reply::send`].
    ///
    /// The action may move the handle into nested operations and reply
    /// later, or drop it, in which case the callback never fires. There is
    /// no separate failure channel — encode failure in the reply value.
    pub fn ask<R: Send + 'static>(
        &self,
        action: impl FnOnce(&mut T, Reply<R>) -> anyhow::Result<()> + Send + 'static,
        callback: impl FnOnce(R) + Send + 'static,
    ) {
        self.cell.enqueue(Box::new(move |state: &mut T| {
            let reply = Reply::new(Box::new(callback));
            action(state, reply)
        }));
    }

    /// Disposes the actor: its destructor (if any) becomes the final mailbox
    /// operation, after which the actor is removed from the system registry.
    /// Idempotent.
    pub fn dispose(&self) {
        self.cell.dispose(None);
    }

    /// The actor's stable identifier.
    pub fn id(&self) -> &ActorId {
        self.cell.id()
    }

    /// The actor's diagnostic name.
    pub fn name(&self) -> &str {
        self.cell.id().name()
    }
}

impl<T: Send + 'static> Clone for ActorRef<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Send + 'static> PartialEq for ActorRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cell.id() == other.cell.id()
    }
}

impl<T: Send + 'static> Eq for ActorRef<T> {}

impl<T: Send + 'static> Hash for ActorRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cell.id().hash(state);
    }
}

impl<T: Send + 'static> Debug for ActorRef<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef").field("id", self.cell.id()).finish()
    }
}

assert_impl_all!(ActorRef<String>: Send, Sync, Clone);
