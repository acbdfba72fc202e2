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

//! Defines common internal type aliases for mailbox payloads and callbacks.
//!
//! This module centralizes the closure shapes that travel through the runtime:
//! the operations queued in an actor's mailbox, the per-actor error and
//! teardown hooks, and the plain callbacks handed across thread contexts.

use anyhow::Error;

/// Crate-internal: a single queued mailbox operation. Receives exclusive
/// access to the actor's state object; an `Err` result is routed to the
/// actor's exception handler without interrupting the mailbox.
pub(crate) type Operation<T> = Box<dyn FnOnce(&mut T) -> anyhow::Result<()> + Send + 'static>;

/// Crate-internal: per-actor handler invoked with the state object and the
/// error raised by a failed operation.
pub(crate) type ExceptionHandler<T> = Box<dyn Fn(&mut T, &Error) + Send + Sync + 'static>;

/// Crate-internal: optional teardown hook, run as the final mailbox
/// operation during disposal.
pub(crate) type Destructor<T> = Box<dyn FnOnce(&mut T) + Send + 'static>;

/// Crate-internal: callback delivered on the timer context once an actor's
/// disposal has fully completed.
pub(crate) type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Crate-internal: a plain deferred task for the timer context.
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;
