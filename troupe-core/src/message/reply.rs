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

use tracing::debug;

/// One-shot reply handle passed to an `ask` action.
///
/// Sending consumes the handle, so an action can reply at most once; the
/// type system enforces it rather than a runtime guard. The handle may be
/// moved into nested operations and sent later, from whatever thread ends up
/// running them — the ask callback executes synchronously on that thread.
///
/// Dropping an unsent `Reply` is legal: the ask callback simply never fires.
pub struct Reply<R> {
    callback: Option<Box<dyn FnOnce(R) + Send + 'static>>,
}

impl<R> Reply<R> {
    pub(crate) fn new(callback: Box<dyn FnOnce(R) + Send + 'static>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Delivers the reply value to the asker's callback.
    pub fn send(mut self, value: R) {
        if let Some(callback) = self.callback.take() {
            callback(value);
        }
    }
}

impl<R> Drop for Reply<R> {
    fn drop(&mut self) {
        if self.callback.is_some() {
            debug!("ask reply dropped without a value; the callback stays pending");
        }
    }
}

impl<R> Debug for Reply<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}
