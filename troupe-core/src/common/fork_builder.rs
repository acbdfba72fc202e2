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

use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::{ActorError, ActorSystem};
use crate::message::Reply;

/// Fans homogeneous work out to per-key child actors and joins the replies
/// into one keyed result.
///
/// For every key, [`ask`](ForkBuilder::ask) builds a child actor from the
/// key→state factory and issues a request; each reply is stored under its
/// key, and when the last key reports in, the result callback fires exactly
/// once with the completed map. The insert and the became-full check are
/// atomic, so two replies landing at the same instant cannot double-fire.
///
/// Obtained from [`ActorSystem::fork_builder`].
pub struct ForkBuilder<I, T> {
    system: ActorSystem,
    ids: Vec<I>,
    constructor: Option<Arc<dyn Fn(&I) -> T + Send + Sync + 'static>>,
}

impl<I, T> ForkBuilder<I, T>
where
    I: Clone + Eq + Hash + Send + 'static,
    T: Send + 'static,
{
    pub(crate) fn new(system: ActorSystem) -> Self {
        Self {
            system,
            ids: Vec::new(),
            constructor: None,
        }
    }

    /// Adds the keys to fan out over. Keys form an ordered set: duplicates
    /// are dropped, first occurrence wins.
    pub fn ids(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self
    }

    /// Sets the factory that builds each child actor's state from its key.
    pub fn constructor(mut self, constructor: impl Fn(&I) -> T + Send + Sync + 'static) -> Self {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Builds one child actor per key, asks each with `action`, and joins:
    /// `result` fires exactly once, with the map of every key's reply.
    ///
    /// An empty key set fires `result` immediately with an empty map. Child
    /// actors stay registered until the system shuts down.
    ///
    /// # Errors
    ///
    /// [`ActorError::InvalidBuilder`] when no constructor was supplied;
    /// registration errors when the system is no longer running.
    pub fn ask<R: Send + 'static>(
        self,
        action: impl Fn(&I, &mut T, Reply<R>) -> anyhow::Result<()> + Send + Sync + 'static,
        result: impl FnOnce(HashMap<I, R>) + Send + 'static,
    ) -> Result<(), ActorError> {
        let constructor = self.constructor.ok_or_else(|| {
            ActorError::InvalidBuilder("provide a constructor before ask".into())
        })?;

        if self.ids.is_empty() {
            result(HashMap::new());
            return Ok(());
        }

        let total = self.ids.len();
        let replies: Arc<Mutex<HashMap<I, R>>> =
            Arc::new(Mutex::new(HashMap::with_capacity(total)));
        let remaining = Arc::new(AtomicUsize::new(total));
        let result = Arc::new(Mutex::new(Some(result)));
        let action = Arc::new(action);

        for id in self.ids {
            let child = {
                let constructor = Arc::clone(&constructor);
                let id = id.clone();
                self.system.actor_of(move || constructor(&id))?
            };

            let action = Arc::clone(&action);
            let ask_id = id.clone();
            let replies = Arc::clone(&replies);
            let remaining = Arc::clone(&remaining);
            let result = Arc::clone(&result);
            child.ask(
                move |state, reply| action(&ask_id, state, reply),
                move |value| {
                    replies.lock().insert(id, value);
                    // The final decrement is the atomic became-full edge:
                    // exactly one reply observes it and takes the map.
                    if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                        let joined = mem::take(&mut *replies.lock());
                        if let Some(callback) = result.lock().take() {
                            callback(joined);
                        }
                    }
                },
            );
        }
        Ok(())
    }
}
