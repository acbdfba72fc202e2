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

use tokio::sync::watch;

/// Lifecycle phase of an actor system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemPhase {
    /// Accepting registrations and executing operations.
    Running,
    /// Shutdown has started; registrations are rejected, disposals are draining.
    ShuttingDown,
    /// Every actor has been disposed and shared resources released.
    ShutDown {
        /// Why the system shut down.
        reason: String,
    },
}

/// Observation handle for an actor system's one-time shutdown completion.
///
/// Every clone observes the same underlying signal; the signal resolves
/// exactly once, when the last actor's disposal has completed and the shared
/// scheduler and timer have been released.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<SystemPhase>,
}

impl ShutdownSignal {
    pub(crate) fn new(rx: watch::Receiver<SystemPhase>) -> Self {
        Self { rx }
    }

    /// Resolves with the shutdown reason once the system has fully shut down.
    ///
    /// If the system is dropped without ever completing a shutdown, this
    /// future stays pending, mirroring a completion that never happens.
    pub async fn completed(mut self) -> String {
        loop {
            {
                let phase = self.rx.borrow();
                if let SystemPhase::ShutDown { reason } = &*phase {
                    return reason.clone();
                }
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Synchronous query: has the system fully shut down?
    pub fn is_complete(&self) -> bool {
        matches!(&*self.rx.borrow(), SystemPhase::ShutDown { .. })
    }

    /// The system's current lifecycle phase.
    pub fn phase(&self) -> SystemPhase {
        self.rx.borrow().clone()
    }
}
