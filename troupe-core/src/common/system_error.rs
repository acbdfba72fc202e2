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

/// Represents errors that can occur while configuring or registering actors.
///
/// Operation errors (failures inside a queued `tell`/`ask` action) never
/// surface here — they are routed to the owning actor's exception handler.
#[derive(Debug)]
pub enum ActorError {
    /// The actor builder was given an invalid combination of options.
    InvalidBuilder(String),
    /// The actor system has started shutting down; no new actors may register.
    ShutdownInProgress,
    /// The actor system has completed its shutdown.
    ShutDown,
}

impl std::fmt::Display for ActorError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ActorError::InvalidBuilder(msg) => write!(f, "Invalid actor builder: {}", msg),
            ActorError::ShutdownInProgress => {
                write!(f, "Cannot add actor: actor system shutdown in progress")
            }
            ActorError::ShutDown => write!(f, "Cannot add actor: actor system is shut down"),
        }
    }
}

impl std::error::Error for ActorError {}
