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

#![forbid(unsafe_code)]
// #![warn(missing_docs)]
//! Troupe Core Library
//!
//! This library provides the core functionality for the Troupe actor runtime:
//! the actor system and registry, the mailbox-to-scheduler binding that gives
//! every actor serial access to its own state, the request/reply protocol,
//! and the cooperative system-wide shutdown barrier.

/// Common utilities and structures used throughout the Troupe runtime.
pub(crate) mod common;

pub(crate) mod actor;
pub(crate) mod message;
/// Trait definitions used in the Troupe runtime.
pub(crate) mod traits;

/// Prelude module for convenient imports.
///
/// This module re-exports the items most users need from the `actor`,
/// `common`, `message`, and `traits` modules.
pub mod prelude {
    pub use crate::actor::ActorBuilder;
    pub use crate::common::{
        ActorError, ActorId, ActorRef, ActorSystem, ForkBuilder, PoolScheduler, ShutdownSignal,
        SystemPhase, TroupeConfig, CONFIG,
    };
    pub use crate::message::Reply;
    pub use crate::traits::{Scheduler, UnitOfWork};
}
