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
#![forbid(missing_docs)] // Keep this to enforce coverage

//! # Troupe
//!
//! This crate is the public face of the Troupe actor runtime, built on top
//! of Tokio. An actor is any plain Rust struct: the runtime gives it a
//! mailbox and guarantees that operations against it run one at a time, in
//! enqueue order, with no locking inside actor logic — however many actors
//! share the worker pool.
//!
//! ## Key Concepts
//!
//! - **Actors**: user state objects owned by an actor cell; never touched
//!   by two operations at once.
//! - **Handles (`ActorRef`)**: cheap, shareable references exposing `tell`
//!   (fire-and-forget) and `ask` (request/reply) as closures over the state.
//! - **Schedulers**: the `Scheduler` capability multiplexes actors over the
//!   Tokio worker pool with configurable per-turn throughput; custom
//!   implementations can be supplied per actor.
//! - **System (`ActorSystem`)**: the registry and lifecycle authority, with
//!   a dedicated timer context for delayed work and an idempotent,
//!   observable shutdown barrier.
//! - **Fork/join (`ForkBuilder`)**: fans a request out to per-key child
//!   actors and joins the replies into one keyed map.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use troupe::prelude::*;
//!
//! struct Counter { count: u64 }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let system = ActorSystem::create("demo");
//!     let counter = system.actor_of(|| Counter { count: 0 })?;
//!
//!     counter.tell(|c| { c.count += 1; Ok(()) });
//!     counter.ask(
//!         |c, reply| { reply.send(c.count); Ok(()) },
//!         |count| println!("count = {count}"),
//!     );
//!
//!     system.shutdown().completed().await;
//!     Ok(())
//! }
//! ```

/// Prelude module for convenient imports.
///
/// Re-exports the entire `troupe-core` prelude: the system, builders,
/// handles, scheduler capability, and the reply handle.
pub mod prelude {
    pub use troupe_core::prelude::*;
}

pub use troupe_core::prelude::{
    ActorBuilder, ActorError, ActorId, ActorRef, ActorSystem, ForkBuilder, PoolScheduler, Reply,
    Scheduler, ShutdownSignal, SystemPhase, TroupeConfig, UnitOfWork, CONFIG,
};
