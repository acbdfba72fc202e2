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

//! Common structures of the runtime: the system, handles, schedulers, the
//! shutdown signal, and configuration.

pub use actor_id::ActorId;
pub use actor_ref::ActorRef;
pub use actor_system::ActorSystem;
pub use config::{TroupeConfig, CONFIG};
pub use fork_builder::ForkBuilder;
pub use pool_scheduler::PoolScheduler;
pub use shutdown::{ShutdownSignal, SystemPhase};
pub use system_error::ActorError;

pub(crate) use actor_system::SystemInner;

mod actor_id;
mod actor_ref;
mod actor_system;
mod config;
mod fork_builder;
mod pool_scheduler;
mod shutdown;
mod system_error;
pub(crate) mod timer;
