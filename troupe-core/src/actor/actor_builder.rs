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

use std::sync::Arc;

use tracing::error;

use crate::actor::actor_cell::{ActorCell, RegisteredCell};
use crate::common::{ActorError, ActorId, ActorRef, ActorSystem};
use crate::message::{Destructor, ExceptionHandler};
use crate::traits::Scheduler;

/// How the actor's state object comes into existence: either pre-built by
/// the caller or produced by a factory at `build()` time.
pub(crate) enum StateInit<T> {
    Object(T),
    Constructor(Box<dyn FnOnce() -> T + Send + 'static>),
}

impl<T> StateInit<T> {
    fn into_state(self) -> T {
        match self {
            StateInit::Object(object) => object,
            StateInit::Constructor(constructor) => constructor(),
        }
    }
}

/// Configures and registers a single actor under an [`ActorSystem`].
///
/// Exactly one of [`object`](ActorBuilder::object) or
/// [`constructor`](ActorBuilder::constructor) must be supplied; everything
/// else is optional. Obtained from
/// [`ActorSystem::actor_builder`](crate::common::ActorSystem::actor_builder).
pub struct ActorBuilder<T: Send + 'static> {
    system: ActorSystem,
    object: Option<T>,
    constructor: Option<Box<dyn FnOnce() -> T + Send + 'static>>,
    destructor: Option<Destructor<T>>,
    scheduler: Option<(Arc<dyn Scheduler>, bool)>,
    name: Option<String>,
    exception_handler: Option<ExceptionHandler<T>>,
}

impl<T: Send + 'static> ActorBuilder<T> {
    pub(crate) fn new(system: ActorSystem) -> Self {
        Self {
            system,
            object: None,
            constructor: None,
            destructor: None,
            scheduler: None,
            name: None,
            exception_handler: None,
        }
    }

    /// Uses an existing state object for the actor being constructed.
    ///
    /// Mutually exclusive with [`constructor`](ActorBuilder::constructor).
    pub fn object(mut self, object: T) -> Self {
        self.object = Some(object);
        self
    }

    /// Uses a factory to create the state object. The factory runs
    /// synchronously, on the calling thread, during
    /// [`build`](ActorBuilder::build), before the actor is registered.
    pub fn constructor(mut self, constructor: impl FnOnce() -> T + Send + 'static) -> Self {
        self.constructor = Some(Box::new(constructor));
        self
    }

    /// Sets a destructor, run as the final mailbox operation when the actor
    /// is disposed.
    pub fn destructor(mut self, destructor: impl FnOnce(&mut T) + Send + 'static) -> Self {
        self.destructor = Some(Box::new(destructor));
        self
    }

    /// Sets a diagnostic name for the actor being constructed.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Binds the actor to a scheduler other than the system default.
    ///
    /// With `owning` set, the scheduler is destroyed when this actor is
    /// disposed. Sharing an owned scheduler with other actors is a
    /// mistake: once the owner disposes, the survivors' mailboxes can no
    /// longer drain.
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>, owning: bool) -> Self {
        self.scheduler = Some((scheduler, owning));
        self
    }

    /// Sets the handler invoked with `(state, error)` for every uncaught
    /// error raised by one of this actor's operations. The default handler
    /// logs the error and continues.
    pub fn exception_handler(
        mut self,
        handler: impl Fn(&mut T, &anyhow::Error) + Send + Sync + 'static,
    ) -> Self {
        self.exception_handler = Some(Box::new(handler));
        self
    }

    /// Creates the actor: validates the configuration, constructs the state
    /// object, registers the cell, and returns a handle.
    ///
    /// # Errors
    ///
    /// [`ActorError::InvalidBuilder`] when both or neither of
    /// `object`/`constructor` were supplied; [`ActorError::ShutdownInProgress`]
    /// or [`ActorError::ShutDown`] when the system is no longer running. In
    /// every error case the registry is left untouched.
    pub fn build(self) -> Result<ActorRef<T>, ActorError> {
        self.system.check_shutdown()?;

        let init = match (self.object, self.constructor) {
            (Some(_), Some(_)) => {
                return Err(ActorError::InvalidBuilder(
                    "not allowed to provide both object and constructor".into(),
                ))
            }
            (None, None) => {
                return Err(ActorError::InvalidBuilder(
                    "provide either object or constructor".into(),
                ))
            }
            (Some(object), None) => StateInit::Object(object),
            (None, Some(constructor)) => StateInit::Constructor(constructor),
        };
        let state = init.into_state();

        let name = self.name.unwrap_or_else(|| self.system.generate_name());
        let id = ActorId::new(self.system.next_index(), name.into());
        let (scheduler, owning) = self
            .scheduler
            .unwrap_or_else(|| (self.system.default_scheduler(), false));
        let exception_handler = self.exception_handler.unwrap_or_else(default_handler);

        let cell = ActorCell::new(
            id.clone(),
            self.system.downgrade(),
            state,
            scheduler,
            owning,
            self.destructor,
            exception_handler,
        );
        self.system
            .register(id.index(), Arc::new(RegisteredCell(Arc::clone(&cell))))?;
        Ok(ActorRef::from_cell(cell))
    }
}

fn default_handler<T>() -> ExceptionHandler<T> {
    Box::new(|_state, err| {
        error!(error = %err, "uncaught error in actor operation");
    })
}
