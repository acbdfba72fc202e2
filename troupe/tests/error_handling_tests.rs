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

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::anyhow;
use parking_lot::Mutex;
use troupe::prelude::*;

use crate::setup::{
    actors::{counter::Counter, journal::Journal},
    drain_mailbox, initialize_tracing,
};
mod setup;

/// An `Err` from an operation reaches the exception handler with the state
/// object, and the mailbox keeps draining.
#[tokio::test]
async fn operation_error_reaches_handler_and_mailbox_continues() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("errors");

    let handled: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&handled);
    let actor = system
        .actor_builder()
        .object(Counter { count: 7 })
        .exception_handler(move |state, err| {
            sink.lock().push(format!("count={} err={}", state.count, err));
        })
        .build()?;

    actor.tell(|_| Err(anyhow!("boom")));
    actor.tell(|counter| {
        counter.count += 1;
        Ok(())
    });
    drain_mailbox(&actor).await;

    assert_eq!(handled.lock().clone(), vec!["count=7 err=boom"]);

    let (tx, rx) = tokio::sync::oneshot::channel();
    actor.ask(
        |counter, reply| {
            reply.send(counter.count);
            Ok(())
        },
        move |count| {
            let _ = tx.send(count);
        },
    );
    assert_eq!(rx.await?, 8);

    system.shutdown().completed().await;
    Ok(())
}

/// A panicking operation is contained exactly like an `Err`: the handler
/// fires and later operations still run.
#[tokio::test]
async fn panicking_operation_is_contained() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("errors");

    let handled: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&handled);
    let actor = system
        .actor_builder()
        .constructor(Counter::default)
        .exception_handler(move |_, err| {
            sink.lock().push(err.to_string());
        })
        .build()?;

    actor.tell(|_| panic!("kaboom"));
    actor.tell(|counter| {
        counter.count += 1;
        Ok(())
    });
    drain_mailbox(&actor).await;

    let messages = handled.lock().clone();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("kaboom"), "got: {}", messages[0]);

    system.shutdown().completed().await;
    Ok(())
}

/// Without a custom handler the default logs and continues; the actor
/// stays available.
#[tokio::test]
async fn default_handler_keeps_actor_available() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("errors");

    let actor = system.actor_of(Counter::default)?;
    for _ in 0..3 {
        actor.tell(|_| Err(anyhow!("transient")));
    }
    actor.tell(|counter| {
        counter.count = 99;
        Ok(())
    });

    let (tx, rx) = tokio::sync::oneshot::channel();
    actor.ask(
        |counter, reply| {
            reply.send(counter.count);
            Ok(())
        },
        move |count| {
            let _ = tx.send(count);
        },
    );
    assert_eq!(rx.await?, 99);

    system.shutdown().completed().await;
    Ok(())
}

/// Errors inside an `ask` action follow the same policy: the handler fires
/// and the next queued operation executes. The asker is not notified — a
/// failure channel must be part of the reply contract.
#[tokio::test]
async fn failing_ask_action_does_not_break_the_mailbox() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("errors");

    let journal = Journal::default();
    let log = journal.entries.clone();
    let actor = system
        .actor_builder()
        .object(journal)
        .exception_handler(|state, _err| state.record("handled"))
        .build()?;

    actor.ask(
        |_, _reply: Reply<()>| Err(anyhow!("ask failed before replying")),
        |_| {},
    );
    actor.tell(|j| {
        j.record("next");
        Ok(())
    });
    drain_mailbox(&actor).await;

    assert_eq!(log.lock().clone(), vec!["handled", "next"]);

    system.shutdown().completed().await;
    Ok(())
}
