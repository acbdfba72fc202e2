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

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;
use troupe::prelude::*;

use crate::setup::initialize_tracing;
mod setup;

fn hash(id: &str) -> u64 {
    id.bytes().fold(7u64, |acc, b| acc.wrapping_mul(31) + u64::from(b))
}

/// Per-key child actors each answer once; the result callback fires exactly
/// once with the completed map.
#[tokio::test]
async fn fork_join_joins_every_key() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("fork");

    let invocations = Arc::new(AtomicUsize::new(0));
    let fired = Arc::clone(&invocations);
    let (tx, rx) = oneshot::channel::<HashMap<String, u64>>();

    system
        .fork_builder()
        .ids(["a", "b", "c"].map(String::from))
        .constructor(|id| id.clone())
        .ask(
            |id, _state, reply| {
                reply.send(hash(id));
                Ok(())
            },
            move |result| {
                fired.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(result);
            },
        )?;

    let result = rx.await?;
    assert_eq!(result.len(), 3);
    assert_eq!(result["a"], hash("a"));
    assert_eq!(result["b"], hash("b"));
    assert_eq!(result["c"], hash("c"));
    assert_eq!(invocations.load(Ordering::SeqCst), 1);

    // One child actor exists per key until shutdown reaps them.
    assert_eq!(system.actor_count(), 3);
    system.shutdown().completed().await;
    assert_eq!(system.actor_count(), 0);
    Ok(())
}

/// Replies landing simultaneously on the worker pool still fire the result
/// callback exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn simultaneous_replies_fire_once() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("fork");

    let invocations = Arc::new(AtomicUsize::new(0));
    let fired = Arc::clone(&invocations);
    let (tx, rx) = oneshot::channel::<usize>();

    let keys: Vec<u32> = (0..64).collect();
    system
        .fork_builder()
        .ids(keys)
        .constructor(|key| *key)
        .ask(
            |_key, state, reply| {
                reply.send(u64::from(*state) * 2);
                Ok(())
            },
            move |result: HashMap<u32, u64>| {
                fired.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(result.len());
            },
        )?;

    assert_eq!(rx.await?, 64);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);

    system.shutdown().completed().await;
    Ok(())
}

/// The key collection is an ordered set: duplicates collapse and the
/// threshold matches the unique count.
#[tokio::test]
async fn duplicate_keys_are_deduplicated() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("fork");

    let (tx, rx) = oneshot::channel::<HashMap<String, u64>>();
    system
        .fork_builder()
        .ids(["a", "a", "b", "a"].map(String::from))
        .constructor(|id| id.clone())
        .ask(
            |id, _state, reply| {
                reply.send(hash(id));
                Ok(())
            },
            move |result| {
                let _ = tx.send(result);
            },
        )?;

    let result = rx.await?;
    assert_eq!(result.len(), 2);
    assert_eq!(system.actor_count(), 2);

    system.shutdown().completed().await;
    Ok(())
}

/// An empty key set completes immediately with an empty map.
#[tokio::test]
async fn empty_key_set_completes_immediately() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("fork");

    let (tx, rx) = oneshot::channel::<HashMap<String, u64>>();
    system
        .fork_builder()
        .ids(Vec::<String>::new())
        .constructor(|id| id.clone())
        .ask(
            |id, _state, reply| {
                reply.send(hash(id));
                Ok(())
            },
            move |result| {
                let _ = tx.send(result);
            },
        )?;

    assert!(rx.await?.is_empty());
    system.shutdown().completed().await;
    Ok(())
}

/// Forgetting the constructor is a configuration error, surfaced before any
/// child is built.
#[tokio::test]
async fn missing_constructor_is_rejected() -> anyhow::Result<()> {
    initialize_tracing();
    let system = ActorSystem::create("fork");

    let result = system
        .fork_builder::<String, String>()
        .ids(["a"].map(String::from))
        .ask(
            |_id, _state, reply: Reply<u64>| {
                reply.send(0);
                Ok(())
            },
            |_result| {},
        );

    assert!(matches!(result, Err(ActorError::InvalidBuilder(_))));
    assert_eq!(system.actor_count(), 0);

    system.shutdown().completed().await;
    Ok(())
}
