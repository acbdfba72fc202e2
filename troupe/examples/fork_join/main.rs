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

//! Fan a word-counting request out to one child actor per text shard, then
//! join the per-shard counts into a single map.

use std::collections::HashMap;

use tokio::sync::oneshot;
use troupe::prelude::*;

struct Shard {
    text: &'static str,
}

fn shard_text(name: &str) -> &'static str {
    match name {
        "intro" => "an actor is a plain struct behind a mailbox",
        "body" => "operations run one at a time in enqueue order",
        "outro" => "shutdown waits for every destructor",
        _ => "",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let system = ActorSystem::create("word-count");

    let (tx, rx) = oneshot::channel::<HashMap<&'static str, usize>>();
    system
        .fork_builder()
        .ids(["intro", "body", "outro"])
        .constructor(|name| Shard {
            text: shard_text(name),
        })
        .ask(
            |_name, shard, reply| {
                reply.send(shard.text.split_whitespace().count());
                Ok(())
            },
            move |counts| {
                let _ = tx.send(counts);
            },
        )?;

    let counts = rx.await?;
    for (shard, words) in &counts {
        println!("{shard}: {words} words");
    }
    println!("total: {} words", counts.values().sum::<usize>());

    system.shutdown().completed().await;
    Ok(())
}
