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

//! A till actor totalling a grocery run: fire-and-forget updates, one
//! request/reply readback, then an orderly shutdown.

use tokio::sync::oneshot;
use troupe::prelude::*;

struct Till {
    total_cents: u64,
    items: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let system = ActorSystem::create("grocery");

    let till = system.actor_of_named("till", || Till {
        total_cents: 0,
        items: 0,
    })?;

    for price in [249u64, 120, 599, 75] {
        till.tell(move |till| {
            till.total_cents += price;
            till.items += 1;
            Ok(())
        });
    }

    // The readback is queued behind the four updates, so it sees all of them.
    let (tx, rx) = oneshot::channel();
    till.ask(
        |till, reply| {
            reply.send((till.items, till.total_cents));
            Ok(())
        },
        move |summary| {
            let _ = tx.send(summary);
        },
    );

    let (items, total_cents) = rx.await?;
    println!(
        "{} items, total ${}.{:02}",
        items,
        total_cents / 100,
        total_cents % 100
    );

    let reason = system.shutdown().completed().await;
    println!("system stopped: {reason}");
    Ok(())
}
