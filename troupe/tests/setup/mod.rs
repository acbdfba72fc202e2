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
use std::sync::Once;

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use troupe::prelude::*;

// Declare the submodules.
pub mod actors;

// Ensures tracing initialization happens only once across all tests.
static INIT: Once = Once::new();

/// Initializes the global tracing subscriber for tests.
///
/// Log levels are controlled through `RUST_LOG`; the default keeps the
/// suite quiet. `std::sync::Once` makes repeated calls from different
/// tests harmless.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Waits until every operation enqueued before this call has executed, by
/// riding the mailbox's FIFO guarantee with a probe `ask`.
pub async fn drain_mailbox<T: Send + 'static>(actor: &ActorRef<T>) {
    let (tx, rx) = tokio::sync::oneshot::channel();
    actor.ask(
        |_, reply| {
            reply.send(());
            Ok(())
        },
        move |_| {
            let _ = tx.send(());
        },
    );
    rx.await.expect("actor dropped the drain probe");
}
