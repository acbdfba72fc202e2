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

use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use derive_new::new;

/// Stable identifier for one actor within its system.
///
/// The registry index is generated by the system at build time and never
/// reused; the name is a diagnostic label (user-supplied or generated).
/// Identity comparisons use the index alone, so two actors that share a
/// display name remain distinct. Ids are only meaningful within the system
/// that issued them.
#[derive(Debug, Clone, new)]
pub struct ActorId {
    index: u64,
    name: Arc<str>,
}

impl ActorId {
    /// The actor's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn index(&self) -> u64 {
        self.index
    }
}

impl PartialEq for ActorId {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for ActorId {}

impl Hash for ActorId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}
