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

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Configuration for the Troupe runtime
///
/// This struct contains the configurable values for the runtime, loaded from
/// TOML files in XDG-compliant directories. Only knobs the runtime actually
/// reads are exposed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TroupeConfig {
    /// Scheduler configuration
    pub scheduler: SchedulerConfig,
    /// Default values configuration
    pub defaults: DefaultsConfig,
}

/// Scheduler-related configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum consecutive mailbox operations one actor runs per turn on the
    /// default scheduler
    pub throughput: usize,
}

/// Default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Prefix used for generated actor names
    pub actor_name_prefix: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { throughput: 10 }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            actor_name_prefix: "actor".to_string(),
        }
    }
}

impl TroupeConfig {
    /// Load configuration from XDG-compliant locations
    ///
    /// Attempts to load `config.toml` from the `troupe` XDG prefix (e.g.
    /// `$XDG_CONFIG_HOME/troupe/config.toml`). If no configuration file is
    /// found, returns the default configuration. If a configuration file
    /// exists but is malformed, logs an error and uses defaults.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("troupe") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let config_path = xdg_dirs.find_config_file("config.toml");

        if let Some(path) = config_path {
            info!("Loading configuration from: {}", path.display());
            match std::fs::read_to_string(&path) {
                Ok(config_str) => match toml::from_str::<Self>(&config_str) {
                    Ok(config) => config,
                    Err(e) => {
                        error!(
                            "Failed to parse configuration file {}: {}",
                            path.display(),
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    error!(
                        "Failed to read configuration file {}: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: TroupeConfig = TroupeConfig::load();
}
