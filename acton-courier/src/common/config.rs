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

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up under the `acton` XDG prefix.
pub const CONFIG_FILE_NAME: &str = "courier.toml";

/// Configuration for the messaging core.
///
/// Loaded from a TOML file in XDG-compliant directories. Every section and field is
/// optional; missing values fall back to their defaults.
///
/// ```toml
/// [limits]
/// mailbox_capacity = 1024
///
/// [timeouts]
/// system_shutdown_ms = 5000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Limits and capacity configuration
    pub limits: LimitsConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
}

/// Limits and capacity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Capacity of each actor's bounded data queue. Local dispatch to a full
    /// mailbox waits for space.
    pub mailbox_capacity: usize,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound for [`Courier::shutdown`](crate::common::Courier::shutdown) to wait
    /// for receive loops, in milliseconds
    pub system_shutdown_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 255,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            system_shutdown_ms: 30_000,
        }
    }
}

impl CourierConfig {
    /// Convert system shutdown timeout to Duration
    #[must_use]
    pub const fn system_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.system_shutdown_ms)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or a field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&text)?)
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `$XDG_CONFIG_HOME/acton/courier.toml` (usually
    /// `~/.config/acton/courier.toml`). If no configuration file is found, returns the
    /// default configuration. If a configuration file exists but is malformed, logs an
    /// error and uses defaults.
    #[must_use]
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("acton") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let Some(path) = xdg_dirs.find_config_file(CONFIG_FILE_NAME) else {
            info!("No configuration file found, using defaults");
            return Self::default();
        };

        info!("Loading configuration from: {}", path.display());
        match Self::from_path(&path) {
            Ok(config) => {
                info!("Successfully loaded configuration");
                config
            }
            Err(e) => {
                error!("Failed to load configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: CourierConfig = CourierConfig::load();
}
