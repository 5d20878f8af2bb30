use serde::Deserialize;

pub mod setup;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub dump: DumpConfig,
    #[serde(default)]
    pub log: log4rs::config::RawConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of items the demo collection holds.
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Maximum number of items printed per collection.
    pub limit: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { count: 12 }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self { limit: 256 }
    }
}
