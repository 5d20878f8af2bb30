//! Defines a `"default"` [`PatternEncoder`].
//!
//! This just serves to avoid repeating the pattern in every config layer.

use log4rs::config::Deserialize;
use log4rs::encode::Encode;
use log4rs::encode::pattern::PatternEncoder;

#[derive(Debug, serde::Deserialize)]
pub struct DefaultPatternConfig {
    #[serde(default)]
    time: bool,
}

pub struct DefaultPatternDeserializer;

impl DefaultPatternConfig {
    fn pattern(&self) -> &'static str {
        if self.time {
            "[{d(%Y-%m-%d %H:%M:%S)(utc)} {h({l:<5})} {t}] {m}{n}"
        } else {
            "[{h({l:<5})} {t}] {m}{n}"
        }
    }
}

impl Deserialize for DefaultPatternDeserializer {
    type Trait = dyn Encode;
    type Config = DefaultPatternConfig;

    fn deserialize(
        &self,
        config: Self::Config,
        _deserializers: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<Self::Trait>> {
        Ok(Box::new(PatternEncoder::new(config.pattern())))
    }
}
