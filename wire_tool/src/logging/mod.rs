use log4rs::config::Deserializers;

mod default_pattern;
mod stderr_appender;

/// Size of the stack buffer each log record is encoded into.
const WRITE_BUF_SIZE: usize = 1024;

/// Gets the deserializers for the `log` table of the config.
///
/// `color` overrides the appenders' own color setting.
pub fn deserializers(color: Option<bool>) -> Deserializers {
    let mut d = Deserializers::new();
    d.insert("stderr", stderr_appender::StderrAppenderDeserializer { color });
    d.insert("default", default_pattern::DefaultPatternDeserializer);
    d
}
