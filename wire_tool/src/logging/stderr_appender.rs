//! Provides a buffered console logger writing to `stderr`.
//!
//! Each record is encoded into a stack buffer and written with a single lock
//! of `stderr`, so lines from the report on `stdout` don't get split.
//!
//! This appender type is available as `"stderr"` in the configuration.

use std::io::{self, Write as _};

use arrayvec::ArrayVec;
use log::Record;
use log4rs::append::Append;
use log4rs::config::{Deserialize, Deserializers};
use log4rs::encode::{self, Encode, EncoderConfig, Style};

use super::WRITE_BUF_SIZE;
use crate::term;

#[derive(Debug)]
pub struct StderrAppender {
    encoder: Box<dyn Encode>,
    color: bool,
}

impl Append for StderrAppender {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        let mut writer = StderrWriter {
            color: self.color,
            buf: ArrayVec::new_const(),
        };
        self.encoder.encode(&mut writer, record)?;
        Ok(writer.flush()?)
    }

    fn flush(&self) {
        _ = io::stderr().flush();
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct StderrAppenderConfig {
    color: Option<bool>,
    encoder: EncoderConfig,
}

/// Deserializes [`StderrAppender`]s, with `color` taking precedence over
/// the config.
pub struct StderrAppenderDeserializer {
    pub color: Option<bool>,
}

impl Deserialize for StderrAppenderDeserializer {
    type Trait = dyn Append;
    type Config = StderrAppenderConfig;

    fn deserialize(
        &self,
        config: Self::Config,
        deserializers: &Deserializers,
    ) -> anyhow::Result<Box<Self::Trait>> {
        let encoder = deserializers.deserialize(&config.encoder.kind, config.encoder.config)?;
        let color = term::use_color(self.color.or(config.color), &io::stderr());

        Ok(Box::new(StderrAppender { encoder, color }))
    }
}

/// Stack-buffered writer.
///
/// If a write exceeds the capacity, its buffer is flushed to stderr first.
#[derive(Debug)]
struct StderrWriter {
    color: bool,
    buf: ArrayVec<u8, WRITE_BUF_SIZE>,
}

impl io::Write for StderrWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.buf.remaining_capacity() < buf.len() {
            self.flush()?;
        }

        if buf.len() > self.buf.capacity() {
            io::stderr().write(buf)
        } else {
            self.buf.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(&self.buf)?;
        self.buf.clear();
        stderr.flush()
    }
}

impl encode::Write for StderrWriter {
    fn set_style(&mut self, style: &Style) -> io::Result<()> {
        use log4rs::encode::Color;

        use crate::term::style::*;

        if !self.color {
            return Ok(());
        }

        self.write_all(RESET.as_bytes())?;

        if let Some(text) = style.text {
            let code = match text {
                Color::Black => BLACK,
                Color::Red => RED,
                Color::Green => GREEN,
                Color::Yellow => YELLOW,
                Color::Blue => BLUE,
                Color::Magenta => MAGENTA,
                Color::Cyan => CYAN,
                Color::White => WHITE,
            };
            self.write_all(code.as_bytes())?;
        }

        if let Some(background) = style.background {
            let code = match background {
                Color::Black => BLACK_BG,
                Color::Red => RED_BG,
                Color::Green => GREEN_BG,
                Color::Yellow => YELLOW_BG,
                Color::Blue => BLUE_BG,
                Color::Magenta => MAGENTA_BG,
                Color::Cyan => CYAN_BG,
                Color::White => WHITE_BG,
            };
            self.write_all(code.as_bytes())?;
        }

        if style.intense == Some(true) {
            self.write_all(BOLD.as_bytes())?;
        }

        Ok(())
    }
}
