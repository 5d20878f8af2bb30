use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use binary16::Half;
use clap::{Parser, Subcommand};

mod config;
mod logging;
mod report;
mod shapes;
mod term;


const DEFAULT_CONFIG: &str = include_str!("../assets/default_config.toml");

/// Inspects half-precision floats and tagged binary collections.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// An additional config file.
    ///
    /// It is applied after `wire_tool.toml` and before `WIRE_TOOL__`
    /// environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override whether this program outputs color.
    ///
    /// Auto-detection is performed, but in case it is wrong, you may use this
    /// to override the default.
    #[arg(long, global = true)]
    color: Option<bool>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Narrows decimal values to half precision and describes the results.
    Half {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Describes raw half-precision bit patterns, given in hex.
    Bits {
        #[arg(required = true, value_parser = report::parse_bits)]
        bits: Vec<u16>,
    },

    /// Writes a sample collection of shapes and colors to a file.
    Demo {
        /// The file to write. It is replaced if it exists.
        out: PathBuf,
    },

    /// Decodes a collection file and lists its items.
    Dump {
        /// The file to read.
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // run the program and clean up
    let res = run(cli);
    if let Err(why) = &res {
        log::error!("Exiting due to error: {why:?}");
    }

    log::logger().flush();
    res
}

fn run(cli: Cli) -> anyhow::Result<()> {
    use crate::term::style::Palette;

    let config = build_config(cli.config.as_deref())?;
    init_logging(config.log, cli.color)?;

    log::debug!("wire_tool v{}", env!("CARGO_PKG_VERSION"));

    let mut stdout = io::stdout().lock();
    let palette = Palette::new(term::use_color(cli.color, &stdout));

    match cli.command {
        Command::Half { values } => {
            for value in values {
                report::HalfReport::narrowed(value).write(&mut stdout, palette)?;
            }
        },
        Command::Bits { bits } => {
            for bits in bits {
                report::HalfReport::new(Half::from_bits(bits)).write(&mut stdout, palette)?;
            }
        },
        Command::Demo { out } => write_demo(&out, config.demo.count)?,
        Command::Dump { input } => {
            let items = read_collection(&input)?;
            report::write_items(&mut stdout, &items, config.dump.limit, palette)?;
        },
    }

    stdout.flush()?;
    Ok(())
}

fn build_config(extra: Option<&Path>) -> anyhow::Result<config::Config> {
    use crate::config::setup::{Builder, Env, File, TomlText};

    Builder::new()
        .add_layer(TomlText::new(DEFAULT_CONFIG))
        .add_layer(File::new("wire_tool.toml").required(false))
        .add_opt_layer(extra.map(File::new))
        .add_layer(Env::prefixed("WIRE_TOOL__"))
        .build()
}

fn init_logging(config: log4rs::config::RawConfig, color: Option<bool>) -> anyhow::Result<()> {
    let deserializers = logging::deserializers(color);
    let (appenders, errors) = config.appenders_lossy(&deserializers);
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let config = log4rs::Config::builder()
        .appenders(appenders)
        .loggers(config.loggers())
        .build(config.root())?;

    log4rs::init_config(config)?;
    Ok(())
}

fn write_demo(path: &Path, count: usize) -> anyhow::Result<()> {
    let items = shapes::demo_items(count);
    let bytes = tagged_wire::encode_collection(&items).context("cannot encode demo collection")?;

    std::fs::write(path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;

    log::info!(
        "Wrote {} items ({} bytes) to {}.",
        items.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

fn read_collection(path: &Path) -> anyhow::Result<Vec<Box<dyn tagged_wire::DynPayload>>> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let items = tagged_wire::decode_collection(&bytes, &shapes::SHAPES)
        .with_context(|| format!("{} is not a valid collection", path.display()))?;

    log::info!("Read {} items from {}.", items.len(), path.display());
    Ok(items)
}
