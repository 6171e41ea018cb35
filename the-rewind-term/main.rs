//! Terminal driver for the-rewind.
//!
//! Reads one editing command per line from a script file or stdin and runs
//! it against a single session. `--demo` replays a scripted tour instead.

mod demo;
mod script;

use std::{
  fs::File,
  io::{
    self,
    BufReader,
  },
  path::{
    Path,
    PathBuf,
  },
};

use clap::{
  ArgAction,
  Parser,
};
use eyre::{
  Result,
  WrapErr,
};
use the_rewind::{
  config::SessionConfig,
  session::Session,
};

#[derive(Debug, Parser)]
#[command(name = "rewind")]
#[command(about = "Reversible text editing from the terminal")]
struct Cli {
  /// Replay the built-in tour instead of reading commands
  #[arg(long)]
  demo: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file instead of stderr
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// Script with one command per line; stdin when omitted
  script: Option<PathBuf>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbosity, cli.log_file.as_deref())?;

  let config = match cli.config_file.as_deref() {
    Some(path) => {
      SessionConfig::load(path)
        .wrap_err_with(|| format!("failed to load {}", path.display()))?
    },
    None => SessionConfig::default(),
  };
  log::debug!("starting session with {config:?}");

  let mut session = Session::new(&config);
  let mut out = io::stdout().lock();

  if cli.demo {
    return demo::run(&mut session, &mut out);
  }

  match cli.script {
    Some(path) => {
      let file =
        File::open(&path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
      script::run(&mut session, BufReader::new(file), &mut out)
    },
    None => script::run(&mut session, io::stdin().lock(), &mut out),
  }
}

fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  let dispatch = fern::Dispatch::new()
    .level(level)
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    });

  let dispatch = match log_file {
    Some(path) => {
      dispatch.chain(
        fern::log_file(path).wrap_err_with(|| format!("failed to open {}", path.display()))?,
      )
    },
    None => dispatch.chain(io::stderr()),
  };

  dispatch.apply()?;
  Ok(())
}
