use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use crate::configuration::settings::{Settings, TraversalMode};
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

arg_enum! {
    #[derive(Debug, Clone, Copy)]
    pub enum Mode {
        Nested, Flat,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Squish XML3 result files to turn into reports
    #[structopt(parse(from_os_str), required = true, min_values = 1)]
    pub inputs: Vec<PathBuf>,

    /// Set a custom configuration file. Supported: YAML, JSON, TOML, HJSON
    #[structopt(long, short = "c", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Directory the report is written to
    #[structopt(long, short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Keep logs of passed tests too, not only of failed ones
    #[structopt(long, short = "a")]
    pub all_logs: bool,

    /// How test units are discovered in the result file
    #[structopt(case_insensitive = true, long, short = "s", possible_values = &Mode::variants())]
    pub strategy: Option<Mode>,

    /// Module keyword, may be repeated. Replaces the configured keywords
    #[structopt(long = "module", short = "m")]
    pub modules: Vec<String>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl Opt {
    /// Values given on the command line win over the loaded settings.
    pub fn apply_to(&self, settings: &mut Settings) {
        if self.all_logs {
            settings.include_all_logs = true;
        }
        if let Some(mode) = self.strategy {
            settings.strategy = mode.into();
        }
        if !self.modules.is_empty() {
            settings.module_keywords = self.modules.clone();
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
    }
}

impl From<Mode> for TraversalMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Nested => TraversalMode::Nested,
            Mode::Flat => TraversalMode::Flat,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
