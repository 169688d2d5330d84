// #![forbid(unsafe_code)]
// #![deny(non_upper_case_globals)]
// #![deny(non_camel_case_types)]
// #![deny(non_snake_case)]
// #![deny(unused_mut)]
// #![deny(unused_variables)]
// #![deny(unused_imports)]
//#![deny(missing_docs)]
//#![deny(warnings)]

#[macro_use]
extern crate log;

mod configuration;
mod report;
mod reporter;
mod time;
mod xml;

use log::LevelFilter;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::thread;
use structopt::StructOpt;

use self::configuration::command_line::{LogLevel, Opt};
use self::configuration::settings::Settings;
use self::report::{aggregate, Extractor};
use self::reporter::{CsvWorkbook, Renderer};
use self::xml::document;

fn main() {
    let options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        exit(1);
    }

    let mut settings = match Settings::load(options.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load report configuration {}", e);
            exit(1);
        }
    };
    options.apply_to(&mut settings);
    debug!("Initiated configuration {:#?}", settings);

    let jobs: Vec<(PathBuf, PathBuf)> = match options.inputs.as_slice() {
        [input] => vec![(input.clone(), settings.output.clone())],
        inputs => inputs
            .iter()
            .map(|input| (input.clone(), settings.output.join(report_dir_name(input))))
            .collect(),
    };

    let failures = if jobs.len() == 1 {
        let (input, destination) = &jobs[0];
        run_and_log(&settings.extractor(), input, destination) as usize
    } else {
        // Every input gets its own extractor and report, nothing is shared.
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|(input, destination)| {
                let extractor = settings.extractor();
                thread::spawn(move || run_and_log(&extractor, &input, &destination))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(true))
            .filter(|failed| *failed)
            .count()
    };

    if failures > 0 {
        error!("{} of {} reports could not be generated", failures, options.inputs.len());
        exit(1);
    }
}

#[derive(Debug)]
enum RunError {
    Document(xml::Error),
    Extract(report::Error),
    Render(reporter::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::Document(e) => fmt::Display::fmt(e, f),
            RunError::Extract(e) => fmt::Display::fmt(e, f),
            RunError::Render(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Logs the outcome of one input, returns `true` when it failed.
fn run_and_log(extractor: &Extractor, input: &Path, destination: &Path) -> bool {
    info!("Generating report for {}", input.display());
    match run(extractor, input, destination) {
        Ok(()) => false,
        Err(e) => {
            error!("Failed to generate report for {}: {}", input.display(), e);
            true
        }
    }
}

fn run(extractor: &Extractor, input: &Path, destination: &Path) -> Result<(), RunError> {
    let package = document::load(input).map_err(RunError::Document)?;
    let document = package.as_document();
    let root = document::root_element(&document).map_err(RunError::Document)?;
    let records = extractor.extract(&root).map_err(RunError::Extract)?;
    let report = aggregate(records);
    let total = report.grand_total();
    info!(
        "{}: {} tests, {} passed, {} failed",
        input.display(),
        total.total,
        total.passed,
        total.failed
    );
    CsvWorkbook
        .render(&report, destination)
        .map_err(RunError::Render)
}

fn report_dir_name(input: &Path) -> PathBuf {
    input
        .file_stem()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report"))
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
