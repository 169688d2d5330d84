use crate::report::{ModuleRecords, ModuleSummary, Report};
use crate::reporter::chart::bar_chart;
use crate::reporter::serialize::format_timestamp;
use crate::reporter::{Error, Renderer};
use csv::Writer;
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const SUMMARY_SHEET: &str = "Summary";
pub const CHART_FILE: &str = "chart.txt";
pub const JSON_FILE: &str = "report.json";

const MODULE_HEADER: [&str; 8] = [
    "Sr No.",
    "Test Case Name",
    "Start Time",
    "End Time",
    "Total Time (seconds)",
    "Status",
    "Logs",
    "Comments",
];
const SUMMARY_HEADER: [&str; 4] = ["Module Name", "Total Test Cases", "Pass", "Fail"];

/// Writes the report as a directory of CSV sheets: one per module, a
/// `Summary` sheet, a text chart and the full report as JSON.
#[derive(Debug, Default)]
pub struct CsvWorkbook;

impl Renderer for CsvWorkbook {
    fn render(&self, report: &Report, destination: &Path) -> Result<(), Error> {
        publish(destination, |staging| write_workbook(report, staging))?;
        info!(
            "Report with {} modules written to {}",
            report.modules().len(),
            destination.display()
        );
        Ok(())
    }
}

fn write_workbook(report: &Report, dir: &Path) -> Result<(), Error> {
    let mut names = SheetNames::new();
    for group in report.modules() {
        let path = dir.join(format!("{}.csv", names.allocate(&group.module)));
        write_module_sheet(group, &path)?;
        debug!("Wrote {} records to {}", group.records.len(), path.display());
    }
    write_summary_sheet(report, &dir.join(format!("{}.csv", SUMMARY_SHEET)))?;
    fs::write(dir.join(CHART_FILE), bar_chart(report.summaries()))?;
    serde_json::to_writer_pretty(File::create(dir.join(JSON_FILE))?, report)?;
    Ok(())
}

/// Lets `write` fill a hidden sibling of `destination` and moves its files
/// into `destination` only once `write` succeeded. On failure the sibling is
/// removed and `destination` is left untouched.
pub fn publish<F>(destination: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&Path) -> Result<(), Error>,
{
    let staging = staging_dir(destination);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let result = write(&staging).and_then(|()| move_files(&staging, destination));
    if let Err(err) = fs::remove_dir_all(&staging) {
        warn!("Cannot remove staging directory {}: {}", staging.display(), err);
    }
    result
}

fn staging_dir(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_owned());
    destination.with_file_name(format!(".{}.partial", name))
}

fn move_files(from: &Path, to: &Path) -> Result<(), Error> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        fs::rename(entry.path(), to.join(entry.file_name()))?;
    }
    Ok(())
}

/// File-system safe sheet name for a module.
pub fn sheet_name(module: &str) -> String {
    let name: String = module
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | ' ' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if name.trim().is_empty() {
        "_".to_owned()
    } else {
        name
    }
}

/// Hands out one sheet name per module, numbering clashes `Summary1`,
/// `Summary2`, ... Names compare case-insensitively since the sheets share a
/// directory.
struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    fn new() -> Self {
        let mut taken = HashSet::new();
        taken.insert(SUMMARY_SHEET.to_lowercase());
        Self { taken }
    }

    fn allocate(&mut self, module: &str) -> String {
        let base = sheet_name(module);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !self.taken.insert(candidate.to_lowercase()) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        candidate
    }
}

fn write_module_sheet(group: &ModuleRecords, path: &Path) -> Result<(), Error> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(&MODULE_HEADER)?;
    for record in &group.records {
        writer.write_record(&[
            record.sequence_number.to_string(),
            record.name.clone(),
            format_timestamp(&record.start_time),
            format_timestamp(&record.end_time),
            record.duration_seconds.to_string(),
            record.status.to_string(),
            record.log_text.join("\n"),
            record.comment.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary_sheet(report: &Report, path: &Path) -> Result<(), Error> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(&SUMMARY_HEADER)?;
    for summary in report.summaries() {
        writer.write_record(&summary_row(summary))?;
    }
    writer.write_record(&["", "", "", ""])?;
    writer.write_record(&summary_row(report.grand_total()))?;
    writer.flush()?;
    Ok(())
}

fn summary_row(summary: &ModuleSummary) -> [String; 4] {
    [
        summary.module.clone(),
        summary.total.to_string(),
        summary.passed.to_string(),
        summary.failed.to_string(),
    ]
}
