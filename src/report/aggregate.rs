use crate::report::model::{ModuleRecords, ModuleSummary, Report, TestRecord, GRAND_TOTAL};
use std::collections::HashMap;

/// Groups records by module, keeping modules in the order they first appear.
pub fn aggregate(records: Vec<TestRecord>) -> Report {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut modules: Vec<ModuleRecords> = Vec::new();
    let mut summaries: Vec<ModuleSummary> = Vec::new();
    let mut grand_total = ModuleSummary::new(GRAND_TOTAL);

    for record in records {
        let position = match index.get(&record.module) {
            Some(position) => *position,
            None => {
                index.insert(record.module.clone(), modules.len());
                modules.push(ModuleRecords {
                    module: record.module.clone(),
                    records: Vec::new(),
                });
                summaries.push(ModuleSummary::new(record.module.clone()));
                modules.len() - 1
            }
        };
        summaries[position].count(record.status);
        grand_total.count(record.status);
        modules[position].records.push(record);
    }

    for summary in &summaries {
        debug!(
            "Module '{}': {} total, {} passed, {} failed",
            summary.module, summary.total, summary.passed, summary.failed
        );
    }
    Report::new(modules, summaries, grand_total)
}
