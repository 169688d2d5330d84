use crate::report::ModuleSummary;
use std::fmt::Write;

pub const TITLE: &str = "Test Results Summary";
const WIDTH: usize = 40;

/// Horizontal bar chart of passed and failed tests per module, scaled so the
/// largest count spans the full width.
pub fn bar_chart(summaries: &[ModuleSummary]) -> String {
    let label_width = summaries
        .iter()
        .map(|s| s.module.chars().count())
        .chain(std::iter::once("Module".len()))
        .max()
        .unwrap_or_default();
    let largest = summaries
        .iter()
        .map(|s| s.passed.max(s.failed))
        .max()
        .unwrap_or_default();

    let mut chart = String::new();
    let _ = writeln!(chart, "{}", TITLE);
    let _ = writeln!(chart, "{:<w$}  Number of Test Cases", "Module", w = label_width);
    for summary in summaries {
        let _ = writeln!(
            chart,
            "{:<w$}  Pass |{} {}",
            summary.module,
            bar(summary.passed, largest, '#'),
            summary.passed,
            w = label_width
        );
        let _ = writeln!(
            chart,
            "{:<w$}  Fail |{} {}",
            "",
            bar(summary.failed, largest, 'x'),
            summary.failed,
            w = label_width
        );
    }
    chart
}

fn bar(count: usize, largest: usize, fill: char) -> String {
    if largest == 0 {
        return String::new();
    }
    let length = (count * WIDTH + largest - 1) / largest;
    std::iter::repeat(fill).take(length).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(module: &str, passed: usize, failed: usize) -> ModuleSummary {
        ModuleSummary {
            module: module.to_owned(),
            total: passed + failed,
            passed,
            failed,
        }
    }

    #[test]
    fn test_bars_are_scaled_to_largest_count() {
        let chart = bar_chart(&[summary("Login", 4, 2), summary("Recipe", 0, 1)]);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[2], format!("Login   Pass |{} 4", "#".repeat(40)));
        assert_eq!(lines[3], format!("        Fail |{} 2", "x".repeat(20)));
        assert_eq!(lines[4], "Recipe  Pass | 0");
        assert_eq!(lines[5], format!("        Fail |{} 1", "x".repeat(10)));
    }

    #[test]
    fn test_empty_summary_has_only_headings() {
        assert_eq!(bar_chart(&[]).lines().count(), 2);
    }
}
