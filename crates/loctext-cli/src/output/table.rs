//! Coverage comparison and its table rendering.

use std::collections::BTreeSet;

use comfy_table::{CellAlignment, ContentArrangement, Table, presets};
use serde::Serialize;

/// How one locale's keys compare to the source locale's keys.
#[derive(Debug, Serialize)]
pub struct LanguageCoverage {
    /// Locale directory name (e.g., "jp", "de").
    pub language: String,
    pub translated: usize,
    pub total: usize,
    /// Source keys the locale lacks, sorted.
    pub missing: Vec<String>,
    /// Keys only the locale defines, sorted.
    pub extra: Vec<String>,
}

impl LanguageCoverage {
    pub fn compare(
        language: &str,
        source: &BTreeSet<String>,
        target: &BTreeSet<String>,
    ) -> Self {
        Self {
            language: language.to_owned(),
            translated: source.intersection(target).count(),
            total: source.len(),
            missing: source.difference(target).cloned().collect(),
            extra: target.difference(source).cloned().collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    fn percent(&self) -> String {
        if self.total == 0 {
            return "-".to_owned();
        }
        let ratio = self.translated as f64 / self.total as f64;
        format!("{:.0}%", ratio * 100.0)
    }
}

/// One row per locale: counts, percentage, and sizes of the key differences.
pub fn format_coverage_table(coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Locale", "Keys", "%", "Missing", "Extra"]);

    for entry in coverage {
        table.add_row(vec![
            entry.language.clone(),
            format!("{}/{}", entry.translated, entry.total),
            entry.percent(),
            entry.missing.len().to_string(),
            entry.extra.len().to_string(),
        ]);
    }
    for index in 1..=4 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}
