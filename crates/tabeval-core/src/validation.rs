use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::table::Table;

/// Check that both tables carry the same set of column names.
///
/// Column order and row counts are ignored. On mismatch the error lists the
/// names found in only one of the two tables, sorted.
pub fn validate_same_columns(ai: &Table, truth: &Table) -> Result<()> {
    let ai_columns = ai.columns().iter().collect::<BTreeSet<_>>();
    let truth_columns = truth.columns().iter().collect::<BTreeSet<_>>();

    if ai_columns == truth_columns {
        return Ok(());
    }

    Err(Error::SchemaMismatch {
        only_in_ai: ai_columns
            .difference(&truth_columns)
            .map(|name| name.to_string())
            .collect(),
        only_in_truth: truth_columns
            .difference(&ai_columns)
            .map(|name| name.to_string())
            .collect(),
    })
}

/// Check that rows can be aligned by index.
pub fn validate_row_counts(ai: &Table, truth: &Table) -> Result<()> {
    if ai.row_count() != truth.row_count() {
        return Err(Error::RowCountMismatch {
            ai_rows: ai.row_count(),
            truth_rows: truth.row_count(),
        });
    }
    Ok(())
}
