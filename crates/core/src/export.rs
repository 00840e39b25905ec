//! Export formatting for annotation result sets.
//!
//! Rows arrive owner-filtered with integer chromosome ids; the formatter
//! translates ids back to Roman-numeral names, drops the owner, and writes
//! a spreadsheet-style file with a fixed column order.

use serde::{Deserialize, Serialize};

use crate::chromosome::id_to_chrom;
use crate::error::CoreError;
use crate::types::{ChromId, DbId};

/// Export/download filename.
pub const EXPORT_FILENAME: &str = "annotation.csv";

/// Fixed export header order. The owner column is never exported.
pub const EXPORT_HEADER: [&str; 8] = [
    "ID",
    "Strain",
    "Chromosome",
    "Event type",
    "LOH class",
    "Transition label",
    "Left",
    "Right",
];

/// An annotation row at the read/export boundary, chromosome still as the
/// stored integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRow {
    pub id: DbId,
    pub strain: String,
    pub chromosome: ChromId,
    pub event_type: String,
    pub loh_class: String,
    pub transition_label: String,
    pub left: i64,
    pub right: i64,
}

/// A display/export row, chromosome translated to its Roman-numeral name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub id: DbId,
    pub strain: String,
    pub chromosome: String,
    pub event_type: String,
    pub loh_class: String,
    pub transition_label: String,
    pub left: i64,
    pub right: i64,
}

/// Translate stored rows into display rows.
///
/// Chromosome ids outside the static mapping cannot come from this
/// system's own writes; they are reported as an internal error rather
/// than silently dropped.
pub fn display_rows(rows: &[AnnotationRow]) -> Result<Vec<DisplayRow>, CoreError> {
    rows.iter()
        .map(|row| {
            let chromosome = id_to_chrom(row.chromosome)
                .ok_or_else(|| {
                    CoreError::Internal(format!("unmapped chromosome id {}", row.chromosome))
                })?
                .to_string();
            Ok(DisplayRow {
                id: row.id,
                strain: row.strain.clone(),
                chromosome,
                event_type: row.event_type.clone(),
                loh_class: row.loh_class.clone(),
                transition_label: row.transition_label.clone(),
                left: row.left,
                right: row.right,
            })
        })
        .collect()
}

/// Serialize display rows to CSV bytes with the fixed header order.
pub fn write_csv(rows: &[DisplayRow]) -> Result<Vec<u8>, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| CoreError::Internal(format!("csv write failed: {e}")))?;
    for row in rows {
        writer
            .write_record([
                row.id.to_string(),
                row.strain.clone(),
                row.chromosome.clone(),
                row.event_type.clone(),
                row.loh_class.clone(),
                row.transition_label.clone(),
                row.left.to_string(),
                row.right.to_string(),
            ])
            .map_err(|e| CoreError::Internal(format!("csv write failed: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("csv write failed: {e}")))
}
