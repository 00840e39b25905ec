//! Annotation record model and DTOs.

use annotator_core::export::AnnotationRow;
use annotator_core::types::{ChromId, DbId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `annotations` table. Chromosomes are stored as integers;
/// translation to Roman-numeral names happens only at the read/export
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Annotation {
    pub id: DbId,
    pub strain: String,
    pub chrom: ChromId,
    pub event: String,
    pub loh: String,
    pub transition_label: String,
    pub bd_left: i64,
    pub bd_right: i64,
    pub user_id: UserId,
}

impl Annotation {
    /// Shape this record for the read/export boundary: the owner column is
    /// dropped and never leaves the store layer.
    pub fn into_row(self) -> AnnotationRow {
        AnnotationRow {
            id: self.id,
            strain: self.strain,
            chromosome: self.chrom,
            event_type: self.event,
            loh_class: self.loh,
            transition_label: self.transition_label,
            left: self.bd_left,
            right: self.bd_right,
        }
    }
}

/// DTO for creating an annotation. Carries no owner; the repository stamps
/// the acting principal unconditionally.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub strain: String,
    pub chrom: ChromId,
    pub event: String,
    pub loh: String,
    pub transition_label: String,
    pub bd_left: i64,
    pub bd_right: i64,
}

/// Optional exact-match search filters. An absent or empty filter imposes
/// no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationFilter {
    pub strain: Option<String>,
    pub chrom: Option<ChromId>,
    pub event: Option<String>,
}
