//! Draft annotation assembly and submit gating.

use serde::{Deserialize, Serialize};

/// Placeholder value of the event-type dropdown before a real selection.
pub const EVENT_TYPE_PLACEHOLDER: &str = "Unknown";

/// The fixed recombination event classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventType {
    Con,
    CoBir,
    ConCo,
    ComCon,
    InterDel,
    TerDel,
    InterDup,
    TerDup,
}

/// All event types, in dropdown order.
pub const EVENT_TYPES: &[EventType] = &[
    EventType::Con,
    EventType::CoBir,
    EventType::ConCo,
    EventType::ComCon,
    EventType::InterDel,
    EventType::TerDel,
    EventType::InterDup,
    EventType::TerDup,
];

impl EventType {
    /// Return the event type as its display label. There is deliberately
    /// no parse in the other direction: stored event text passes through
    /// unchecked, the catalog only feeds the dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Con => "CON",
            Self::CoBir => "CO/BIR",
            Self::ConCo => "CON/CO",
            Self::ComCon => "COM/CON",
            Self::InterDel => "interDEL",
            Self::TerDel => "terDEL",
            Self::InterDup => "interDUP",
            Self::TerDup => "terDUP",
        }
    }
}

/// The in-progress annotation being assembled from the side panel and the
/// committed boundaries. Fields mirror the submit form one-to-one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDraft {
    /// Strain name, derived from the upload label.
    pub strain: Option<String>,
    /// Roman-numeral chromosome name of the active plot.
    pub chromosome: Option<String>,
    /// Event-type label. `"Unknown"` is the unselected placeholder.
    pub event_type: Option<String>,
    pub loh_class: Option<String>,
    pub left: Option<i64>,
    pub right: Option<i64>,
    pub transition_label: Option<String>,
}

/// Whether the draft is complete enough to submit.
///
/// True only when every field is present and non-empty and the event type
/// is a real selection rather than the placeholder. Deliberately does NOT
/// check `left <= right`, coordinate ranges, or that the event type is one
/// of the fixed labels; those pass through to storage unchecked.
pub fn is_submittable(draft: &AnnotationDraft) -> bool {
    let filled = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());

    filled(&draft.strain)
        && filled(&draft.chromosome)
        && draft
            .event_type
            .as_deref()
            .is_some_and(|e| !e.is_empty() && e != EVENT_TYPE_PLACEHOLDER)
        && filled(&draft.loh_class)
        && draft.left.is_some()
        && draft.right.is_some()
        && filled(&draft.transition_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> AnnotationDraft {
        AnnotationDraft {
            strain: Some("WY38#20-1".into()),
            chromosome: Some("I".into()),
            event_type: Some("CON".into()),
            loh_class: Some("terminal".into()),
            left: Some(12_000),
            right: Some(45_000),
            transition_label: Some("T1".into()),
        }
    }

    #[test]
    fn complete_draft_is_submittable() {
        assert!(is_submittable(&complete_draft()));
    }

    #[test]
    fn placeholder_event_type_blocks_submit() {
        let mut draft = complete_draft();
        draft.event_type = Some(EVENT_TYPE_PLACEHOLDER.into());
        assert!(!is_submittable(&draft));
    }

    #[test]
    fn each_missing_field_blocks_submit() {
        let cases: Vec<AnnotationDraft> = vec![
            AnnotationDraft {
                strain: None,
                ..complete_draft()
            },
            AnnotationDraft {
                chromosome: Some(String::new()),
                ..complete_draft()
            },
            AnnotationDraft {
                event_type: None,
                ..complete_draft()
            },
            AnnotationDraft {
                loh_class: Some(String::new()),
                ..complete_draft()
            },
            AnnotationDraft {
                left: None,
                ..complete_draft()
            },
            AnnotationDraft {
                right: None,
                ..complete_draft()
            },
            AnnotationDraft {
                transition_label: None,
                ..complete_draft()
            },
        ];
        for draft in cases {
            assert!(!is_submittable(&draft), "{draft:?} should not submit");
        }
    }

    #[test]
    fn inverted_boundaries_still_submit() {
        // Left/right ordering is intentionally unchecked.
        let mut draft = complete_draft();
        draft.left = Some(45_000);
        draft.right = Some(12_000);
        assert!(is_submittable(&draft));
    }

    #[test]
    fn validator_is_idempotent() {
        let draft = complete_draft();
        assert_eq!(is_submittable(&draft), is_submittable(&draft));
    }

    #[test]
    fn catalog_labels_in_dropdown_order() {
        let labels: Vec<_> = EVENT_TYPES.iter().map(|e| e.as_str()).collect();
        assert_eq!(
            labels,
            ["CON", "CO/BIR", "CON/CO", "COM/CON", "interDEL", "terDEL", "interDUP", "terDUP"]
        );
        assert!(!labels.contains(&EVENT_TYPE_PLACEHOLDER));
    }
}
