//! Bidirectional chromosome name mapping.
//!
//! The sixteen S. cerevisiae chromosomes are addressed by Roman-numeral
//! name ("I".."XVI") at every user-facing boundary and by integer 1..=16
//! inside the store. The table is a process-wide constant, never mutated.

use crate::types::ChromId;

/// Roman-numeral names indexed by `id - 1`.
const CHROM_NAMES: [&str; 16] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI",
];

/// Look up the integer id for a Roman-numeral chromosome name.
pub fn chrom_to_id(name: &str) -> Option<ChromId> {
    CHROM_NAMES
        .iter()
        .position(|&n| n == name)
        .map(|idx| (idx + 1) as ChromId)
}

/// Look up the Roman-numeral name for an integer chromosome id.
pub fn id_to_chrom(id: ChromId) -> Option<&'static str> {
    if (1..=16).contains(&id) {
        Some(CHROM_NAMES[(id - 1) as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_sixteen() {
        for id in 1..=16 {
            let name = id_to_chrom(id).unwrap();
            assert_eq!(chrom_to_id(name), Some(id));
        }
    }

    #[test]
    fn known_mappings() {
        assert_eq!(chrom_to_id("I"), Some(1));
        assert_eq!(chrom_to_id("IV"), Some(4));
        assert_eq!(chrom_to_id("XVI"), Some(16));
        assert_eq!(id_to_chrom(9), Some("IX"));
    }

    #[test]
    fn unknown_name_and_id() {
        assert_eq!(chrom_to_id("XVII"), None);
        assert_eq!(chrom_to_id("chrI"), None);
        assert_eq!(chrom_to_id(""), None);
        assert_eq!(id_to_chrom(0), None);
        assert_eq!(id_to_chrom(17), None);
    }
}
