//! Coverage track parsing and the per-session track cache.
//!
//! An upload is a whitespace-delimited text file with a header line and
//! four columns: chromosome, position, and two relative-coverage ratio
//! tracks (reference and alternate parent). Parsing is all-or-nothing; a
//! failed upload leaves no partial track behind.

use serde::Serialize;

use crate::error::CoreError;

/// One measurement row of a coverage track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    /// Normalized chromosome identifier (leading `chr` stripped).
    pub chromosome: String,
    /// Genomic coordinate, non-negative.
    pub position: i64,
    /// Relative coverage against the reference parent.
    pub ref_ratio: f64,
    /// Relative coverage against the alternate parent.
    pub alt_ratio: f64,
}

/// A fully parsed upload: all rows plus the distinct chromosome ids in
/// first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct ParsedTrack {
    pub rows: Vec<CoverageRow>,
    pub chromosomes: Vec<String>,
}

/// Strip a leading `chr` prefix from a chromosome token.
fn normalize_chrom(token: &str) -> &str {
    token.strip_prefix("chr").unwrap_or(token)
}

/// Parse raw upload bytes into a [`ParsedTrack`].
///
/// The first line is treated as a column header and skipped when its
/// position column is non-numeric. Every other malformed line fails the
/// whole parse with [`CoreError::TrackParse`].
pub fn parse_track(bytes: &[u8]) -> Result<ParsedTrack, CoreError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CoreError::TrackParse(format!("not valid UTF-8: {e}")))?;

    let mut track = ParsedTrack::default();

    for (line_num, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Ok(row) => {
                if !track.chromosomes.contains(&row.chromosome) {
                    track.chromosomes.push(row.chromosome.clone());
                }
                track.rows.push(row);
            }
            // Header line: the original data files carry column names in
            // the first line.
            Err(_) if line_num == 0 => continue,
            Err(e) => {
                return Err(CoreError::TrackParse(format!("line {}: {e}", line_num + 1)));
            }
        }
    }

    Ok(track)
}

/// Parse one whitespace-delimited data line.
fn parse_row(line: &str) -> Result<CoverageRow, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 columns, got {}", fields.len()));
    }

    let chromosome = normalize_chrom(fields[0]).to_string();
    let position: i64 = fields[1]
        .parse()
        .map_err(|_| format!("invalid position '{}'", fields[1]))?;
    if position < 0 {
        return Err(format!("negative position {position}"));
    }
    let ref_ratio: f64 = fields[2]
        .parse()
        .map_err(|_| format!("invalid coverage ratio '{}'", fields[2]))?;
    let alt_ratio: f64 = fields[3]
        .parse()
        .map_err(|_| format!("invalid coverage ratio '{}'", fields[3]))?;

    Ok(CoverageRow {
        chromosome,
        position,
        ref_ratio,
        alt_ratio,
    })
}

/// Derive the session display label from an upload filename by stripping
/// the fixed 5-character extension (e.g. `WY38#20-1.covg` -> `WY38#20-1`).
/// The extension is assumed, not validated.
pub fn strain_label(filename: &str) -> String {
    let chars: Vec<char> = filename.chars().collect();
    let keep = chars.len().saturating_sub(5);
    chars[..keep].iter().collect()
}

/// Session-scoped holder for the active track. Holds at most one track;
/// every successful upload evicts the previous one.
#[derive(Debug, Default)]
pub struct TrackCache {
    track: Option<ParsedTrack>,
    label: Option<String>,
}

impl TrackCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly parsed track, unconditionally evicting any prior
    /// one. Last upload wins.
    pub fn replace(&mut self, track: ParsedTrack, label: String) {
        self.track = Some(track);
        self.label = Some(label);
    }

    /// Distinct chromosome ids of the active track, first-appearance order.
    pub fn chromosomes(&self) -> &[String] {
        self.track
            .as_ref()
            .map(|t| t.chromosomes.as_slice())
            .unwrap_or_default()
    }

    /// Rows of the active track for one chromosome. Fails soft: an absent
    /// chromosome (or no track at all) yields an empty result.
    pub fn filter_by_chromosome(&self, chromosome: &str) -> Vec<&CoverageRow> {
        self.track
            .as_ref()
            .map(|t| {
                t.rows
                    .iter()
                    .filter(|r| r.chromosome == chromosome)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Display label of the active upload (filename minus extension).
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    const SAMPLE: &str = "chrom pos w303 yjm\n\
        chrI 1000 0.5 1.5\n\
        chrI 2000 0.6 1.4\n\
        chrII 500 1.0 1.0\n\
        chrI 3000 0.7 1.3\n";

    #[test]
    fn strips_chr_prefix_from_every_row() {
        let track = parse_track(SAMPLE.as_bytes()).unwrap();
        assert!(track.rows.iter().all(|r| !r.chromosome.starts_with("chr")));
    }

    #[test]
    fn chromosomes_in_first_appearance_order() {
        let track = parse_track(SAMPLE.as_bytes()).unwrap();
        assert_eq!(track.chromosomes, vec!["I", "II"]);
        assert_eq!(track.rows.len(), 4);
    }

    #[test]
    fn tokens_without_prefix_pass_through() {
        let track = parse_track(b"chrom pos a b\nIV 100 0.1 0.2\n").unwrap();
        assert_eq!(track.rows[0].chromosome, "IV");
    }

    #[test]
    fn header_only_skipped_on_first_line() {
        // A non-numeric position past the first line fails the whole parse.
        let err = parse_track(b"chrom pos a b\nchrI x 0.5 0.5\n").unwrap_err();
        assert_matches!(err, CoreError::TrackParse(_));
    }

    #[test]
    fn wrong_column_count_fails() {
        let err = parse_track(b"chrom pos a b\nchrI 100 0.5\n").unwrap_err();
        assert_matches!(err, CoreError::TrackParse(_));
    }

    #[test]
    fn negative_position_fails() {
        let err = parse_track(b"chrom pos a b\nchrI -5 0.5 0.5\n").unwrap_err();
        assert_matches!(err, CoreError::TrackParse(_));
    }

    #[test]
    fn invalid_utf8_fails() {
        let err = parse_track(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_matches!(err, CoreError::TrackParse(_));
    }

    #[test]
    fn strain_label_strips_extension() {
        assert_eq!(strain_label("WY38#20-1.covg"), "WY38#20-1");
        assert_eq!(strain_label("x.tsv"), ""); // shorter than the assumed extension
    }

    #[test]
    fn cache_replace_evicts_previous_track() {
        let mut cache = TrackCache::new();
        cache.replace(parse_track(SAMPLE.as_bytes()).unwrap(), "WY38#20-1".into());
        assert_eq!(cache.chromosomes(), ["I", "II"]);

        let next = parse_track(b"chrom pos a b\nchrXVI 1 0.5 0.5\n").unwrap();
        cache.replace(next, "WY66#30-11".into());
        assert_eq!(cache.chromosomes(), ["XVI"]);
        assert_eq!(cache.label(), Some("WY66#30-11"));
        assert!(cache.filter_by_chromosome("I").is_empty());
    }

    #[test]
    fn filter_fails_soft_on_absent_chromosome() {
        let mut cache = TrackCache::new();
        assert!(cache.filter_by_chromosome("I").is_empty());

        cache.replace(parse_track(SAMPLE.as_bytes()).unwrap(), "WY38#20-1".into());
        assert_eq!(cache.filter_by_chromosome("I").len(), 3);
        assert_eq!(cache.filter_by_chromosome("II").len(), 1);
        assert!(cache.filter_by_chromosome("III").is_empty());
    }
}
