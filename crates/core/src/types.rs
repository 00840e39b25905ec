/// Annotation primary keys are SQLite INTEGER (autoincrement).
pub type DbId = i64;

/// Chromosome ids are the integers 1..=16 behind the Roman-numeral names.
pub type ChromId = i64;

/// Principal ids are opaque strings issued by the external auth provider.
pub type UserId = String;
