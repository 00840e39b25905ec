//! Domain logic for the recombination annotator.
//!
//! Everything here is pure and I/O-free: coverage-track parsing, the
//! per-session track cache, the boundary selection state machine, draft
//! submit gating, strain-list parsing, and export row shaping. Persistence
//! lives in `annotator-db`, HTTP in `annotator-api`.

pub mod chromosome;
pub mod draft;
pub mod error;
pub mod export;
pub mod selection;
pub mod strains;
pub mod track;
pub mod types;
