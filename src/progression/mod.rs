//! Shot-progression validation: cinematic sequencing conventions checked
//! over an enriched story, reported as warnings and optionally auto-fixed.

pub mod validate;
