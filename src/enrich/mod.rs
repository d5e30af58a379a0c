//! Field enrichment: the typed enriched model, the scene-overlap
//! heuristic, and the pass that fills every unset composition field.

pub mod batch;
pub mod ir;
pub(crate) mod overlap;
pub mod pass;
