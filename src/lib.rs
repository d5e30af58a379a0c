//! Panelwright is a rule-based comic panel composition engine.
//!
//! Given an ordered sequence of panel descriptors it derives the
//! composition metadata an image-prompt builder needs, in three strictly
//! ordered passes:
//!
//! 1. **Enrich**: `Story -> EnrichedStory` (fill every unset composition
//!    field; explicit values are never touched)
//! 2. **Check**: `EnrichedStory -> Vec<ProgressionWarning>` (cinematic
//!    sequencing conventions; warnings, never failures)
//! 3. **Generate**: `EnrichedStory -> Vec<PanelDirectives>` (ordered
//!    composition fragments per panel)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every pass is a pure function of its
//!   input; tie-breaks hash stable identifiers, never a random source.
//! - **No IO in the engine**: panel data is fully loaded before any pass
//!   runs; the only IO surface is the optional JSON ingestion on
//!   [`Story`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod directive;
mod enrich;
mod foundation;
mod progression;
mod schema;
mod story;

pub use directive::generator::{
    PanelDirectives, generate_all, generate_directives, generate_directives_for,
};
pub use directive::templates::{CATALOG, Template};
pub use enrich::batch::enrich_stories;
pub use enrich::ir::{
    BubbleZone, CameraAngle, CompositionOverride, DialogueIr, EnrichedStory, FieldOrigin,
    FocalPoint, GazeDirection, NarrativeWeight, PanelIr, Provenance, ShotType, SpatialRelation,
    SubjectPosition,
};
pub use enrich::pass::enrich;
pub use foundation::error::{PanelwrightError, PanelwrightResult};
pub use progression::validate::{
    ProgressionWarning, WarningCategory, apply_fixes, check_progression,
};
pub use schema::validate::{SchemaError, SchemaErrors, validate_story};
pub use story::dsl::{PanelBuilder, panel};
pub use story::model::{DialogueDef, PanelDef};
pub use story::sequence::Story;
