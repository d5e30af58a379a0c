use crate::enrich::ir::{
    BubbleZone, CameraAngle, CompositionOverride, FocalPoint, GazeDirection, NarrativeWeight,
    ShotType, SpatialRelation, SubjectPosition,
};
use crate::story::sequence::Story;
use std::fmt;

/// One schema violation, addressed by panel id and field.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Id of the offending panel.
    pub panel_id: String,
    /// Field the violation is on.
    pub field: &'static str,
    /// Human-readable description with expected vs actual.
    pub message: String,
}

impl SchemaError {
    fn at(panel_id: &str, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            panel_id: panel_id.to_owned(),
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "panel \"{}\": {}: {}",
            self.panel_id, self.field, self.message
        )
    }
}

/// Every schema violation found in one pass over the story.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    /// The accumulated violations, in panel order.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Validate every panel's explicit field values against the allowed label
/// sets and cross-check `connects_to` references.
///
/// All violations are accumulated and reported together; nothing
/// short-circuits. Unset fields are fine here (enrichment fills them);
/// only explicit values can be wrong.
pub fn validate_story(story: &Story) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    for p in story.panels() {
        check_label(&mut errors, &p.id, "shot_type", p.shot_type.as_deref(), ShotType::labels(), |s| {
            ShotType::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "camera_angle", p.camera_angle.as_deref(), CameraAngle::labels(), |s| {
            CameraAngle::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "narrative_weight", p.narrative_weight.as_deref(), NarrativeWeight::labels(), |s| {
            NarrativeWeight::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "gaze_direction", p.gaze_direction.as_deref(), GazeDirection::labels(), |s| {
            GazeDirection::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "subject_position", p.subject_position.as_deref(), SubjectPosition::labels(), |s| {
            SubjectPosition::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "spatial_relation", p.spatial_relation.as_deref(), SpatialRelation::labels(), |s| {
            SpatialRelation::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "focal_point", p.focal_point.as_deref(), FocalPoint::labels(), |s| {
            FocalPoint::from_label(s).is_some()
        });
        check_label(&mut errors, &p.id, "composition_override", p.composition_override.as_deref(), CompositionOverride::labels(), |s| {
            CompositionOverride::from_label(s).is_some()
        });

        for d in &p.dialogue {
            check_label(&mut errors, &p.id, "dialogue.position_hint", d.position_hint.as_deref(), BubbleZone::labels(), |s| {
                BubbleZone::from_label(s).is_some()
            });
            if d.character.trim().is_empty() {
                errors.push(SchemaError::at(
                    &p.id,
                    "dialogue.character",
                    "must be non-empty",
                ));
            }
        }

        if let Some(target) = p.connects_to.as_deref() {
            if target == p.id {
                errors.push(SchemaError::at(
                    &p.id,
                    "connects_to",
                    "panel cannot connect to itself",
                ));
            } else if story.index_of(target).is_none() {
                errors.push(SchemaError::at(
                    &p.id,
                    "connects_to",
                    format!("unknown panel id \"{target}\""),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn check_label(
    errors: &mut Vec<SchemaError>,
    panel_id: &str,
    field: &'static str,
    value: Option<&str>,
    allowed: &'static [&'static str],
    exists: impl Fn(&str) -> bool,
) {
    if let Some(v) = value
        && !exists(v)
    {
        errors.push(SchemaError::at(
            panel_id,
            field,
            format!(
                "unknown label \"{v}\" (expected one of: {})",
                allowed.join(", ")
            ),
        ));
    }
}
