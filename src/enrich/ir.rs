use crate::foundation::error::{PanelwrightError, PanelwrightResult};
use crate::story::model::{DialogueDef, PanelDef};
use crate::story::sequence::Story;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Parse a snake_case label into the typed value.
            pub fn from_label(s: &str) -> Option<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The snake_case label for this value.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Every allowed label, for validation messages.
            pub fn labels() -> &'static [&'static str] {
                &[$($label),+]
            }
        }
    };
}

label_enum! {
    /// Framing distance of a panel.
    ShotType {
        ExtremeWide => "extreme_wide",
        Wide => "wide",
        Medium => "medium",
        MediumClose => "medium_close",
        CloseUp => "close_up",
        ExtremeClose => "extreme_close",
    }
}

impl ShotType {
    /// Wide and extreme-wide shots establish a scene.
    pub fn is_establishing(self) -> bool {
        matches!(self, Self::Wide | Self::ExtremeWide)
    }

    /// Close-up and extreme-close shots.
    pub fn is_close(self) -> bool {
        matches!(self, Self::CloseUp | Self::ExtremeClose)
    }
}

label_enum! {
    /// Vertical viewing angle.
    CameraAngle {
        EyeLevel => "eye_level",
        LowAngle => "low_angle",
        HighAngle => "high_angle",
        DutchAngle => "dutch_angle",
        BirdsEye => "birds_eye",
        WormsEye => "worms_eye",
    }
}

label_enum! {
    /// Intended visual/story importance, driving downstream layout size.
    NarrativeWeight {
        Low => "low",
        Medium => "medium",
        High => "high",
        Splash => "splash",
    }
}

impl NarrativeWeight {
    /// Escalation rank: low < medium < high < splash.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Splash => 3,
        }
    }
}

label_enum! {
    /// Direction the primary subject looks.
    GazeDirection {
        Left => "left",
        Right => "right",
        Center => "center",
        Up => "up",
        Down => "down",
    }
}

impl GazeDirection {
    /// Horizontal opposite, used for eyeline matching across a cut.
    /// Vertical and centered gazes have no opposite.
    pub fn opposite(self) -> Option<Self> {
        match self {
            Self::Left => Some(Self::Right),
            Self::Right => Some(Self::Left),
            Self::Center | Self::Up | Self::Down => None,
        }
    }
}

label_enum! {
    /// Horizontal placement of the panel's visual mass.
    SubjectPosition {
        LeftThird => "left_third",
        Center => "center",
        RightThird => "right_third",
    }
}

label_enum! {
    /// Relation of a panel to its predecessor.
    SpatialRelation {
        SameLocation => "same_location",
        CutTo => "cut_to",
        TimeSkip => "time_skip",
        Flashback => "flashback",
        Parallel => "parallel",
    }
}

label_enum! {
    /// Screen zone where the viewer's eye is meant to land first.
    FocalPoint {
        UpperLeft => "upper_left",
        UpperRight => "upper_right",
        LowerLeft => "lower_left",
        LowerRight => "lower_right",
        Center => "center",
    }
}

label_enum! {
    /// Screen-zone label for a dialogue bubble, consumed by an external
    /// bubble-layout engine.
    BubbleZone {
        TopLeft => "top_left",
        TopCenter => "top_center",
        TopRight => "top_right",
        MiddleLeft => "middle_left",
        MiddleRight => "middle_right",
        BottomLeft => "bottom_left",
        BottomCenter => "bottom_center",
        BottomRight => "bottom_right",
    }
}

label_enum! {
    /// Explicit framing override; outranks every framing heuristic.
    CompositionOverride {
        Symmetric => "symmetric",
        Dynamic => "dynamic",
    }
}

/// Whether a field value came from the caller or from enrichment.
///
/// Auto-fix passes may only rewrite `Derived` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Set by the caller; never rewritten by the engine.
    #[default]
    Explicit,
    /// Filled in by the enrichment pass.
    Derived,
}

impl FieldOrigin {
    /// True for enrichment-derived values.
    pub fn is_derived(self) -> bool {
        matches!(self, Self::Derived)
    }
}

/// Per-panel record of which composition fields enrichment derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Origin of `shot_type`.
    pub shot_type: FieldOrigin,
    /// Origin of `camera_angle`.
    pub camera_angle: FieldOrigin,
    /// Origin of `narrative_weight`.
    pub narrative_weight: FieldOrigin,
    /// Origin of `gaze_direction`.
    pub gaze_direction: FieldOrigin,
    /// Origin of `subject_position`.
    pub subject_position: FieldOrigin,
    /// Origin of `spatial_relation`.
    pub spatial_relation: FieldOrigin,
    /// Origin of `focal_point`.
    pub focal_point: FieldOrigin,
    /// Origin of `connects_to`.
    pub connects_to: FieldOrigin,
}

/// A panel with every composition field populated and typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelIr {
    /// Unique identifier, stable ordering key.
    pub id: String,
    /// Integer order index.
    pub sequence: u32,
    /// Free-text environment description.
    pub scene: String,
    /// Free-text action description.
    pub action: String,
    /// Characters present; first entry is the primary speaker.
    pub characters_present: Vec<String>,
    /// Optional emotional tag.
    pub mood: Option<String>,
    /// Framing distance.
    pub shot_type: ShotType,
    /// Vertical viewing angle.
    pub camera_angle: CameraAngle,
    /// Layout importance.
    pub narrative_weight: NarrativeWeight,
    /// Direction the primary subject looks.
    pub gaze_direction: GazeDirection,
    /// Horizontal placement of visual mass.
    pub subject_position: SubjectPosition,
    /// Relation to the previous panel.
    pub spatial_relation: SpatialRelation,
    /// Screen zone where the eye lands first.
    pub focal_point: FocalPoint,
    /// Forward reference; `None` only on the final panel.
    pub connects_to: Option<String>,
    /// Explicit framing override, if any.
    pub composition_override: Option<CompositionOverride>,
    /// Dialogue entries with resolved bubble zones.
    pub dialogue: Vec<DialogueIr>,
}

impl PanelIr {
    /// True when the panel carries at least one dialogue entry.
    pub fn has_dialogue(&self) -> bool {
        !self.dialogue.is_empty()
    }

    /// Primary speaker: the first entry of `characters_present`, falling
    /// back to the first dialogue entry's character.
    pub fn primary_speaker(&self) -> Option<&str> {
        self.characters_present
            .first()
            .or_else(|| self.dialogue.first().map(|d| &d.character))
            .map(String::as_str)
    }

    /// Distinct dialogue speakers in order of first appearance.
    pub fn distinct_speakers(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for d in &self.dialogue {
            if !out.contains(&d.character.as_str()) {
                out.push(&d.character);
            }
        }
        out
    }
}

/// One dialogue entry with its resolved bubble zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueIr {
    /// Speaking character identifier.
    pub character: String,
    /// The line's text.
    pub text: String,
    /// Delivery kind (open set).
    pub kind: String,
    /// Resolved screen zone for the bubble.
    pub position_hint: BubbleZone,
}

/// An enriched story: the panel arena plus per-panel provenance.
///
/// Constructed by [`crate::enrich`] (filling gaps) or by
/// [`EnrichedStory::try_from_story`] (strict, no filling). Both the
/// shot-progression validator and the directive generator read it.
#[derive(Debug, Clone)]
pub struct EnrichedStory {
    panels: Vec<PanelIr>,
    provenance: Vec<Provenance>,
    idx_by_id: HashMap<String, usize>,
}

impl EnrichedStory {
    pub(crate) fn from_parts(panels: Vec<PanelIr>, provenance: Vec<Provenance>) -> Self {
        debug_assert_eq!(panels.len(), provenance.len());
        let idx_by_id = panels
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            panels,
            provenance,
            idx_by_id,
        }
    }

    /// Strict conversion for stories that skipped enrichment: every
    /// composition field must already be set and valid. An unset field is
    /// a [`PanelwrightError::MissingField`] naming the panel and field; an
    /// unknown label is a validation error. Provenance marks every field
    /// explicit.
    pub fn try_from_story(story: &Story) -> PanelwrightResult<Self> {
        let last = story.len() - 1;
        let mut panels = Vec::with_capacity(story.len());
        for (i, def) in story.panels().iter().enumerate() {
            panels.push(panel_ir_from_def(def, i == last)?);
        }
        let provenance = vec![Provenance::default(); panels.len()];
        Ok(Self::from_parts(panels, provenance))
    }

    /// Panels in story order.
    pub fn panels(&self) -> &[PanelIr] {
        &self.panels
    }

    /// Mutable panel access for auto-fix passes.
    pub(crate) fn panels_mut(&mut self) -> &mut [PanelIr] {
        &mut self.panels
    }

    /// Per-panel provenance, index-aligned with [`Self::panels`].
    pub fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always false: built from a non-empty story.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Arena position for a panel id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.idx_by_id.get(id).copied()
    }

    /// Panel by id.
    pub fn panel(&self, id: &str) -> Option<&PanelIr> {
        self.index_of(id).map(|i| &self.panels[i])
    }
}

fn require<T>(
    v: Option<T>,
    panel_id: &str,
    field: &'static str,
) -> PanelwrightResult<T> {
    v.ok_or_else(|| PanelwrightError::missing_field(panel_id, field))
}

fn parse_label<T>(
    label: &str,
    panel_id: &str,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> PanelwrightResult<T> {
    parse(label).ok_or_else(|| {
        PanelwrightError::validation(format!(
            "panel \"{panel_id}\": {field}: unknown label \"{label}\""
        ))
    })
}

fn panel_ir_from_def(def: &PanelDef, is_last: bool) -> PanelwrightResult<PanelIr> {
    let id = def.id.as_str();

    let shot = require(def.shot_type.as_deref(), id, "shot_type")?;
    let angle = require(def.camera_angle.as_deref(), id, "camera_angle")?;
    let weight = require(def.narrative_weight.as_deref(), id, "narrative_weight")?;
    let gaze = require(def.gaze_direction.as_deref(), id, "gaze_direction")?;
    let subject = require(def.subject_position.as_deref(), id, "subject_position")?;
    let relation = require(def.spatial_relation.as_deref(), id, "spatial_relation")?;
    let focal = require(def.focal_point.as_deref(), id, "focal_point")?;
    let connects_to = if is_last {
        def.connects_to.clone()
    } else {
        Some(require(def.connects_to.clone(), id, "connects_to")?)
    };

    let mut dialogue = Vec::with_capacity(def.dialogue.len());
    for d in &def.dialogue {
        dialogue.push(dialogue_ir_from_def(d, id)?);
    }

    Ok(PanelIr {
        id: def.id.clone(),
        sequence: def.sequence,
        scene: def.scene.clone(),
        action: def.action.clone(),
        characters_present: def.characters_present.clone(),
        mood: def.mood.clone(),
        shot_type: parse_label(shot, id, "shot_type", ShotType::from_label)?,
        camera_angle: parse_label(angle, id, "camera_angle", CameraAngle::from_label)?,
        narrative_weight: parse_label(weight, id, "narrative_weight", NarrativeWeight::from_label)?,
        gaze_direction: parse_label(gaze, id, "gaze_direction", GazeDirection::from_label)?,
        subject_position: parse_label(subject, id, "subject_position", SubjectPosition::from_label)?,
        spatial_relation: parse_label(relation, id, "spatial_relation", SpatialRelation::from_label)?,
        focal_point: parse_label(focal, id, "focal_point", FocalPoint::from_label)?,
        connects_to,
        composition_override: match def.composition_override.as_deref() {
            None => None,
            Some(s) => Some(parse_label(
                s,
                id,
                "composition_override",
                CompositionOverride::from_label,
            )?),
        },
        dialogue,
    })
}

fn dialogue_ir_from_def(d: &DialogueDef, panel_id: &str) -> PanelwrightResult<DialogueIr> {
    let hint = require(d.position_hint.as_deref(), panel_id, "dialogue.position_hint")?;
    Ok(DialogueIr {
        character: d.character.clone(),
        text: d.text.clone(),
        kind: d.kind.clone(),
        position_hint: parse_label(hint, panel_id, "dialogue.position_hint", BubbleZone::from_label)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::dsl::panel;

    fn fully_specified(id: &str, sequence: u32) -> crate::story::model::PanelDef {
        panel(id, sequence)
            .scene("rainy street")
            .shot_type("medium")
            .camera_angle("eye_level")
            .narrative_weight("medium")
            .gaze_direction("left")
            .subject_position("left_third")
            .spatial_relation("cut_to")
            .focal_point("center")
            .build()
    }

    #[test]
    fn labels_round_trip() {
        for &label in ShotType::labels() {
            assert_eq!(ShotType::from_label(label).unwrap().label(), label);
        }
        for &label in BubbleZone::labels() {
            assert_eq!(BubbleZone::from_label(label).unwrap().label(), label);
        }
        assert!(ShotType::from_label("foo").is_none());
    }

    #[test]
    fn gaze_opposite_is_horizontal_only() {
        assert_eq!(GazeDirection::Left.opposite(), Some(GazeDirection::Right));
        assert_eq!(GazeDirection::Right.opposite(), Some(GazeDirection::Left));
        assert_eq!(GazeDirection::Up.opposite(), None);
    }

    #[test]
    fn strict_conversion_rejects_unenriched_panel() {
        let mut a = fully_specified("p1", 1);
        a.connects_to = Some("p2".to_owned());
        let mut b = fully_specified("p2", 2);
        b.shot_type = None;

        let story = Story::new(vec![a, b]).unwrap();
        let err = EnrichedStory::try_from_story(&story).unwrap_err();
        match err {
            crate::PanelwrightError::MissingField { panel_id, field } => {
                assert_eq!(panel_id, "p2");
                assert_eq!(field, "shot_type");
            }
            other => panic!("expected MissingField, got {other}"),
        }
    }

    #[test]
    fn strict_conversion_accepts_fully_specified_story() {
        let mut a = fully_specified("p1", 1);
        a.connects_to = Some("p2".to_owned());
        let b = fully_specified("p2", 2);

        let story = Story::new(vec![a, b]).unwrap();
        let enriched = EnrichedStory::try_from_story(&story).unwrap();
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched.panels()[0].shot_type, ShotType::Medium);
        assert!(!enriched.provenance()[0].shot_type.is_derived());
    }
}
