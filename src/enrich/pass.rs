use crate::enrich::ir::{
    BubbleZone, CameraAngle, CompositionOverride, DialogueIr, EnrichedStory, FieldOrigin,
    FocalPoint, GazeDirection, NarrativeWeight, PanelIr, Provenance, ShotType, SpatialRelation,
    SubjectPosition,
};
use crate::enrich::overlap::same_location;
use crate::foundation::error::{PanelwrightError, PanelwrightResult};
use crate::foundation::hash::stable_hash64;
use crate::story::model::PanelDef;
use crate::story::sequence::Story;

/// Fill every unset composition field of every panel.
///
/// A pure transform: the input story is untouched and the result is a new
/// arena. Explicitly provided fields are never overwritten, so the pass is
/// idempotent on a fully-specified story. Explicit values are validated
/// first; the only errors are the validation and sequencing kinds.
#[tracing::instrument(skip(story), fields(panels = story.len()))]
pub fn enrich(story: &Story) -> PanelwrightResult<EnrichedStory> {
    story.validate()?;

    let defs = story.panels();
    let last = defs.len() - 1;
    let mut panels: Vec<PanelIr> = Vec::with_capacity(defs.len());
    let mut provenance = Vec::with_capacity(defs.len());
    let mut derived_fields = 0usize;

    for (i, def) in defs.iter().enumerate() {
        let prev = panels.last();
        let mut origin = Provenance::default();

        let narrative_weight = fill(
            def.narrative_weight.as_deref(),
            &def.id,
            "narrative_weight",
            NarrativeWeight::from_label,
            &mut origin.narrative_weight,
            || NarrativeWeight::Medium,
        )?;

        let spatial_relation = fill(
            def.spatial_relation.as_deref(),
            &def.id,
            "spatial_relation",
            SpatialRelation::from_label,
            &mut origin.spatial_relation,
            || derive_spatial_relation(def, i.checked_sub(1).map(|j| &defs[j])),
        )?;

        let gaze_direction = fill(
            def.gaze_direction.as_deref(),
            &def.id,
            "gaze_direction",
            GazeDirection::from_label,
            &mut origin.gaze_direction,
            || derive_gaze(def, prev),
        )?;

        let subject_position = fill(
            def.subject_position.as_deref(),
            &def.id,
            "subject_position",
            SubjectPosition::from_label,
            &mut origin.subject_position,
            || derive_subject_position(def.sequence, narrative_weight),
        )?;

        let focal_point = fill(
            def.focal_point.as_deref(),
            &def.id,
            "focal_point",
            FocalPoint::from_label,
            &mut origin.focal_point,
            || derive_focal_point(subject_position, gaze_direction),
        )?;

        let opens_scene = i == 0 || spatial_relation != SpatialRelation::SameLocation;
        let shot_type = fill(
            def.shot_type.as_deref(),
            &def.id,
            "shot_type",
            ShotType::from_label,
            &mut origin.shot_type,
            || derive_shot_type(def, narrative_weight, opens_scene),
        )?;

        let camera_angle = fill(
            def.camera_angle.as_deref(),
            &def.id,
            "camera_angle",
            CameraAngle::from_label,
            &mut origin.camera_angle,
            || derive_camera_angle(narrative_weight),
        )?;

        let connects_to = match def.connects_to.clone() {
            Some(target) => Some(target),
            None if i < last => {
                origin.connects_to = FieldOrigin::Derived;
                Some(defs[i + 1].id.clone())
            }
            None => None,
        };

        let dialogue = assign_bubble_zones(def)?;

        derived_fields += count_derived(origin);
        provenance.push(origin);
        panels.push(PanelIr {
            id: def.id.clone(),
            sequence: def.sequence,
            scene: def.scene.clone(),
            action: def.action.clone(),
            characters_present: def.characters_present.clone(),
            mood: def.mood.clone(),
            shot_type,
            camera_angle,
            narrative_weight,
            gaze_direction,
            subject_position,
            spatial_relation,
            focal_point,
            connects_to,
            composition_override: match def.composition_override.as_deref() {
                None => None,
                Some(s) => CompositionOverride::from_label(s),
            },
            dialogue,
        });
    }

    tracing::debug!(derived_fields, "enrichment pass complete");
    Ok(EnrichedStory::from_parts(panels, provenance))
}

fn fill<T>(
    explicit: Option<&str>,
    panel_id: &str,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
    origin: &mut FieldOrigin,
    derive: impl FnOnce() -> T,
) -> PanelwrightResult<T> {
    match explicit {
        Some(label) => parse(label).ok_or_else(|| {
            PanelwrightError::validation(format!(
                "panel \"{panel_id}\": {field}: unknown label \"{label}\""
            ))
        }),
        None => {
            *origin = FieldOrigin::Derived;
            Ok(derive())
        }
    }
}

fn derive_spatial_relation(def: &PanelDef, prev: Option<&PanelDef>) -> SpatialRelation {
    match prev {
        Some(prev) if same_location(&prev.scene, &def.scene) => SpatialRelation::SameLocation,
        _ => SpatialRelation::CutTo,
    }
}

/// Gaze tendency. Eyeline matching comes first: when two consecutive
/// dialogue panels switch primary speaker and the predecessor looks
/// left/right, this panel looks the opposite way, so conversing characters
/// face each other across the cut. Otherwise a stable hash of the speaking
/// character (same character, same tendency across panels), and without
/// dialogue the sequence parity alternates left/right.
fn derive_gaze(def: &PanelDef, prev: Option<&PanelIr>) -> GazeDirection {
    if !def.dialogue.is_empty()
        && let Some(prev) = prev
        && prev.has_dialogue()
        && let Some(opposite) = prev.gaze_direction.opposite()
        && primary_speaker_of_def(def) != prev.primary_speaker()
    {
        return opposite;
    }

    if let Some(speaker) = def.dialogue.first().map(|d| d.character.as_str()) {
        if stable_hash64(speaker) & 1 == 0 {
            GazeDirection::Left
        } else {
            GazeDirection::Right
        }
    } else if def.sequence % 2 == 0 {
        GazeDirection::Left
    } else {
        GazeDirection::Right
    }
}

fn primary_speaker_of_def(def: &PanelDef) -> Option<&str> {
    def.characters_present
        .first()
        .or_else(|| def.dialogue.first().map(|d| &d.character))
        .map(String::as_str)
}

fn derive_subject_position(sequence: u32, weight: NarrativeWeight) -> SubjectPosition {
    if weight == NarrativeWeight::Splash {
        SubjectPosition::Center
    } else if sequence % 2 == 0 {
        SubjectPosition::LeftThird
    } else {
        SubjectPosition::RightThird
    }
}

/// Fixed lookup from subject placement and gaze to the focal zone. The
/// gaze leads: a subject on the right third looking left pulls the eye
/// back across the frame toward the upper left.
fn derive_focal_point(subject: SubjectPosition, gaze: GazeDirection) -> FocalPoint {
    use GazeDirection as G;
    use SubjectPosition as S;
    match (subject, gaze) {
        (S::Center, G::Center) => FocalPoint::Center,
        (S::Center, G::Left) => FocalPoint::UpperLeft,
        (S::Center, G::Right) => FocalPoint::UpperRight,
        (S::Center, G::Up) => FocalPoint::UpperLeft,
        (S::Center, G::Down) => FocalPoint::LowerRight,
        (S::LeftThird, G::Left) => FocalPoint::UpperLeft,
        (S::LeftThird, G::Right) => FocalPoint::Center,
        (S::LeftThird, G::Center) => FocalPoint::LowerLeft,
        (S::LeftThird, G::Up) => FocalPoint::UpperLeft,
        (S::LeftThird, G::Down) => FocalPoint::LowerLeft,
        (S::RightThird, G::Left) => FocalPoint::UpperLeft,
        (S::RightThird, G::Right) => FocalPoint::UpperRight,
        (S::RightThird, G::Center) => FocalPoint::LowerRight,
        (S::RightThird, G::Up) => FocalPoint::UpperRight,
        (S::RightThird, G::Down) => FocalPoint::LowerRight,
    }
}

fn derive_shot_type(def: &PanelDef, weight: NarrativeWeight, opens_scene: bool) -> ShotType {
    if weight == NarrativeWeight::Splash || opens_scene {
        ShotType::Wide
    } else if !def.dialogue.is_empty() {
        if def.sequence % 2 == 0 {
            ShotType::MediumClose
        } else {
            ShotType::Medium
        }
    } else {
        ShotType::Medium
    }
}

fn derive_camera_angle(weight: NarrativeWeight) -> CameraAngle {
    if weight == NarrativeWeight::Splash {
        CameraAngle::LowAngle
    } else {
        CameraAngle::EyeLevel
    }
}

/// Reading-order bubble zones, then the vertical stagger for overflow.
const ZONE_ORDER: [BubbleZone; 8] = [
    BubbleZone::TopLeft,
    BubbleZone::TopRight,
    BubbleZone::BottomLeft,
    BubbleZone::BottomRight,
    BubbleZone::MiddleLeft,
    BubbleZone::MiddleRight,
    BubbleZone::TopCenter,
    BubbleZone::BottomCenter,
];

/// Assign a bubble zone to every dialogue entry lacking an explicit hint.
///
/// The leader's lines (first of `characters_present`) claim zones first,
/// then the remaining lines in story order; zones the caller pinned
/// explicitly are skipped. With more than eight lines, zones repeat in
/// reading order.
fn assign_bubble_zones(def: &PanelDef) -> PanelwrightResult<Vec<DialogueIr>> {
    let leader = def.characters_present.first().map(String::as_str);

    let mut taken: Vec<BubbleZone> = Vec::new();
    let mut resolved: Vec<Option<BubbleZone>> = Vec::with_capacity(def.dialogue.len());
    for d in &def.dialogue {
        match d.position_hint.as_deref() {
            Some(label) => {
                let zone = BubbleZone::from_label(label).ok_or_else(|| {
                    PanelwrightError::validation(format!(
                        "panel \"{}\": dialogue.position_hint: unknown label \"{label}\"",
                        def.id
                    ))
                })?;
                taken.push(zone);
                resolved.push(Some(zone));
            }
            None => resolved.push(None),
        }
    }

    let mut priority: Vec<usize> = (0..def.dialogue.len())
        .filter(|&i| Some(def.dialogue[i].character.as_str()) == leader)
        .collect();
    priority.extend(
        (0..def.dialogue.len()).filter(|&i| Some(def.dialogue[i].character.as_str()) != leader),
    );

    let mut cursor = 0usize;
    for &i in &priority {
        if resolved[i].is_some() {
            continue;
        }
        let zone = loop {
            let candidate = ZONE_ORDER[cursor % ZONE_ORDER.len()];
            cursor += 1;
            // Past one full cycle every zone is taken; reuse in order.
            if cursor > ZONE_ORDER.len() && taken.len() >= ZONE_ORDER.len() {
                break candidate;
            }
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.push(zone);
        resolved[i] = Some(zone);
    }

    Ok(def
        .dialogue
        .iter()
        .zip(resolved)
        .map(|(d, zone)| DialogueIr {
            character: d.character.clone(),
            text: d.text.clone(),
            kind: d.kind.clone(),
            position_hint: zone.unwrap_or(BubbleZone::TopLeft),
        })
        .collect())
}

fn count_derived(p: Provenance) -> usize {
    [
        p.shot_type,
        p.camera_angle,
        p.narrative_weight,
        p.gaze_direction,
        p.subject_position,
        p.spatial_relation,
        p.focal_point,
        p.connects_to,
    ]
    .iter()
    .filter(|o| o.is_derived())
    .count()
}
