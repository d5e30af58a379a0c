use serde::{Deserialize, Serialize};

/// One unit of visual narrative as it arrives from a story plan.
///
/// This is the JSON-facing boundary representation. Enumerated fields are
/// carried as snake_case string labels and checked by
/// [`crate::schema::validate_story`]; fields enrichment may fill are
/// `Option` and default to unset. Explicitly provided values are never
/// overwritten by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDef {
    /// Unique identifier, stable ordering key.
    pub id: String,
    /// Integer order index, strictly increasing within one story.
    pub sequence: u32,
    /// Free-text environment description.
    #[serde(default)]
    pub scene: String,
    /// Free-text description of what happens.
    #[serde(default)]
    pub action: String,
    /// Character identifiers present in the panel. Order is irrelevant for
    /// identity but the first entry is the primary speaker for dialogue
    /// priority.
    #[serde(default)]
    pub characters_present: Vec<String>,
    /// Optional emotional tag (free text, e.g. "tense", "calm").
    #[serde(default)]
    pub mood: Option<String>,
    /// Framing distance; one of `extreme_wide`, `wide`, `medium`,
    /// `medium_close`, `close_up`, `extreme_close`.
    #[serde(default)]
    pub shot_type: Option<String>,
    /// Vertical viewing angle; one of `eye_level`, `low_angle`,
    /// `high_angle`, `dutch_angle`, `birds_eye`, `worms_eye`.
    #[serde(default)]
    pub camera_angle: Option<String>,
    /// Layout importance; one of `low`, `medium`, `high`, `splash`.
    #[serde(default)]
    pub narrative_weight: Option<String>,
    /// Direction the primary subject looks; one of `left`, `right`,
    /// `center`, `up`, `down`.
    #[serde(default)]
    pub gaze_direction: Option<String>,
    /// Horizontal placement of visual mass; one of `left_third`, `center`,
    /// `right_third`.
    #[serde(default)]
    pub subject_position: Option<String>,
    /// Relation to the previous panel; one of `same_location`, `cut_to`,
    /// `time_skip`, `flashback`, `parallel`.
    #[serde(default)]
    pub spatial_relation: Option<String>,
    /// Screen zone where the eye lands first; one of `upper_left`,
    /// `upper_right`, `lower_left`, `lower_right`, `center`.
    #[serde(default)]
    pub focal_point: Option<String>,
    /// Id of the panel this one semantically continues into.
    #[serde(default)]
    pub connects_to: Option<String>,
    /// Explicit framing override; `symmetric` or `dynamic`. Outranks every
    /// framing heuristic when present.
    #[serde(default)]
    pub composition_override: Option<String>,
    /// Ordered dialogue entries.
    #[serde(default)]
    pub dialogue: Vec<DialogueDef>,
}

/// One dialogue entry attached to a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueDef {
    /// Speaking character identifier.
    pub character: String,
    /// Spoken (or thought, captioned, ...) text.
    pub text: String,
    /// Delivery kind: speech, thought, shout, whisper, narration, caption,
    /// sfx, ... Open set, carried through untouched.
    #[serde(default = "default_dialogue_kind", rename = "type")]
    pub kind: String,
    /// Screen-zone label for the bubble; one of the eight zone labels (see
    /// [`crate::BubbleZone`]). Auto-filled by enrichment when unset.
    #[serde(default)]
    pub position_hint: Option<String>,
}

fn default_dialogue_kind() -> String {
    "speech".to_owned()
}
