use crate::story::model::{DialogueDef, PanelDef};

/// Start a [`PanelBuilder`] for a panel with the given id and sequence.
pub fn panel(id: impl Into<String>, sequence: u32) -> PanelBuilder {
    PanelBuilder {
        def: PanelDef {
            id: id.into(),
            sequence,
            scene: String::new(),
            action: String::new(),
            characters_present: Vec::new(),
            mood: None,
            shot_type: None,
            camera_angle: None,
            narrative_weight: None,
            gaze_direction: None,
            subject_position: None,
            spatial_relation: None,
            focal_point: None,
            connects_to: None,
            composition_override: None,
            dialogue: Vec::new(),
        },
    }
}

/// Builder for [`PanelDef`](crate::PanelDef).
///
/// Setters correspond one-to-one to the boundary fields; anything left
/// unset stays `None` and is filled by enrichment.
#[derive(Debug, Clone)]
pub struct PanelBuilder {
    def: PanelDef,
}

impl PanelBuilder {
    /// Set the environment description.
    pub fn scene(mut self, scene: impl Into<String>) -> Self {
        self.def.scene = scene.into();
        self
    }

    /// Set the action description.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.def.action = action.into();
        self
    }

    /// Append a present character.
    pub fn character(mut self, id: impl Into<String>) -> Self {
        self.def.characters_present.push(id.into());
        self
    }

    /// Set the emotional tag.
    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.def.mood = Some(mood.into());
        self
    }

    /// Set an explicit shot type label.
    pub fn shot_type(mut self, v: impl Into<String>) -> Self {
        self.def.shot_type = Some(v.into());
        self
    }

    /// Set an explicit camera angle label.
    pub fn camera_angle(mut self, v: impl Into<String>) -> Self {
        self.def.camera_angle = Some(v.into());
        self
    }

    /// Set an explicit narrative weight label.
    pub fn narrative_weight(mut self, v: impl Into<String>) -> Self {
        self.def.narrative_weight = Some(v.into());
        self
    }

    /// Set an explicit gaze direction label.
    pub fn gaze_direction(mut self, v: impl Into<String>) -> Self {
        self.def.gaze_direction = Some(v.into());
        self
    }

    /// Set an explicit subject position label.
    pub fn subject_position(mut self, v: impl Into<String>) -> Self {
        self.def.subject_position = Some(v.into());
        self
    }

    /// Set an explicit spatial relation label.
    pub fn spatial_relation(mut self, v: impl Into<String>) -> Self {
        self.def.spatial_relation = Some(v.into());
        self
    }

    /// Set an explicit focal point label.
    pub fn focal_point(mut self, v: impl Into<String>) -> Self {
        self.def.focal_point = Some(v.into());
        self
    }

    /// Set an explicit forward reference.
    pub fn connects_to(mut self, id: impl Into<String>) -> Self {
        self.def.connects_to = Some(id.into());
        self
    }

    /// Set the framing override (`symmetric` or `dynamic`).
    pub fn composition_override(mut self, v: impl Into<String>) -> Self {
        self.def.composition_override = Some(v.into());
        self
    }

    /// Append a speech dialogue line.
    pub fn says(self, character: impl Into<String>, text: impl Into<String>) -> Self {
        self.line(character, text, "speech")
    }

    /// Append a dialogue line with an explicit delivery kind.
    pub fn line(
        mut self,
        character: impl Into<String>,
        text: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        self.def.dialogue.push(DialogueDef {
            character: character.into(),
            text: text.into(),
            kind: kind.into(),
            position_hint: None,
        });
        self
    }

    /// Finish and return the panel descriptor.
    pub fn build(self) -> PanelDef {
        self.def
    }
}
