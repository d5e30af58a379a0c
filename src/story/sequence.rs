use crate::foundation::error::{PanelwrightError, PanelwrightResult};
use crate::schema::validate::validate_story;
use crate::story::model::PanelDef;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A validated, ordered panel sequence.
///
/// The panel collection is an arena: the ordered `Vec<PanelDef>` plus an
/// id→position index, so `connects_to` and neighbor lookups are O(1)
/// instead of linear scans. The sequence is immutable in length after
/// construction; enrichment and validation operate as passes over it.
#[derive(Debug, Clone)]
pub struct Story {
    panels: Vec<PanelDef>,
    idx_by_id: HashMap<String, usize>,
}

impl Story {
    /// Build a story from panel descriptors, enforcing the sequencing
    /// invariants: at least one panel, unique non-empty ids, strictly
    /// increasing `sequence` values.
    pub fn new(panels: Vec<PanelDef>) -> PanelwrightResult<Self> {
        if panels.is_empty() {
            return Err(PanelwrightError::sequencing(
                "a story requires at least one panel",
            ));
        }

        let mut idx_by_id = HashMap::with_capacity(panels.len());
        for (i, p) in panels.iter().enumerate() {
            if p.id.trim().is_empty() {
                return Err(PanelwrightError::sequencing(format!(
                    "panel at position {i}: id must be non-empty"
                )));
            }
            if idx_by_id.insert(p.id.clone(), i).is_some() {
                return Err(PanelwrightError::sequencing(format!(
                    "duplicate panel id \"{}\"",
                    p.id
                )));
            }
            if i > 0 {
                let prev = &panels[i - 1];
                if p.sequence <= prev.sequence {
                    return Err(PanelwrightError::sequencing(format!(
                        "panel \"{}\": sequence {} must be greater than \"{}\"'s {}",
                        p.id, p.sequence, prev.id, prev.sequence
                    )));
                }
            }
        }

        Ok(Self { panels, idx_by_id })
    }

    /// Parse a story from a JSON reader (an array of panel objects).
    pub fn from_reader<R: std::io::Read>(r: R) -> PanelwrightResult<Self> {
        let panels: Vec<PanelDef> = serde_json::from_reader(r)
            .map_err(|e| PanelwrightError::serde(format!("parse story JSON: {e}")))?;
        Self::new(panels)
    }

    /// Parse a story from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PanelwrightResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PanelwrightError::serde(format!("open story JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build a story from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> PanelwrightResult<Self> {
        let panels: Vec<PanelDef> = serde_json::from_value(value)
            .map_err(|e| PanelwrightError::serde(format!("parse story JSON: {e}")))?;
        Self::new(panels)
    }

    /// Validate every panel against the field schema, reporting all
    /// violations at once.
    pub fn validate(&self) -> PanelwrightResult<()> {
        validate_story(self)
            .map_err(|e| PanelwrightError::validation(format!("story validation failed: {e}")))
    }

    /// Panels in story order.
    pub fn panels(&self) -> &[PanelDef] {
        &self.panels
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always false: a story holds at least one panel by construction.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Arena position for a panel id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.idx_by_id.get(id).copied()
    }

    /// Panel by id.
    pub fn panel(&self, id: &str) -> Option<&PanelDef> {
        self.index_of(id).map(|i| &self.panels[i])
    }
}
