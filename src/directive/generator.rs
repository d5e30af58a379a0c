use crate::directive::rules::{RULES, RuleCategory, RuleCtx};
use crate::enrich::ir::EnrichedStory;
use crate::foundation::error::{PanelwrightError, PanelwrightResult};
use serde::{Deserialize, Serialize};

/// The directive list generated for one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDirectives {
    /// Id of the panel the directives belong to.
    pub panel_id: String,
    /// Ordered composition fragments for the prompt builder.
    pub directives: Vec<String>,
}

/// Generate the directive list for the panel at `index`.
///
/// A pure function of the panel, its immediate neighbors and its place in
/// the sequence: calling twice with the same story yields byte-identical
/// output. The list is never empty (the focal-point and gaze rules always
/// fire).
pub fn generate_directives(
    story: &EnrichedStory,
    index: usize,
) -> PanelwrightResult<Vec<String>> {
    let panels = story.panels();
    let Some(panel) = panels.get(index) else {
        return Err(PanelwrightError::validation(format!(
            "panel index {index} out of range (story has {} panels)",
            panels.len()
        )));
    };

    let ctx = RuleCtx {
        panel,
        prev: index.checked_sub(1).map(|i| &panels[i]),
        next: panels.get(index + 1),
        index,
    };

    let mut out = Vec::new();
    let mut produced = [false; RuleCategory::COUNT];
    for rule in RULES {
        if produced[rule.category.idx()] || !(rule.applies)(&ctx) {
            continue;
        }
        produced[rule.category.idx()] = true;
        out.extend((rule.produce)(&ctx));
        tracing::trace!(rule = rule.name, panel = %panel.id, "rule fired");
    }

    Ok(out)
}

/// Generate the directive list for the panel with the given id.
pub fn generate_directives_for(
    story: &EnrichedStory,
    panel_id: &str,
) -> PanelwrightResult<Vec<String>> {
    let index = story.index_of(panel_id).ok_or_else(|| {
        PanelwrightError::validation(format!("unknown panel id \"{panel_id}\""))
    })?;
    generate_directives(story, index)
}

/// Generate directives for every panel of the story, in order.
#[tracing::instrument(skip(story), fields(panels = story.len()))]
pub fn generate_all(story: &EnrichedStory) -> Vec<PanelDirectives> {
    (0..story.len())
        .map(|i| PanelDirectives {
            panel_id: story.panels()[i].id.clone(),
            // In range by construction.
            directives: generate_directives(story, i).unwrap_or_default(),
        })
        .collect()
}
