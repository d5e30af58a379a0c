use crate::enrich::ir::{EnrichedStory, PanelIr, ShotType, SpatialRelation};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Category of a shot-progression warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    /// Four or more consecutive panels share one shot type.
    MonotonousFraming,
    /// A scene opens without a wide or extreme-wide shot.
    MissingEstablishingShot,
    /// A primary-speaker switch keeps the identical shot type.
    UnchangedFramingOnSpeakerSwitch,
}

impl WarningCategory {
    /// The snake_case label used in the external warning contract.
    pub fn label(self) -> &'static str {
        match self {
            Self::MonotonousFraming => "monotonous_framing",
            Self::MissingEstablishingShot => "missing_establishing_shot",
            Self::UnchangedFramingOnSpeakerSwitch => "unchanged_framing_on_speaker_switch",
        }
    }
}

/// One convention violation. Warnings are stylistic guidance, never
/// failures; a run that produced directives despite warnings should show
/// both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionWarning {
    /// Offending panel id(s): the run bounds for repetition, the opener
    /// for establishing-shot, the pair for a speaker switch.
    pub panel_ids: SmallVec<[String; 2]>,
    /// Violation category.
    pub category: WarningCategory,
    /// Human-readable message.
    pub message: String,
}

/// Minimum run length of one shot type that reads as monotonous.
const MONOTONY_RUN: usize = 4;

/// Scan the story for convention violations.
///
/// The three checks are independent; every violation is accumulated and
/// returned, nothing short-circuits and nothing is raised.
#[tracing::instrument(skip(story), fields(panels = story.len()))]
pub fn check_progression(story: &EnrichedStory) -> Vec<ProgressionWarning> {
    let mut warnings = Vec::new();
    let panels = story.panels();

    check_repetition(panels, &mut warnings);
    check_scene_openers(panels, &mut warnings);
    check_speaker_switches(panels, &mut warnings);

    tracing::debug!(count = warnings.len(), "progression check complete");
    warnings
}

/// Apply the safe auto-fixes and report what was fixed.
///
/// Only violation category two has a safe fix: a scene opener whose shot
/// type was *derived* by enrichment is raised to `wide`. Explicit shots
/// belong to the caller and are left alone (the warning stands).
pub fn apply_fixes(story: &mut EnrichedStory) -> Vec<ProgressionWarning> {
    let opener_indices: Vec<usize> = scene_opener_indices(story.panels())
        .into_iter()
        .filter(|&i| {
            !story.panels()[i].shot_type.is_establishing()
                && story.provenance()[i].shot_type.is_derived()
        })
        .collect();

    let mut fixed = Vec::with_capacity(opener_indices.len());
    for i in opener_indices {
        let p = &mut story.panels_mut()[i];
        p.shot_type = ShotType::Wide;
        fixed.push(ProgressionWarning {
            panel_ids: smallvec![p.id.clone()],
            category: WarningCategory::MissingEstablishingShot,
            message: format!("panel \"{}\": raised derived shot to wide to establish the scene", p.id),
        });
    }
    fixed
}

fn check_repetition(panels: &[PanelIr], warnings: &mut Vec<ProgressionWarning>) {
    let mut run_start = 0usize;
    for i in 1..=panels.len() {
        let run_over = i == panels.len() || panels[i].shot_type != panels[run_start].shot_type;
        if !run_over {
            continue;
        }
        let run_len = i - run_start;
        if run_len >= MONOTONY_RUN {
            let first = &panels[run_start];
            let last = &panels[i - 1];
            warnings.push(ProgressionWarning {
                panel_ids: smallvec![first.id.clone(), last.id.clone()],
                category: WarningCategory::MonotonousFraming,
                message: format!(
                    "{run_len} consecutive {} shots from \"{}\" to \"{}\": monotonous framing",
                    first.shot_type.label(),
                    first.id,
                    last.id
                ),
            });
        }
        run_start = i;
    }
}

fn scene_opener_indices(panels: &[PanelIr]) -> Vec<usize> {
    panels
        .iter()
        .enumerate()
        .filter(|(i, p)| *i == 0 || p.spatial_relation != SpatialRelation::SameLocation)
        .map(|(i, _)| i)
        .collect()
}

fn check_scene_openers(panels: &[PanelIr], warnings: &mut Vec<ProgressionWarning>) {
    for i in scene_opener_indices(panels) {
        let p = &panels[i];
        if !p.shot_type.is_establishing() {
            warnings.push(ProgressionWarning {
                panel_ids: smallvec![p.id.clone()],
                category: WarningCategory::MissingEstablishingShot,
                message: format!(
                    "panel \"{}\" opens a scene with a {} shot: scene opens without establishing shot",
                    p.id,
                    p.shot_type.label()
                ),
            });
        }
    }
}

fn check_speaker_switches(panels: &[PanelIr], warnings: &mut Vec<ProgressionWarning>) {
    for pair in panels.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if !a.has_dialogue() || !b.has_dialogue() {
            continue;
        }
        let switched = match (a.primary_speaker(), b.primary_speaker()) {
            (Some(sa), Some(sb)) => sa != sb,
            _ => false,
        };
        if switched && a.shot_type == b.shot_type {
            warnings.push(ProgressionWarning {
                panel_ids: smallvec![a.id.clone(), b.id.clone()],
                category: WarningCategory::UnchangedFramingOnSpeakerSwitch,
                message: format!(
                    "panels \"{}\" and \"{}\" switch speaker but keep the {} shot: no framing change on speaker switch",
                    a.id,
                    b.id,
                    b.shot_type.label()
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::pass::enrich;
    use crate::story::dsl::panel;
    use crate::story::model::PanelDef;
    use crate::story::sequence::Story;

    fn enriched(panels: Vec<PanelDef>) -> EnrichedStory {
        enrich(&Story::new(panels).unwrap()).unwrap()
    }

    #[test]
    fn flags_runs_of_four_identical_shots() {
        let panels = (1..=5)
            .map(|i| {
                panel(format!("p{i}"), i)
                    .scene("one long corridor walk")
                    .shot_type("medium")
                    .build()
            })
            .collect();
        let warnings = check_progression(&enriched(panels));
        let reps: Vec<_> = warnings
            .iter()
            .filter(|w| w.category == WarningCategory::MonotonousFraming)
            .collect();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].panel_ids.as_slice(), ["p1", "p5"]);
    }

    #[test]
    fn three_in_a_row_is_fine() {
        let panels = (1..=3)
            .map(|i| {
                panel(format!("p{i}"), i)
                    .scene("one long corridor walk")
                    .shot_type("medium")
                    .build()
            })
            .collect();
        let warnings = check_progression(&enriched(panels));
        assert!(
            warnings
                .iter()
                .all(|w| w.category != WarningCategory::MonotonousFraming)
        );
    }

    #[test]
    fn flags_scene_opening_without_establishing_shot() {
        let warnings = check_progression(&enriched(vec![
            panel("p1", 1).scene("harbor").shot_type("close_up").build(),
        ]));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, WarningCategory::MissingEstablishingShot);
        assert_eq!(warnings[0].panel_ids.as_slice(), ["p1"]);
    }

    #[test]
    fn flags_speaker_switch_without_framing_change() {
        let warnings = check_progression(&enriched(vec![
            panel("a", 1)
                .scene("tea house, lanterns")
                .shot_type("wide")
                .character("kai")
                .says("kai", "you came")
                .build(),
            panel("b", 2)
                .scene("tea house, lanterns")
                .shot_type("wide")
                .character("mira")
                .says("mira", "of course")
                .build(),
        ]));
        let hits: Vec<_> = warnings
            .iter()
            .filter(|w| w.category == WarningCategory::UnchangedFramingOnSpeakerSwitch)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].panel_ids.as_slice(), ["a", "b"]);
    }

    #[test]
    fn autofix_never_touches_explicit_shots() {
        let mut story = enriched(vec![
            panel("p1", 1).scene("harbor").shot_type("close_up").build(),
            panel("p2", 2).scene("harbor").says("kai", "hey").build(),
        ]);
        let fixed = apply_fixes(&mut story);
        assert_eq!(story.panels()[0].shot_type, ShotType::CloseUp);
        assert!(fixed.is_empty());
    }

    #[test]
    fn autofix_raises_derived_opener_shot_to_wide() {
        let mut story = enriched(vec![
            panel("p1", 1).scene("harbor at dawn").shot_type("wide").build(),
            panel("p2", 2)
                .scene("harbor at dawn")
                .spatial_relation("cut_to")
                .says("kai", "and now?")
                .build(),
        ]);
        // p2's explicit cut_to makes it a scene opener, and its derived
        // shot came out wide via the opener rule; knock it down to a
        // non-establishing derived value so the fix path has work to do.
        story.panels_mut()[1].shot_type = ShotType::Medium;

        let fixed = apply_fixes(&mut story);
        assert_eq!(story.panels()[1].shot_type, ShotType::Wide);
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].panel_ids.as_slice(), ["p2"]);
        assert_eq!(fixed[0].category, WarningCategory::MissingEstablishingShot);
    }
}
