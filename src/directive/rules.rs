//! The ordered rule table behind directive generation.
//!
//! A flat list of `(category, predicate, producer)` entries evaluated in
//! sequence. Within one category the first applicable rule wins; separate
//! categories each contribute their own fragments. No rule inspects
//! anything but the panel, its immediate neighbors and the panel's place
//! in the sequence, so generation stays a pure function of its inputs.

use crate::directive::templates::Template;
use crate::enrich::ir::{
    CompositionOverride, GazeDirection, NarrativeWeight, PanelIr, SpatialRelation,
};
use crate::foundation::hash::stable_hash_pair;
use smallvec::{SmallVec, smallvec};

/// Everything a rule may look at.
pub(crate) struct RuleCtx<'a> {
    pub(crate) panel: &'a PanelIr,
    pub(crate) prev: Option<&'a PanelIr>,
    pub(crate) next: Option<&'a PanelIr>,
    pub(crate) index: usize,
}

/// Directive category; one winner per category per panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleCategory {
    Framing,
    FocalPoint,
    Gaze,
    DialogueShape,
    Reaction,
    Continuity,
    Escalation,
    Progression,
    Reveal,
}

impl RuleCategory {
    pub(crate) const COUNT: usize = 9;

    pub(crate) fn idx(self) -> usize {
        match self {
            Self::Framing => 0,
            Self::FocalPoint => 1,
            Self::Gaze => 2,
            Self::DialogueShape => 3,
            Self::Reaction => 4,
            Self::Continuity => 5,
            Self::Escalation => 6,
            Self::Progression => 7,
            Self::Reveal => 8,
        }
    }
}

type Fragments = SmallVec<[String; 2]>;

/// One rule: a predicate and the fragments it contributes.
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    pub(crate) category: RuleCategory,
    pub(crate) applies: fn(&RuleCtx) -> bool,
    pub(crate) produce: fn(&RuleCtx) -> Fragments,
}

/// The rule table, in decision order. Framing resolves scene openers
/// first, then the explicit override (which outranks every later framing
/// heuristic, splash included), then the centered-framing exceptions, then
/// the anti-centering default.
pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "framing_scene_opener",
        category: RuleCategory::Framing,
        applies: opens_scene,
        produce: produce_establishing,
    },
    Rule {
        name: "framing_override_symmetric",
        category: RuleCategory::Framing,
        applies: override_symmetric,
        produce: produce_centered,
    },
    Rule {
        name: "framing_override_dynamic",
        category: RuleCategory::Framing,
        applies: override_dynamic,
        produce: produce_off_center,
    },
    Rule {
        name: "framing_splash",
        category: RuleCategory::Framing,
        applies: is_splash,
        produce: produce_centered,
    },
    Rule {
        name: "framing_confrontation",
        category: RuleCategory::Framing,
        applies: is_confrontation,
        produce: produce_confrontation,
    },
    Rule {
        name: "framing_two_speaker",
        category: RuleCategory::Framing,
        applies: is_two_speaker_exchange,
        produce: produce_centered_two_shot,
    },
    Rule {
        name: "framing_default",
        category: RuleCategory::Framing,
        applies: always,
        produce: produce_off_center,
    },
    Rule {
        name: "focal_point",
        category: RuleCategory::FocalPoint,
        applies: always,
        produce: produce_focal_point,
    },
    Rule {
        name: "gaze",
        category: RuleCategory::Gaze,
        applies: always,
        produce: produce_gaze,
    },
    Rule {
        name: "two_speaker_template",
        category: RuleCategory::DialogueShape,
        applies: is_two_speaker_exchange,
        produce: produce_speaker_template,
    },
    Rule {
        name: "reaction_after_intensity",
        category: RuleCategory::Reaction,
        applies: follows_high_intensity,
        produce: produce_reaction,
    },
    Rule {
        name: "continuity_same_location",
        category: RuleCategory::Continuity,
        applies: is_same_location,
        produce: produce_environment_consistency,
    },
    Rule {
        name: "continuity_time_skip",
        category: RuleCategory::Continuity,
        applies: is_time_skip,
        produce: produce_time_skip,
    },
    Rule {
        name: "continuity_flashback",
        category: RuleCategory::Continuity,
        applies: is_flashback,
        produce: produce_flashback,
    },
    Rule {
        name: "continuity_parallel",
        category: RuleCategory::Continuity,
        applies: is_parallel,
        produce: produce_parallel,
    },
    Rule {
        name: "escalation_splash",
        category: RuleCategory::Escalation,
        applies: is_splash,
        produce: produce_splash_treatment,
    },
    Rule {
        name: "escalation_buildup",
        category: RuleCategory::Escalation,
        applies: escalates_from_prev,
        produce: produce_climax_buildup,
    },
    Rule {
        name: "escalation_before_splash",
        category: RuleCategory::Escalation,
        applies: precedes_splash,
        produce: produce_action_buildup,
    },
    Rule {
        name: "progression_tighten",
        category: RuleCategory::Progression,
        applies: prev_was_wide,
        produce: produce_tighter,
    },
    Rule {
        name: "progression_widen",
        category: RuleCategory::Progression,
        applies: prev_was_close,
        produce: produce_wider,
    },
    Rule {
        name: "reveal",
        category: RuleCategory::Reveal,
        applies: has_reveal_action,
        produce: produce_reveal,
    },
];

const CENTERED: &str = "centered composition, symmetric visual balance";
const OFF_CENTER: &str = "off-center framing on the rule of thirds";

const CONFLICT_MOODS: &[&str] = &[
    "tense", "angry", "hostile", "furious", "aggressive", "confrontational", "conflict",
];
const DRAMATIC_MOODS: &[&str] = &["dramatic", "ominous", "grim", "foreboding", "tense"];
const INTENSE_ACTION_WORDS: &[&str] = &[
    "fight", "punch", "kick", "explo", "crash", "chase", "attack", "slam", "battle", "shatter",
];
const REVEAL_WORDS: &[&str] = &[
    "reveal", "unveil", "uncover", "discover", "emerges", "revelation", "turns out",
];

fn mood_matches(panel: &PanelIr, moods: &[&str]) -> bool {
    panel
        .mood
        .as_deref()
        .map(str::to_ascii_lowercase)
        .is_some_and(|m| moods.iter().any(|k| m.contains(k)))
}

fn text_matches(text: &str, words: &[&str]) -> bool {
    let t = text.to_ascii_lowercase();
    words.iter().any(|k| t.contains(k))
}

fn high_intensity(panel: &PanelIr) -> bool {
    mood_matches(panel, CONFLICT_MOODS) || text_matches(&panel.action, INTENSE_ACTION_WORDS)
}

/// Gaze actually directed, after the eyeline cross-check: two consecutive
/// dialogue panels with different primary speakers must not look the same
/// way, so the later one takes the opposite of its predecessor.
pub(crate) fn effective_gaze(ctx: &RuleCtx) -> GazeDirection {
    if ctx.panel.has_dialogue()
        && let Some(prev) = ctx.prev
        && prev.has_dialogue()
        && prev.primary_speaker() != ctx.panel.primary_speaker()
        && let Some(opposite) = prev.gaze_direction.opposite()
    {
        return opposite;
    }
    ctx.panel.gaze_direction
}

// ---- predicates ----

fn always(_ctx: &RuleCtx) -> bool {
    true
}

fn opens_scene(ctx: &RuleCtx) -> bool {
    ctx.index == 0 || ctx.panel.spatial_relation != SpatialRelation::SameLocation
}

fn override_symmetric(ctx: &RuleCtx) -> bool {
    ctx.panel.composition_override == Some(CompositionOverride::Symmetric)
}

fn override_dynamic(ctx: &RuleCtx) -> bool {
    ctx.panel.composition_override == Some(CompositionOverride::Dynamic)
}

fn is_splash(ctx: &RuleCtx) -> bool {
    ctx.panel.narrative_weight == NarrativeWeight::Splash
}

fn is_confrontation(ctx: &RuleCtx) -> bool {
    ctx.panel.characters_present.len() == 2 && mood_matches(ctx.panel, CONFLICT_MOODS)
}

fn is_two_speaker_exchange(ctx: &RuleCtx) -> bool {
    ctx.panel.distinct_speakers().len() == 2
}

fn follows_high_intensity(ctx: &RuleCtx) -> bool {
    ctx.prev.is_some_and(high_intensity)
}

fn is_same_location(ctx: &RuleCtx) -> bool {
    ctx.prev.is_some() && ctx.panel.spatial_relation == SpatialRelation::SameLocation
}

fn is_time_skip(ctx: &RuleCtx) -> bool {
    ctx.panel.spatial_relation == SpatialRelation::TimeSkip
}

fn is_flashback(ctx: &RuleCtx) -> bool {
    ctx.panel.spatial_relation == SpatialRelation::Flashback
}

fn is_parallel(ctx: &RuleCtx) -> bool {
    ctx.panel.spatial_relation == SpatialRelation::Parallel
}

fn escalates_from_prev(ctx: &RuleCtx) -> bool {
    ctx.prev
        .is_some_and(|p| ctx.panel.narrative_weight.rank() > p.narrative_weight.rank())
}

fn precedes_splash(ctx: &RuleCtx) -> bool {
    ctx.next
        .is_some_and(|n| n.narrative_weight == NarrativeWeight::Splash)
}

fn prev_was_wide(ctx: &RuleCtx) -> bool {
    ctx.prev.is_some_and(|p| p.shot_type.is_establishing())
}

fn prev_was_close(ctx: &RuleCtx) -> bool {
    ctx.prev.is_some_and(|p| p.shot_type.is_close())
}

fn has_reveal_action(ctx: &RuleCtx) -> bool {
    text_matches(&ctx.panel.action, REVEAL_WORDS)
}

// ---- producers ----

fn produce_establishing(ctx: &RuleCtx) -> Fragments {
    let t = if mood_matches(ctx.panel, DRAMATIC_MOODS) {
        Template::EstablishingDramatic
    } else {
        Template::Establishing
    };
    smallvec![t.text().to_owned()]
}

fn produce_centered(_ctx: &RuleCtx) -> Fragments {
    smallvec![CENTERED.to_owned()]
}

fn produce_off_center(_ctx: &RuleCtx) -> Fragments {
    smallvec![OFF_CENTER.to_owned()]
}

fn produce_confrontation(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::Confrontation.text().to_owned(), CENTERED.to_owned()]
}

fn produce_centered_two_shot(_ctx: &RuleCtx) -> Fragments {
    smallvec![format!("{CENTERED}, speakers balanced across the frame")]
}

fn produce_focal_point(ctx: &RuleCtx) -> Fragments {
    let zone = ctx.panel.focal_point.label().replace('_', " ");
    smallvec![format!("focal point in the {zone} of the frame")]
}

fn produce_gaze(ctx: &RuleCtx) -> Fragments {
    let fragment = match effective_gaze(ctx) {
        GazeDirection::Center => "subject facing the viewer".to_owned(),
        g => format!("subject looking {}", g.label()),
    };
    smallvec![fragment]
}

fn produce_speaker_template(ctx: &RuleCtx) -> Fragments {
    let speakers = ctx.panel.distinct_speakers();
    let t = if stable_hash_pair(speakers[0], speakers[1]) & 1 == 0 {
        Template::SpeakerA
    } else {
        Template::SpeakerB
    };
    smallvec![t.text().to_owned()]
}

fn produce_reaction(ctx: &RuleCtx) -> Fragments {
    let t = if ctx.panel.shot_type.is_establishing() {
        Template::ReactionWide
    } else {
        Template::Reaction
    };
    smallvec![t.text().to_owned()]
}

fn produce_environment_consistency(_ctx: &RuleCtx) -> Fragments {
    smallvec!["carry over background and lighting from the previous panel".to_owned()]
}

fn produce_time_skip(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::TimeSkip.text().to_owned()]
}

fn produce_flashback(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::Flashback.text().to_owned()]
}

fn produce_parallel(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::Parallel.text().to_owned()]
}

fn produce_splash_treatment(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::ClimaxSplash.text().to_owned()]
}

fn produce_climax_buildup(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::Climax.text().to_owned()]
}

fn produce_action_buildup(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::ActionBuildup.text().to_owned()]
}

fn produce_tighter(_ctx: &RuleCtx) -> Fragments {
    smallvec!["tighter framing than the previous panel".to_owned()]
}

fn produce_wider(_ctx: &RuleCtx) -> Fragments {
    smallvec!["wider framing than the previous panel".to_owned()]
}

fn produce_reveal(_ctx: &RuleCtx) -> Fragments {
    smallvec![Template::Reveal.text().to_owned()]
}
