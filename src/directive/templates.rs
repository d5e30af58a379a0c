//! The composition template catalog.
//!
//! A fixed, named set of composition fragments, loaded once as process-wide
//! immutable data. Pure lookup; rules reference templates only by key and
//! never inline template text.

/// A named composition template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Scene-opening wide framing.
    Establishing,
    /// Scene-opening wide framing under a heavy mood.
    EstablishingDramatic,
    /// Two-speaker exchange favoring the first speaker.
    SpeakerA,
    /// Two-speaker exchange favoring the second speaker.
    SpeakerB,
    /// Close reaction beat.
    Reaction,
    /// Pulled-back reaction beat.
    ReactionWide,
    /// The most extreme instant of an action.
    ActionPeak,
    /// The beat before an action lands.
    ActionBuildup,
    /// The beat after an action lands.
    ActionAftermath,
    /// Neutral bridging beat between scenes.
    Transition,
    /// Visible passage of time.
    TimeSkip,
    /// Memory framing.
    Flashback,
    /// Subject disclosed from concealment.
    Reveal,
    /// Two subjects squared off.
    Confrontation,
    /// Rising pressure toward the peak.
    Climax,
    /// Full splash treatment.
    ClimaxSplash,
    /// Quiet interior beat.
    Contemplation,
    /// Cue matching a counterpart thread.
    Parallel,
}

/// Every template in the catalog, in stable order.
pub const CATALOG: &[Template] = &[
    Template::Establishing,
    Template::EstablishingDramatic,
    Template::SpeakerA,
    Template::SpeakerB,
    Template::Reaction,
    Template::ReactionWide,
    Template::ActionPeak,
    Template::ActionBuildup,
    Template::ActionAftermath,
    Template::Transition,
    Template::TimeSkip,
    Template::Flashback,
    Template::Reveal,
    Template::Confrontation,
    Template::Climax,
    Template::ClimaxSplash,
    Template::Contemplation,
    Template::Parallel,
];

impl Template {
    /// Scenario key for this template.
    pub fn name(self) -> &'static str {
        match self {
            Self::Establishing => "establishing",
            Self::EstablishingDramatic => "establishing_dramatic",
            Self::SpeakerA => "speaker_a",
            Self::SpeakerB => "speaker_b",
            Self::Reaction => "reaction",
            Self::ReactionWide => "reaction_wide",
            Self::ActionPeak => "action_peak",
            Self::ActionBuildup => "action_buildup",
            Self::ActionAftermath => "action_aftermath",
            Self::Transition => "transition",
            Self::TimeSkip => "time_skip",
            Self::Flashback => "flashback",
            Self::Reveal => "reveal",
            Self::Confrontation => "confrontation",
            Self::Climax => "climax",
            Self::ClimaxSplash => "climax_splash",
            Self::Contemplation => "contemplation",
            Self::Parallel => "parallel",
        }
    }

    /// The composition fragment for this template.
    pub fn text(self) -> &'static str {
        match self {
            Self::Establishing => "establishing shot, full environment and scene geography visible",
            Self::EstablishingDramatic => "dramatic establishing shot under heavy atmosphere",
            Self::SpeakerA => "two-shot favoring the first speaker, listener over the shoulder",
            Self::SpeakerB => "two-shot favoring the second speaker, listener over the shoulder",
            Self::Reaction => "reaction shot, expression carrying the beat",
            Self::ReactionWide => "pulled-back reaction, body language over facial detail",
            Self::ActionPeak => "peak action frame at the most extreme instant of motion",
            Self::ActionBuildup => "coiled tension in the instant before the strike",
            Self::ActionAftermath => "settling aftermath with consequences held in frame",
            Self::Transition => "neutral bridging beat between scenes",
            Self::TimeSkip => "visible passage of time, changed light or weather",
            Self::Flashback => "memory framing with softened desaturated edges",
            Self::Reveal => "reveal composition, subject disclosed from concealment",
            Self::Confrontation => "symmetric standoff, opposing subjects squared to each other",
            Self::Climax => "rising pressure, framing tightening toward the peak",
            Self::ClimaxSplash => "full splash treatment at maximum scale, dominating the page",
            Self::Contemplation => "quiet interior beat with negative space around the subject",
            Self::Parallel => "parallel action cue matching the counterpart thread",
        }
    }

    /// Look a template up by scenario key.
    pub fn lookup(name: &str) -> Option<Self> {
        CATALOG.iter().copied().find(|t| t.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique_and_lookup_round_trips() {
        for &t in CATALOG {
            assert_eq!(Template::lookup(t.name()), Some(t));
            assert!(!t.text().is_empty());
        }
        assert!(Template::lookup("no_such_template").is_none());
    }

    #[test]
    fn catalog_has_at_least_fifteen_entries() {
        assert!(CATALOG.len() >= 15);
    }
}
