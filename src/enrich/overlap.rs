use std::collections::HashSet;

/// Jaccard similarity at or above which two scene descriptions are read as
/// the same location. Tunable; 0.3 keeps "rainy rooftop at night" and
/// "the rooftop, rain easing" together while splitting genuinely new
/// scenes.
pub(crate) const SAME_LOCATION_JACCARD: f64 = 0.3;

/// Words too common to signal a shared location.
const STOPWORDS: &[&str] = &[
    "with", "from", "into", "over", "under", "near", "this", "that", "there", "then",
    "where", "while", "their", "them", "they", "some", "same", "very", "through",
];

fn significant_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|w| w.to_ascii_lowercase())
        .filter(|w| w.len() >= 4 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Jaccard similarity over the significant words of two scene texts.
///
/// Two empty word sets compare as 0.0 (no evidence of a shared location).
pub(crate) fn scene_similarity(a: &str, b: &str) -> f64 {
    let wa = significant_words(a);
    let wb = significant_words(b);
    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }
    let intersection = wa.intersection(&wb).count();
    let union = wa.len() + wb.len() - intersection;
    intersection as f64 / union as f64
}

/// True when the overlap heuristic reads `a` and `b` as one location.
pub(crate) fn same_location(a: &str, b: &str) -> bool {
    scene_similarity(a, b) >= SAME_LOCATION_JACCARD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_scenes_are_same_location() {
        assert!(same_location("rainy rooftop at night", "rainy rooftop at night"));
    }

    #[test]
    fn partial_overlap_clears_threshold() {
        assert!(same_location(
            "rainy rooftop at night",
            "the rooftop, rain easing into night"
        ));
    }

    #[test]
    fn disjoint_scenes_are_not_same_location() {
        assert!(!same_location(
            "rainy rooftop at night",
            "sunlit harbor market at noon"
        ));
    }

    #[test]
    fn short_and_stop_words_do_not_count() {
        // Shared words are all short or stopwords; no signal.
        assert!(!same_location("he ran with it", "she hid with it"));
    }

    #[test]
    fn empty_scene_text_is_never_same_location() {
        assert!(!same_location("", "rooftop"));
        assert!(!same_location("", ""));
    }
}
