use crate::enrich::ir::EnrichedStory;
use crate::enrich::pass::enrich;
use crate::foundation::error::PanelwrightResult;
use crate::story::sequence::Story;
use rayon::prelude::*;

/// Enrich many stories in parallel, one story per work item.
///
/// Stories are independent, so this is plain data parallelism; results come
/// back in input order and each carries its own success or failure.
pub fn enrich_stories(stories: &[Story]) -> Vec<PanelwrightResult<EnrichedStory>> {
    stories.par_iter().map(enrich).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::dsl::panel;

    #[test]
    fn batch_matches_sequential_enrichment() {
        let stories: Vec<Story> = (0..8)
            .map(|n| {
                Story::new(vec![
                    panel(format!("s{n}-p1"), 1).scene("windy plateau").build(),
                    panel(format!("s{n}-p2"), 2).scene("windy plateau").build(),
                ])
                .unwrap()
            })
            .collect();

        let batch = enrich_stories(&stories);
        assert_eq!(batch.len(), stories.len());
        for (story, result) in stories.iter().zip(batch) {
            let parallel = result.unwrap();
            let sequential = enrich(story).unwrap();
            assert_eq!(parallel.panels(), sequential.panels());
        }
    }
}
