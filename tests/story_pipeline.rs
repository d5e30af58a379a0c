//! End-to-end pipeline coverage: enrich, check, generate over whole
//! stories.

use panelwright::{
    PanelwrightError, Story, SubjectPosition, WarningCategory, check_progression, enrich,
    generate_all, generate_directives, panel, validate_story,
};

/// Six-panel arc: a scene opener, four conversation beats, a splash close.
fn six_panel_story() -> Story {
    Story::new(vec![
        panel("p1", 1).scene("ruined observatory on the hill").build(),
        panel("p2", 2)
            .scene("ruined observatory on the hill")
            .character("kai")
            .says("kai", "someone was here")
            .build(),
        panel("p3", 3)
            .scene("ruined observatory on the hill")
            .character("mira")
            .says("mira", "still is")
            .build(),
        panel("p4", 4)
            .scene("ruined observatory on the hill")
            .character("kai")
            .says("kai", "where")
            .build(),
        panel("p5", 5)
            .scene("ruined observatory on the hill")
            .character("mira")
            .says("mira", "above you")
            .build(),
        panel("p6", 6)
            .scene("ruined observatory on the hill")
            .narrative_weight("splash")
            .action("the machine wakes")
            .build(),
    ])
    .unwrap()
}

#[test]
fn six_panel_story_end_to_end() {
    let story = six_panel_story();
    let enriched = enrich(&story).unwrap();

    // Panel 1 opens the story wide and its directives carry an
    // establishing template.
    assert!(enriched.panels()[0].shot_type.is_establishing());
    let d1 = generate_directives(&enriched, 0).unwrap();
    assert!(d1.iter().any(|s| s.contains("establishing shot")), "{d1:?}");

    // Panels 2-5 alternate subject position left/right/left/right.
    let positions: Vec<_> = enriched.panels()[1..5]
        .iter()
        .map(|p| p.subject_position)
        .collect();
    assert_eq!(
        positions,
        [
            SubjectPosition::LeftThird,
            SubjectPosition::RightThird,
            SubjectPosition::LeftThird,
            SubjectPosition::RightThird,
        ]
    );

    // The splash close centers the frame and takes the splash treatment,
    // overriding the anti-centering default.
    assert_eq!(enriched.panels()[5].subject_position, SubjectPosition::Center);
    let d6 = generate_directives(&enriched, 5).unwrap();
    assert!(d6.iter().any(|s| s.contains("full splash treatment")), "{d6:?}");
    assert!(d6.iter().any(|s| s.contains("centered composition")), "{d6:?}");
    assert!(!d6.iter().any(|s| s.contains("rule of thirds")), "{d6:?}");
}

#[test]
fn generation_is_byte_identical_across_runs() {
    let story = six_panel_story();
    let a = enrich(&story).unwrap();
    let b = enrich(&story).unwrap();
    assert_eq!(a.panels(), b.panels());
    assert_eq!(generate_all(&a), generate_all(&b));
}

#[test]
fn validator_reports_exactly_one_warning_per_injected_violation() {
    // Three violations, one per category: a five-panel close_up run (also
    // denying the opener its establishing shot) and a speaker switch that
    // keeps the framing.
    let story = Story::new(vec![
        panel("p1", 1).scene("train car").shot_type("close_up").build(),
        panel("p2", 2).scene("train car").shot_type("close_up").build(),
        panel("p3", 3).scene("train car").shot_type("close_up").build(),
        panel("p4", 4)
            .scene("train car")
            .shot_type("close_up")
            .character("kai")
            .says("kai", "tickets")
            .build(),
        panel("p5", 5)
            .scene("train car")
            .shot_type("close_up")
            .character("mira")
            .says("mira", "lost them")
            .build(),
    ])
    .unwrap();

    let warnings = check_progression(&enrich(&story).unwrap());
    assert_eq!(warnings.len(), 3, "{warnings:#?}");

    let by_category = |c: WarningCategory| {
        warnings
            .iter()
            .filter(|w| w.category == c)
            .collect::<Vec<_>>()
    };

    let reps = by_category(WarningCategory::MonotonousFraming);
    assert_eq!(reps.len(), 1);
    assert_eq!(reps[0].panel_ids.as_slice(), ["p1", "p5"]);

    let openers = by_category(WarningCategory::MissingEstablishingShot);
    assert_eq!(openers.len(), 1);
    assert_eq!(openers[0].panel_ids.as_slice(), ["p1"]);

    let switches = by_category(WarningCategory::UnchangedFramingOnSpeakerSwitch);
    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].panel_ids.as_slice(), ["p4", "p5"]);
}

#[test]
fn eyeline_matching_holds_through_the_pipeline() {
    let story = Story::new(vec![
        panel("a", 1)
            .scene("tea house")
            .character("kai")
            .says("kai", "you came")
            .build(),
        panel("b", 2)
            .scene("tea house")
            .character("mira")
            .says("mira", "of course")
            .build(),
    ])
    .unwrap();

    let enriched = enrich(&story).unwrap();
    let a = enriched.panels()[0].gaze_direction;
    let b = enriched.panels()[1].gaze_direction;
    assert_eq!(Some(b), a.opposite());

    // The generator's gaze directive agrees with the enriched value.
    let d = generate_directives(&enriched, 1).unwrap();
    assert!(
        d.iter().any(|s| s.contains(&format!("looking {}", b.label()))),
        "{d:?}"
    );
}

#[test]
fn dangling_connects_to_is_reported_not_crashed() {
    let story = Story::new(vec![
        panel("p1", 1).scene("dock").connects_to("missing").build(),
        panel("p2", 2).scene("dock").build(),
    ])
    .unwrap();

    let err = validate_story(&story).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].panel_id, "p1");
    assert_eq!(err.errors[0].field, "connects_to");

    let err = enrich(&story).unwrap_err();
    assert!(matches!(err, PanelwrightError::Validation(_)));
}

#[test]
fn warnings_accompany_successful_output() {
    // A run with violations still produces directives; the host gets both.
    let story = Story::new(vec![
        panel("p1", 1).scene("corridor").shot_type("close_up").build(),
        panel("p2", 2).scene("corridor").shot_type("close_up").build(),
    ])
    .unwrap();

    let enriched = enrich(&story).unwrap();
    let warnings = check_progression(&enriched);
    let directives = generate_all(&enriched);

    assert!(!warnings.is_empty());
    assert_eq!(directives.len(), 2);
    assert!(directives.iter().all(|d| !d.directives.is_empty()));
}

#[test]
fn story_round_trips_through_json() {
    let json = serde_json::json!([
        {
            "id": "p1",
            "sequence": 1,
            "scene": "night market under paper lanterns",
            "dialogue": [
                {"character": "kai", "text": "try this", "type": "speech"}
            ]
        },
        {
            "id": "p2",
            "sequence": 2,
            "scene": "night market under paper lanterns",
            "narrative_weight": "high"
        }
    ]);

    let story = Story::from_value(json).unwrap();
    let enriched = enrich(&story).unwrap();

    // Bubble zones land in the external contract's label set.
    let hint = enriched.panels()[0].dialogue[0].position_hint;
    assert!(panelwright::BubbleZone::labels().contains(&hint.label()));

    // Enriched panels serialize for downstream consumers.
    let serialized = serde_json::to_string(enriched.panels()).unwrap();
    assert!(serialized.contains("\"position_hint\":\"top_left\""));
}
