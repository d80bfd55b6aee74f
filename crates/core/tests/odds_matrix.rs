use ptcgp_odds_core::{
    calculate, hypergeometric, CalculationDetails, CalculationInput, OddsComment, RawForm, IONO,
    MARS, RED_CARD,
};

const EPSILON: f64 = 1e-4;

macro_rules! hyper_case {
    ($name:ident, ($population:expr, $successes:expr, $sample:expr, $min:expr), $expected:expr) => {
        #[test]
        fn $name() {
            let got = hypergeometric($population, $successes, $sample, $min);
            assert!(
                (got - $expected).abs() < EPSILON,
                "expected {}, got {}",
                $expected,
                got
            );
        }
    };
}

hyper_case!(one_copy_of_twenty_drawing_seven, (20, 1, 7, 1), 0.35);
hyper_case!(two_copies_of_twenty_drawing_seven, (20, 2, 7, 1), 0.5895);
hyper_case!(one_copy_of_thirteen_drawing_seven, (13, 1, 7, 1), 0.5385);
hyper_case!(both_copies_of_twenty_drawing_seven, (20, 2, 7, 2), 0.1105);
hyper_case!(two_copies_of_fourteen_drawing_three, (14, 2, 3, 1), 0.3956);
hyper_case!(draw_more_than_deck, (5, 1, 6, 1), 0.0);
hyper_case!(more_successes_than_deck, (5, 6, 2, 1), 0.0);
hyper_case!(need_more_than_exist, (20, 1, 7, 2), 0.0);
hyper_case!(need_more_than_drawn, (20, 2, 1, 2), 0.0);

macro_rules! worth_case {
    ($name:ident, $input:expr, $worth_it:expr) => {
        #[test]
        fn $name() {
            assert_eq!(calculate(&$input).worth_it, $worth_it);
        }
    };
}

worth_case!(
    iono_full_hand_single_copy,
    CalculationInput::new(IONO, 13, 7).with_target(1, 0),
    true
);
worth_case!(
    iono_small_hand_single_copy,
    CalculationInput::new(IONO, 15, 3).with_target(1, 0),
    false
);
worth_case!(
    iono_empty_hand,
    CalculationInput::new(IONO, 20, 0).with_target(2, 0),
    false
);
worth_case!(
    mars_last_point_two_copies,
    CalculationInput::new(MARS, 4, 3)
        .with_target(2, 0)
        .with_opponent_points(2),
    false
);
worth_case!(
    mars_three_draws_tiny_deck,
    CalculationInput::new(MARS, 4, 3)
        .with_target(2, 0)
        .with_opponent_points(0),
    true
);
worth_case!(
    mars_opponent_already_won,
    CalculationInput::new(MARS, 10, 4)
        .with_target(2, 0)
        .with_opponent_points(3),
    false
);
worth_case!(
    red_card_with_empty_table_of_targets,
    CalculationInput::new(RED_CARD, 1, 0),
    true
);
worth_case!(
    unknown_card,
    CalculationInput::new("Sabrina", 10, 4).with_target(1, 0),
    false
);

#[test]
fn iono_seven_card_hand_matches_closed_form() {
    let result = calculate(&CalculationInput::new(IONO, 13, 7).with_target(1, 0));
    let details = result.details.expect("details");
    assert_eq!(details.card_name(), IONO);
    assert_eq!(details.cards_to_draw(), 7);
    let combined = details.combined_odds().expect("combined odds");
    assert!((combined - hypergeometric(13, 1, 7, 1)).abs() < 1e-12);
    assert!((combined - 0.5385).abs() < EPSILON);
    assert!(result.worth_it);
    assert_eq!(
        result.explanation,
        "Playing Iono will shuffle your hand of 7 cards into your deck and draw 7 new cards. \
         Chance of getting needed card(s): 53.85%. Worth playing!"
    );
}

#[test]
fn iono_empty_hand_has_no_odds() {
    let result = calculate(&CalculationInput::new(IONO, 20, 0).with_target(1, 0));
    assert!(!result.worth_it);
    let details = result.details.expect("details");
    assert_eq!(details.cards_to_draw(), 0);
    assert!(details.odds().is_empty());
}

#[test]
fn mars_held_copy_still_multiplies_into_odds() {
    let input = CalculationInput::new(MARS, 12, 5)
        .with_target(2, 1)
        .with_target(1, 0)
        .with_opponent_points(1);
    let result = calculate(&input);
    let details = match result.details.expect("details") {
        CalculationDetails::OpponentDrawByPoints(details) => details,
        other => panic!("unexpected details: {other:?}"),
    };
    assert_eq!(details.points_needed, 2);
    assert_eq!(details.cards_to_draw, 2);
    assert!(details.odds[0].will_discard);
    assert_eq!(details.odds[0].comment, OddsComment::WillDiscard);
    assert!(!details.odds[1].will_discard);
    let expected = hypergeometric(12, 2, 2, 1) * hypergeometric(12, 1, 2, 1);
    assert!((details.combined_odds.expect("combined") - expected).abs() < 1e-12);
    assert_eq!(details.threshold_used, Some(0.7));
    assert!(!result.worth_it);
    assert!(result
        .explanation
        .contains("Warning: Your opponent will be drawing cards which might help them."));
}

#[test]
fn red_card_is_always_worth_it() {
    for (deck, hand) in [(1, 0), (20, 0), (12, 8), (5, 5)] {
        let result = calculate(&CalculationInput::new(RED_CARD, deck, hand).with_target(2, 2));
        assert!(result.worth_it);
        assert_eq!(result.details.expect("details").cards_to_draw(), 3);
    }
}

#[test]
fn dispatch_is_deterministic() {
    let input = CalculationInput::new(MARS, 11, 4)
        .with_target(1, 0)
        .with_target(2, 0)
        .with_opponent_points(0);
    assert_eq!(calculate(&input), calculate(&input));
}

#[test]
fn validated_form_feeds_dispatch() {
    let form = RawForm {
        card_name: IONO.to_string(),
        cards_in_deck: "13".to_string(),
        cards_in_hand: "7".to_string(),
        unique_cards_needed: "1".to_string(),
        remaining_in_deck: vec!["1".to_string()],
        in_hand: vec!["0".to_string()],
        opponent_points: None,
        user_points: None,
    };
    let input = form.parse().expect("valid");
    assert!(calculate(&input).worth_it);
}

#[test]
fn result_serializes_with_policy_tag() {
    let result = calculate(&CalculationInput::new(MARS, 12, 5).with_target(1, 1));
    let value = serde_json::to_value(&result).expect("serialize");
    assert_eq!(value["details"]["policy"], "opponent_draw_by_points");
    assert_eq!(value["details"]["odds"][0]["comment"], "Will discard from hand!");
    let back: ptcgp_odds_core::CalculationResult =
        serde_json::from_value(value).expect("deserialize");
    assert_eq!(back.worth_it, result.worth_it);
    assert_eq!(back.explanation, result.explanation);
}
