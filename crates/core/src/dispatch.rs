use crate::{
    always_worthwhile, draw_to_hand_size, opponent_draw_by_points, CalculationInput,
    CalculationResult, CardCatalog, Policy,
};

pub const INVALID_CONFIGURATION: &str = "Invalid deck/hand configuration.";
pub const NO_CARD_SELECTED: &str = "Select a card to calculate odds.";

/// Runs the calculation for `input.card_name` against the built-in catalog.
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    calculate_with(CardCatalog::builtin(), input)
}

/// Routes `input` to the policy registered for its card name in `catalog`.
/// Never fails: bad configurations and unknown cards become a `worth_it = false`
/// result without details.
pub fn calculate_with(catalog: &CardCatalog, input: &CalculationInput) -> CalculationResult {
    if input.cards_in_hand + input.cards_in_deck == 0 {
        return CalculationResult::bare(INVALID_CONFIGURATION);
    }
    let Ok(card) = catalog.lookup(&input.card_name) else {
        return CalculationResult::bare(NO_CARD_SELECTED);
    };
    match &card.policy {
        Policy::DrawToHandSize { threshold } => draw_to_hand_size(card, *threshold, input),
        Policy::OpponentDrawByPoints {
            threshold_with_cards_in_hand,
            threshold_without_cards_in_hand,
            win_points,
        } => opponent_draw_by_points(
            card,
            *threshold_with_cards_in_hand,
            *threshold_without_cards_in_hand,
            *win_points,
            input,
        ),
        Policy::AlwaysWorthwhile { draw_count } => always_worthwhile(card, *draw_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Affects, CardDefinition, IONO, RED_CARD};

    #[test]
    fn empty_table_short_circuits_before_lookup() {
        let result = calculate(&CalculationInput::new(RED_CARD, 0, 0));
        assert!(!result.worth_it);
        assert_eq!(result.explanation, INVALID_CONFIGURATION);
        assert!(result.details.is_none());
    }

    #[test]
    fn unknown_card_gets_default_result() {
        let result = calculate(&CalculationInput::new("", 13, 7).with_target(1, 0));
        assert!(!result.worth_it);
        assert_eq!(result.explanation, NO_CARD_SELECTED);
        assert!(result.details.is_none());
    }

    #[test]
    fn custom_catalog_routes_by_policy() {
        let catalog = CardCatalog::new(vec![CardDefinition {
            name: "Judge".to_string(),
            effect_text: "Each player shuffles their hand into their deck and draws 4 cards."
                .to_string(),
            policy: Policy::AlwaysWorthwhile { draw_count: 4 },
            affects: Affects::Opponent,
            uses_points: false,
        }])
        .expect("catalog");
        let result = calculate_with(&catalog, &CalculationInput::new("Judge", 10, 3));
        assert!(result.worth_it);
        assert_eq!(result.details.expect("details").cards_to_draw(), 4);
        let missing = calculate_with(&catalog, &CalculationInput::new(IONO, 10, 3));
        assert_eq!(missing.explanation, NO_CARD_SELECTED);
    }

    #[test]
    fn builtin_and_standard_catalog_agree() {
        let input = CalculationInput::new(IONO, 13, 7).with_target(1, 0);
        assert_eq!(
            calculate(&input),
            calculate_with(&CardCatalog::standard(), &input)
        );
    }
}
