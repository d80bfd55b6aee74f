//! Field-level validation of the raw calculator form.
//!
//! Errors are recomputed from the current field values on every call, so a
//! caller never has to patch or clear stale messages.

use crate::{CalculationInput, TargetCard};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Largest number of cards a deck holds, hand included.
pub const MAX_TOTAL_CARDS: u32 = 20;

pub const CARDS_IN_DECK: RangeInclusive<u32> = 1..=MAX_TOTAL_CARDS;
pub const CARDS_IN_HAND: RangeInclusive<u32> = 0..=8;
pub const UNIQUE_CARDS_NEEDED: RangeInclusive<u32> = 1..=3;
pub const REMAINING_IN_DECK: RangeInclusive<u32> = 1..=2;
pub const IN_HAND: RangeInclusive<u32> = 0..=2;
pub const POINTS: RangeInclusive<u32> = 0..=2;

const DEFAULT_REMAINING: &str = "1";
const DEFAULT_IN_HAND: &str = "0";
const DEFAULT_POINTS: &str = "1";

/// Form fields exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawForm {
    pub card_name: String,
    pub cards_in_deck: String,
    pub cards_in_hand: String,
    pub unique_cards_needed: String,
    #[serde(default)]
    pub remaining_in_deck: Vec<String>,
    #[serde(default)]
    pub in_hand: Vec<String>,
    #[serde(default)]
    pub opponent_points: Option<String>,
    #[serde(default)]
    pub user_points: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardsInDeck,
    CardsInHand,
    TotalCards,
    UniqueCardsNeeded,
    RemainingInDeck(usize),
    InHand(usize),
    OpponentPoints,
    UserPoints,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

fn range_message(range: &RangeInclusive<u32>) -> String {
    format!("Value must be between {} and {}", range.start(), range.end())
}

fn parse_number(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

fn check(
    errors: &mut Vec<FieldError>,
    field: Field,
    value: &str,
    range: RangeInclusive<u32>,
) -> Option<u32> {
    match parse_number(value).filter(|number| range.contains(number)) {
        Some(number) => Some(number),
        None => {
            errors.push(FieldError {
                field,
                message: range_message(&range),
            });
            None
        }
    }
}

fn target_field<'a>(values: &'a [String], idx: usize, default: &'a str) -> &'a str {
    values.get(idx).map(String::as_str).unwrap_or(default)
}

impl RawForm {
    pub fn validate(&self) -> Vec<FieldError> {
        self.check_all().1
    }

    /// The typed input, or every field error when any field is out of range.
    pub fn parse(&self) -> Result<CalculationInput, Vec<FieldError>> {
        let (input, errors) = self.check_all();
        match input {
            Some(input) if errors.is_empty() => Ok(input),
            _ => Err(errors),
        }
    }

    fn check_all(&self) -> (Option<CalculationInput>, Vec<FieldError>) {
        let mut errors = Vec::new();
        let deck = check(
            &mut errors,
            Field::CardsInDeck,
            &self.cards_in_deck,
            CARDS_IN_DECK,
        );
        let hand = check(
            &mut errors,
            Field::CardsInHand,
            &self.cards_in_hand,
            CARDS_IN_HAND,
        );
        if let (Some(deck), Some(hand)) = (
            parse_number(&self.cards_in_deck),
            parse_number(&self.cards_in_hand),
        ) {
            if deck.saturating_add(hand) > MAX_TOTAL_CARDS {
                errors.push(FieldError {
                    field: Field::TotalCards,
                    message: format!(
                        "Total cards (deck + hand) cannot exceed {}",
                        MAX_TOTAL_CARDS
                    ),
                });
            }
        }
        let unique = check(
            &mut errors,
            Field::UniqueCardsNeeded,
            &self.unique_cards_needed,
            UNIQUE_CARDS_NEEDED,
        );

        let mut targets = Vec::new();
        for idx in 0..unique.unwrap_or(0) as usize {
            let remaining = check(
                &mut errors,
                Field::RemainingInDeck(idx),
                target_field(&self.remaining_in_deck, idx, DEFAULT_REMAINING),
                REMAINING_IN_DECK,
            );
            let in_hand = check(
                &mut errors,
                Field::InHand(idx),
                target_field(&self.in_hand, idx, DEFAULT_IN_HAND),
                IN_HAND,
            );
            if let (Some(remaining_in_deck), Some(in_hand)) = (remaining, in_hand) {
                targets.push(TargetCard {
                    remaining_in_deck,
                    in_hand,
                });
            }
        }

        let opponent_points = check(
            &mut errors,
            Field::OpponentPoints,
            self.opponent_points.as_deref().unwrap_or(DEFAULT_POINTS),
            POINTS,
        );
        let user_points = check(
            &mut errors,
            Field::UserPoints,
            self.user_points.as_deref().unwrap_or(DEFAULT_POINTS),
            POINTS,
        );

        let input = match (deck, hand, unique, opponent_points, user_points) {
            (
                Some(cards_in_deck),
                Some(cards_in_hand),
                Some(_),
                Some(opponent_points),
                Some(user_points),
            ) => Some(CalculationInput {
                card_name: self.card_name.clone(),
                cards_in_deck,
                cards_in_hand,
                targets,
                opponent_points,
                user_points,
            }),
            _ => None,
        };
        (input, errors)
    }
}

/// Shorthand for [`RawForm::validate`].
pub fn validate(form: &RawForm) -> Vec<FieldError> {
    form.validate()
}
