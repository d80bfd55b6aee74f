use crate::{hypergeometric, CardDefinition, Policy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-card odds below this are flagged as unlikely.
pub const GOOD_CHANCE: f64 = 0.5;

const DEFAULT_POINTS: u32 = 1;

fn default_points() -> u32 {
    DEFAULT_POINTS
}

/// One distinct card the player is hoping to see.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetCard {
    /// Copies still in the deck.
    pub remaining_in_deck: u32,
    /// Copies already held.
    pub in_hand: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculationInput {
    pub card_name: String,
    pub cards_in_deck: u32,
    pub cards_in_hand: u32,
    pub targets: Vec<TargetCard>,
    #[serde(default = "default_points")]
    pub opponent_points: u32,
    #[serde(default = "default_points")]
    pub user_points: u32,
}

impl CalculationInput {
    pub fn new(card_name: impl Into<String>, cards_in_deck: u32, cards_in_hand: u32) -> Self {
        Self {
            card_name: card_name.into(),
            cards_in_deck,
            cards_in_hand,
            targets: Vec::new(),
            opponent_points: DEFAULT_POINTS,
            user_points: DEFAULT_POINTS,
        }
    }

    pub fn with_target(mut self, remaining_in_deck: u32, in_hand: u32) -> Self {
        self.targets.push(TargetCard {
            remaining_in_deck,
            in_hand,
        });
        self
    }

    pub fn with_opponent_points(mut self, points: u32) -> Self {
        self.opponent_points = points;
        self
    }

    pub fn with_user_points(mut self, points: u32) -> Self {
        self.user_points = points;
        self
    }

    pub fn unique_cards_needed(&self) -> usize {
        self.targets.len()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OddsComment {
    #[serde(rename = "Already in hand")]
    AlreadyInHand,
    #[serde(rename = "Will discard from hand!")]
    WillDiscard,
    #[serde(rename = "Less than 50% chance")]
    LessThanHalf,
    #[serde(rename = "Good chance")]
    GoodChance,
}

impl OddsComment {
    pub fn text(self) -> &'static str {
        match self {
            Self::AlreadyInHand => "Already in hand",
            Self::WillDiscard => "Will discard from hand!",
            Self::LessThanHalf => "Less than 50% chance",
            Self::GoodChance => "Good chance",
        }
    }

    fn for_chance(probability: f64) -> Self {
        if probability < GOOD_CHANCE {
            Self::LessThanHalf
        } else {
            Self::GoodChance
        }
    }
}

impl fmt::Display for OddsComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// One row of the per-target breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardOdds {
    /// 1-based position among the tracked cards.
    pub card_index: usize,
    pub in_hand: u32,
    pub remaining_in_deck: u32,
    pub probability: f64,
    pub comment: OddsComment,
    #[serde(default)]
    pub will_discard: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawToHandSizeDetails {
    pub card_name: String,
    pub card_effect: String,
    pub current_hand_size: u32,
    pub cards_to_draw: u32,
    pub cards_in_deck: u32,
    /// Absent when the hand is empty and nothing is drawn.
    pub combined_odds: Option<f64>,
    pub odds: Vec<CardOdds>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpponentDrawDetails {
    pub card_name: String,
    pub card_effect: String,
    pub opponent_points: u32,
    pub points_needed: u32,
    pub cards_to_draw: u32,
    pub cards_in_deck: u32,
    pub has_cards_in_hand: bool,
    pub combined_odds: Option<f64>,
    pub threshold_used: Option<f64>,
    pub recommendation: Option<String>,
    pub odds: Vec<CardOdds>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlwaysWorthwhileDetails {
    pub card_name: String,
    pub card_effect: String,
    pub strategic_value: String,
    pub draw_count: u32,
    pub disruption_potential: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CalculationDetails {
    DrawToHandSize(DrawToHandSizeDetails),
    OpponentDrawByPoints(OpponentDrawDetails),
    AlwaysWorthwhile(AlwaysWorthwhileDetails),
}

impl CalculationDetails {
    pub fn card_name(&self) -> &str {
        match self {
            Self::DrawToHandSize(details) => &details.card_name,
            Self::OpponentDrawByPoints(details) => &details.card_name,
            Self::AlwaysWorthwhile(details) => &details.card_name,
        }
    }

    pub fn cards_to_draw(&self) -> u32 {
        match self {
            Self::DrawToHandSize(details) => details.cards_to_draw,
            Self::OpponentDrawByPoints(details) => details.cards_to_draw,
            Self::AlwaysWorthwhile(details) => details.draw_count,
        }
    }

    pub fn combined_odds(&self) -> Option<f64> {
        match self {
            Self::DrawToHandSize(details) => details.combined_odds,
            Self::OpponentDrawByPoints(details) => details.combined_odds,
            Self::AlwaysWorthwhile(_) => None,
        }
    }

    pub fn odds(&self) -> &[CardOdds] {
        match self {
            Self::DrawToHandSize(details) => &details.odds,
            Self::OpponentDrawByPoints(details) => &details.odds,
            Self::AlwaysWorthwhile(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub worth_it: bool,
    pub explanation: String,
    pub details: Option<CalculationDetails>,
}

impl CalculationResult {
    pub(crate) fn bare(explanation: &str) -> Self {
        Self {
            worth_it: false,
            explanation: explanation.to_string(),
            details: None,
        }
    }
}

/// Formats a probability as a percentage with two decimals, without the sign.
pub fn percent(probability: f64) -> String {
    format!("{:.2}", probability * 100.0)
}

/// Cards a hand-size redraw puts back into the hand.
pub fn hand_redraw_count(input: &CalculationInput) -> u32 {
    input.cards_in_hand
}

/// Points the opponent still needs; zero once they reach `win_points`.
pub fn points_needed(win_points: u32, opponent_points: u32) -> u32 {
    win_points.saturating_sub(opponent_points)
}

/// Cards the effect makes someone draw, or `None` when it does nothing.
pub fn draw_count(card: &CardDefinition, input: &CalculationInput) -> Option<u32> {
    let count = match &card.policy {
        Policy::DrawToHandSize { .. } => hand_redraw_count(input),
        Policy::OpponentDrawByPoints { win_points, .. } => {
            points_needed(*win_points, input.opponent_points)
        }
        Policy::AlwaysWorthwhile { draw_count } => return Some(*draw_count),
    };
    Some(count).filter(|count| *count > 0)
}

pub fn draw_to_hand_size(
    card: &CardDefinition,
    threshold: f64,
    input: &CalculationInput,
) -> CalculationResult {
    let cards_to_draw = hand_redraw_count(input);
    if cards_to_draw == 0 {
        return CalculationResult {
            worth_it: false,
            explanation: format!(
                "You have no cards in hand, so {} would have no effect.",
                card.name
            ),
            details: Some(CalculationDetails::DrawToHandSize(DrawToHandSizeDetails {
                card_name: card.name.clone(),
                card_effect: card.effect_text.clone(),
                current_hand_size: input.cards_in_hand,
                cards_to_draw,
                cards_in_deck: input.cards_in_deck,
                combined_odds: None,
                odds: Vec::new(),
            })),
        };
    }

    let mut combined_odds = 1.0;
    let mut all_cards_found = true;
    let mut odds = Vec::with_capacity(input.targets.len());
    for (idx, target) in input.targets.iter().enumerate() {
        if target.in_hand > 0 {
            odds.push(CardOdds {
                card_index: idx + 1,
                in_hand: target.in_hand,
                remaining_in_deck: target.remaining_in_deck,
                probability: 1.0,
                comment: OddsComment::AlreadyInHand,
                will_discard: false,
            });
            continue;
        }
        let probability = hypergeometric(
            input.cards_in_deck,
            target.remaining_in_deck,
            cards_to_draw,
            1,
        );
        odds.push(CardOdds {
            card_index: idx + 1,
            in_hand: target.in_hand,
            remaining_in_deck: target.remaining_in_deck,
            probability,
            comment: OddsComment::for_chance(probability),
            will_discard: false,
        });
        combined_odds *= probability;
        if probability < threshold {
            all_cards_found = false;
        }
    }

    let worth_it = combined_odds > threshold || all_cards_found;
    let explanation = format!(
        "Playing {} will shuffle your hand of {} cards into your deck and draw {} new cards. \
         Chance of getting needed card(s): {}%. {}",
        card.name,
        input.cards_in_hand,
        cards_to_draw,
        percent(combined_odds),
        if worth_it {
            "Worth playing!"
        } else {
            "Probably not worth playing."
        }
    );
    CalculationResult {
        worth_it,
        explanation,
        details: Some(CalculationDetails::DrawToHandSize(DrawToHandSizeDetails {
            card_name: card.name.clone(),
            card_effect: card.effect_text.clone(),
            current_hand_size: input.cards_in_hand,
            cards_to_draw,
            cards_in_deck: input.cards_in_deck,
            combined_odds: Some(combined_odds),
            odds,
        })),
    }
}

/// Copies the opponent already holds are shuffled away too, so every tracked
/// card contributes its redraw odds and a held copy only raises the threshold.
pub fn opponent_draw_by_points(
    card: &CardDefinition,
    threshold_with_cards_in_hand: f64,
    threshold_without_cards_in_hand: f64,
    win_points: u32,
    input: &CalculationInput,
) -> CalculationResult {
    let points_needed = points_needed(win_points, input.opponent_points);
    if points_needed == 0 {
        return CalculationResult {
            worth_it: false,
            explanation: format!(
                "Opponent has no points left to earn. {} would have no effect.",
                card.name
            ),
            details: Some(CalculationDetails::OpponentDrawByPoints(
                OpponentDrawDetails {
                    card_name: card.name.clone(),
                    card_effect: card.effect_text.clone(),
                    opponent_points: input.opponent_points,
                    points_needed: 0,
                    cards_to_draw: 0,
                    cards_in_deck: input.cards_in_deck,
                    has_cards_in_hand: false,
                    combined_odds: None,
                    threshold_used: None,
                    recommendation: Some("Not worth playing in this situation.".to_string()),
                    odds: Vec::new(),
                },
            )),
        };
    }
    let cards_to_draw = points_needed;

    let any_cards_in_hand = input.targets.iter().any(|target| target.in_hand > 0);
    let mut combined_odds = 1.0;
    let odds: Vec<CardOdds> = input
        .targets
        .iter()
        .enumerate()
        .map(|(idx, target)| {
            let probability = hypergeometric(
                input.cards_in_deck,
                target.remaining_in_deck,
                cards_to_draw,
                1,
            );
            combined_odds *= probability;
            let will_discard = target.in_hand > 0;
            CardOdds {
                card_index: idx + 1,
                in_hand: target.in_hand,
                remaining_in_deck: target.remaining_in_deck,
                probability,
                comment: if will_discard {
                    OddsComment::WillDiscard
                } else {
                    OddsComment::for_chance(probability)
                },
                will_discard,
            }
        })
        .collect();

    let threshold = if any_cards_in_hand {
        threshold_with_cards_in_hand
    } else {
        threshold_without_cards_in_hand
    };
    let worth_it = combined_odds > threshold;

    let mut explanation = format!(
        "Playing {} will make your opponent shuffle their hand and draw {} new cards \
         based on their remaining points needed to win ({}). ",
        card.name, cards_to_draw, points_needed
    );
    if any_cards_in_hand {
        explanation.push_str("Warning: Your opponent will be drawing cards which might help them. ");
    }
    explanation.push_str(&format!(
        "Chance of them getting needed cards: {}%. ",
        percent(combined_odds)
    ));
    explanation.push_str(if worth_it {
        "Worth playing as a disruption!"
    } else {
        "Probably not worth playing."
    });

    CalculationResult {
        worth_it,
        explanation,
        details: Some(CalculationDetails::OpponentDrawByPoints(
            OpponentDrawDetails {
                card_name: card.name.clone(),
                card_effect: card.effect_text.clone(),
                opponent_points: input.opponent_points,
                points_needed,
                cards_to_draw,
                cards_in_deck: input.cards_in_deck,
                has_cards_in_hand: any_cards_in_hand,
                combined_odds: Some(combined_odds),
                threshold_used: Some(threshold),
                recommendation: None,
                odds,
            },
        )),
    }
}

pub fn always_worthwhile(card: &CardDefinition, draw_count: u32) -> CalculationResult {
    CalculationResult {
        worth_it: true,
        explanation: format!(
            "{} disrupts your opponent's hand by making them shuffle their hand into their deck \
             and draw {} new cards, generally worth playing if it fits your strategy.",
            card.name, draw_count
        ),
        details: Some(CalculationDetails::AlwaysWorthwhile(AlwaysWorthwhileDetails {
            card_name: card.name.clone(),
            card_effect: card.effect_text.clone(),
            strategic_value: "High".to_string(),
            draw_count,
            disruption_potential: format!(
                "Forces opponent to shuffle their hand and draw {} new cards",
                draw_count
            ),
            recommendation:
                "Consider the game state - best played when opponent has a large or valuable hand"
                    .to_string(),
        })),
    }
}
