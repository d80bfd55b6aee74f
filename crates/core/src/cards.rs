use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

pub const IONO: &str = "Iono";
pub const MARS: &str = "Mars";
pub const RED_CARD: &str = "Red Card";

/// Points a player needs to win a game.
pub const WIN_POINTS: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Affects {
    User,
    Opponent,
}

/// Calculation rule for a card, with its tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Policy {
    /// Hand is shuffled back and the same number of cards is redrawn.
    DrawToHandSize {
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    /// Opponent redraws one card per point they still need.
    OpponentDrawByPoints {
        #[serde(default = "default_threshold_with_cards_in_hand")]
        threshold_with_cards_in_hand: f64,
        #[serde(default = "default_threshold")]
        threshold_without_cards_in_hand: f64,
        #[serde(default = "default_win_points")]
        win_points: u32,
    },
    AlwaysWorthwhile {
        draw_count: u32,
    },
}

fn default_threshold() -> f64 {
    0.5
}

fn default_threshold_with_cards_in_hand() -> f64 {
    0.7
}

fn default_win_points() -> u32 {
    WIN_POINTS
}

impl Policy {
    pub fn id(&self) -> &'static str {
        match self {
            Self::DrawToHandSize { .. } => "draw_to_hand_size",
            Self::OpponentDrawByPoints { .. } => "opponent_draw_by_points",
            Self::AlwaysWorthwhile { .. } => "always_worthwhile",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDefinition {
    pub name: String,
    pub effect_text: String,
    pub policy: Policy,
    pub affects: Affects,
    #[serde(default)]
    pub uses_points: bool,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown card: {0}")]
    NotFound(String),
    #[error("duplicate card: {0}")]
    Duplicate(String),
    #[error("catalog has no cards")]
    Empty,
}

/// Read-only registry of supported cards, kept in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
}

impl CardCatalog {
    pub fn new(cards: Vec<CardDefinition>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.name.as_str()) {
                return Err(CatalogError::Duplicate(card.name.clone()));
            }
        }
        Ok(Self { cards })
    }

    /// The cards shipped with the calculator.
    pub fn standard() -> Self {
        Self {
            cards: vec![
                CardDefinition {
                    name: IONO.to_string(),
                    effect_text: "Trainer - Supporter: Each player shuffles the cards in their hand into their deck, then draws that many cards.".to_string(),
                    policy: Policy::DrawToHandSize { threshold: 0.5 },
                    affects: Affects::User,
                    uses_points: false,
                },
                CardDefinition {
                    name: MARS.to_string(),
                    effect_text: "Trainer - Supporter: Your opponent shuffles their hand into their deck and draws a card for each of their remaining points needed to win.".to_string(),
                    policy: Policy::OpponentDrawByPoints {
                        threshold_with_cards_in_hand: 0.7,
                        threshold_without_cards_in_hand: 0.5,
                        win_points: WIN_POINTS,
                    },
                    affects: Affects::Opponent,
                    uses_points: true,
                },
                CardDefinition {
                    name: RED_CARD.to_string(),
                    effect_text: "Trainer - Item: Your opponent shuffles their hand into their deck and draws 3 cards.".to_string(),
                    policy: Policy::AlwaysWorthwhile { draw_count: 3 },
                    affects: Affects::Opponent,
                    uses_points: false,
                },
            ],
        }
    }

    /// Shared instance of [`CardCatalog::standard`].
    pub fn builtin() -> &'static CardCatalog {
        static BUILTIN: OnceLock<CardCatalog> = OnceLock::new();
        BUILTIN.get_or_init(Self::standard)
    }

    pub fn names(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.name.as_str()).collect()
    }

    pub fn lookup(&self, name: &str) -> Result<&CardDefinition, CatalogError> {
        self.cards
            .iter()
            .find(|card| card.name == name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
