use crate::RngState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCard {
    /// A copy of the tracked card at this index.
    Target(usize),
    Filler,
}

/// Deck used by the draw simulator: copies of each tracked card plus filler.
#[derive(Debug, Default, Clone)]
pub struct SimDeck {
    pub cards: Vec<SimCard>,
}

impl SimDeck {
    /// `None` when the tracked copies do not fit in `size` cards.
    pub fn build(size: u32, copies: &[u32]) -> Option<Self> {
        let tracked: u32 = copies.iter().sum();
        if tracked > size {
            return None;
        }
        let mut cards = Vec::with_capacity(size as usize);
        for (idx, count) in copies.iter().enumerate() {
            cards.extend(std::iter::repeat(SimCard::Target(idx)).take(*count as usize));
        }
        cards.extend(std::iter::repeat(SimCard::Filler).take((size - tracked) as usize));
        Some(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draws `count` cards without replacement. The deck keeps every card, so
    /// the next draw starts from a full deck again.
    pub fn draw(&mut self, rng: &mut RngState, count: usize) -> &[SimCard] {
        let count = count.min(self.cards.len());
        rng.draw_sample(&mut self.cards, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_lays_out_targets_then_filler() {
        let deck = SimDeck::build(6, &[2, 1]).expect("fits");
        assert_eq!(deck.len(), 6);
        assert_eq!(
            deck.cards,
            vec![
                SimCard::Target(0),
                SimCard::Target(0),
                SimCard::Target(1),
                SimCard::Filler,
                SimCard::Filler,
                SimCard::Filler,
            ]
        );
        assert!(SimDeck::build(2, &[2, 1]).is_none());
    }

    #[test]
    fn draw_is_capped_by_deck_size_and_reproducible() {
        let mut a = SimDeck::build(5, &[1]).expect("fits");
        let mut b = a.clone();
        let mut rng_a = RngState::from_seed(11);
        let mut rng_b = RngState::from_seed(11);
        assert_eq!(a.draw(&mut rng_a, 9).len(), 5);
        assert_eq!(b.draw(&mut rng_b, 9).len(), 5);
        assert_eq!(a.draw(&mut rng_a, 2), b.draw(&mut rng_b, 2));
    }
}
