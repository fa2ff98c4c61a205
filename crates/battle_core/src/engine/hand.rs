// 핸드 편성: 적격 카드 풀에서 무작위로 N장 뽑기
use super::config::BattleRules;
use super::rng::BattleRng;
use crate::error::{BattleError, Result};
use crate::models::{Card, Hand};
use std::collections::HashSet;
use tracing::debug;

/// enrichment가 끝난 카드만 남기고 중복 ID는 첫 번째만 유지한다
pub fn eligible_cards(pool: &[Card]) -> Vec<Card> {
    let mut seen = HashSet::new();
    pool.iter()
        .filter(|card| card.is_enriched())
        .filter(|card| seen.insert(card.id))
        .cloned()
        .collect()
}

/// 비복원 무작위 추출로 핸드를 만든다. 입력 슬라이스는 건드리지 않는다
pub fn assemble_hand<R: BattleRng>(
    eligible: &[Card],
    rules: &BattleRules,
    rng: &mut R,
) -> Result<Hand> {
    if eligible.len() < rules.hand_size {
        return Err(BattleError::InsufficientCards {
            required: rules.hand_size,
            actual: eligible.len(),
        });
    }

    let mut order: Vec<usize> = (0..eligible.len()).collect();
    rng.shuffle(&mut order);

    let cards: Vec<Card> =
        order.into_iter().take(rules.hand_size).map(|i| eligible[i].clone()).collect();
    let hand = Hand::from_cards(cards);
    debug!(pool = eligible.len(), hand = ?hand.ids(), "hand assembled");

    Ok(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::seeded;
    use crate::models::{CardId, CardStats};

    fn pool(n: u64) -> Vec<Card> {
        (1..=n)
            .map(|id| {
                Card::new(id, format!("img/{}.jpg", id))
                    .with_stats(CardStats::new(1, 2, 3, 4, 5))
                    .with_effect("Sparkles")
            })
            .collect()
    }

    #[test]
    fn test_hand_has_five_distinct_cards_from_pool() {
        let rules = BattleRules::standard();
        let cards = pool(12);
        let mut rng = seeded(99);

        for _ in 0..50 {
            let hand = assemble_hand(&cards, &rules, &mut rng).unwrap();
            assert_eq!(hand.len(), 5);
            let ids: HashSet<CardId> = hand.ids().into_iter().collect();
            assert_eq!(ids.len(), 5);
            assert!(ids.iter().all(|id| (1..=12).contains(id)));
        }
    }

    #[test]
    fn test_exactly_five_uses_whole_pool() {
        let rules = BattleRules::standard();
        let cards = pool(5);
        let hand = assemble_hand(&cards, &rules, &mut seeded(1)).unwrap();
        let mut ids = hand.ids();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_small_pool_fails() {
        let rules = BattleRules::standard();
        for n in 0..5 {
            let err = assemble_hand(&pool(n), &rules, &mut seeded(3)).unwrap_err();
            assert_eq!(err, BattleError::InsufficientCards { required: 5, actual: n as usize });
        }
    }

    #[test]
    fn test_input_pool_is_untouched() {
        let rules = BattleRules::standard();
        let cards = pool(8);
        let before = cards.clone();
        let _ = assemble_hand(&cards, &rules, &mut seeded(5)).unwrap();
        assert_eq!(cards, before);
    }

    #[test]
    fn test_hand_size_follows_rules() {
        let rules = BattleRules { hand_size: 3, ..BattleRules::standard() };
        let hand = assemble_hand(&pool(4), &rules, &mut seeded(8)).unwrap();
        assert_eq!(hand.len(), 3);
    }

    #[test]
    fn test_eligible_cards_filters_and_dedups() {
        let mut cards = pool(4);
        cards.push(Card::new(9, "raw.jpg"));
        cards.push(cards[0].clone());

        let eligible = eligible_cards(&cards);
        let ids: Vec<CardId> = eligible.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: pools of size >= hand_size always yield a full hand of distinct cards
            #[test]
            fn prop_hand_size_invariant(size in 0u64..30, seed in any::<u64>()) {
                let rules = BattleRules::standard();
                let cards = pool(size);
                match assemble_hand(&cards, &rules, &mut seeded(seed)) {
                    Ok(hand) => {
                        prop_assert!(size >= 5);
                        let ids: HashSet<CardId> = hand.ids().into_iter().collect();
                        prop_assert_eq!(ids.len(), 5);
                    }
                    Err(BattleError::InsufficientCards { required, actual }) => {
                        prop_assert!(size < 5);
                        prop_assert_eq!(required, 5);
                        prop_assert_eq!(actual, size as usize);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            }
        }
    }
}
