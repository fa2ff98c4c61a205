// 핸드: 매치 동안 고정되는 카드 묶음
use super::card::{Card, CardId};
use serde::{Deserialize, Serialize};

/// 플레이어 핸드
///
/// 매치 시작 시 한 번만 만들어지고 이후 크기와 구성이 바뀌지 않는다.
/// 라운드마다 바뀌는 것은 사용 횟수뿐이다 (`UsageCounter`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.get(card_id).is_some()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }
}
