//! Round outcome records
//!
//! A `RoundOutcome` is produced once per resolved round and never changes after.
//! Values are `Option<u8>`: `None` means the rating oracle gave up for that side,
//! which is shown as "no rating available" instead of a numeric 0.

use super::card::{Card, CardId, StatAxis};
use serde::{Deserialize, Serialize};

/// 레이팅 실패 시 표시 문구
pub const NO_RATING_LABEL: &str = "no rating available";

/// 비교 축
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ComparisonAxis {
    /// 고정 스탯 비교 (외부 호출 없음)
    Stat(StatAxis),
    /// 테마 비교 (레이팅 오라클 호출)
    Theme(String),
    /// 상대가 낼 카드가 없는 라운드
    NoContest,
}

impl ComparisonAxis {
    pub fn comparison_type(&self) -> &'static str {
        match self {
            ComparisonAxis::Stat(_) => "stat",
            ComparisonAxis::Theme(_) => "theme",
            ComparisonAxis::NoContest => "no-contest",
        }
    }

    pub fn label(&self) -> String {
        match self {
            ComparisonAxis::Stat(axis) => axis.key().to_string(),
            ComparisonAxis::Theme(theme) => theme.clone(),
            ComparisonAxis::NoContest => "no-contest".to_string(),
        }
    }
}

/// 상대가 낸 카드 (없을 수 있음)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "card", rename_all = "snake_case")]
pub enum PlayedCard {
    Card(Card),
    NoCardPlayed,
}

impl PlayedCard {
    pub fn card(&self) -> Option<&Card> {
        match self {
            PlayedCard::Card(card) => Some(card),
            PlayedCard::NoCardPlayed => None,
        }
    }

    pub fn id(&self) -> Option<CardId> {
        self.card().map(|card| card.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundWinner {
    Player1,
    Player2,
    Draw,
}

/// 라운드 점수 변화 (승자만 +1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub player1: u32,
    pub player2: u32,
}

impl ScoreDelta {
    pub fn for_winner(winner: RoundWinner) -> Self {
        match winner {
            RoundWinner::Player1 => Self { player1: 1, player2: 0 },
            RoundWinner::Player2 => Self { player1: 0, player2: 1 },
            RoundWinner::Draw => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// 이 결과가 만들어진 라운드 번호 (1부터)
    pub round: u32,
    pub axis: ComparisonAxis,
    pub player1_card: Card,
    pub player2_card: PlayedCard,
    pub player1_value: Option<u8>,
    pub player2_value: Option<u8>,
    pub winner: RoundWinner,
    pub score_delta: ScoreDelta,
}

impl RoundOutcome {
    pub fn is_no_contest(&self) -> bool {
        self.axis == ComparisonAxis::NoContest
    }

    /// 화면 표시용 값 문자열
    pub fn display_value(value: Option<u8>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => NO_RATING_LABEL.to_string(),
        }
    }

    pub fn summary(&self) -> String {
        let opponent = match self.player2_card.id() {
            Some(id) => format!("card {}", id),
            None => "no card".to_string(),
        };
        format!(
            "round {} [{}] card {} ({}) vs {} ({}) -> {:?}",
            self.round,
            self.axis.label(),
            self.player1_card.id,
            Self::display_value(self.player1_value),
            opponent,
            Self::display_value(self.player2_value),
            self.winner
        )
    }
}
