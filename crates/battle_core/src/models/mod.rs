// 카드 배틀 데이터 모델

pub mod card;
pub mod hand;
pub mod match_state;
pub mod round;

pub use card::{Card, CardId, CardStats, StatAxis};
pub use hand::Hand;
pub use match_state::{
    EndReason, MatchPhase, MatchResult, MatchState, MatchWinner, PlayerState,
    UsageCounter,
};
pub use round::{
    ComparisonAxis, PlayedCard, RoundOutcome, RoundWinner, ScoreDelta, NO_RATING_LABEL,
};
