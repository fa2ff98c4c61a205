use crate::models::CardId;
use thiserror::Error;

/// 카드 배틀 에러
///
/// 모든 변형은 호출자에게 그대로 전달되며 엔진 내부에서 재시도하지 않는다.
/// 검증 실패 시 MatchState는 변경되지 않는다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Insufficient eligible cards: required {required}, found {actual}")]
    InsufficientCards { required: usize, actual: usize },

    #[error("Match is already over")]
    MatchAlreadyOver,

    #[error("Card {card_id} is not in the active player's hand")]
    CardNotInHand { card_id: CardId },

    #[error("Card {card_id} has already been played {count} times")]
    CardUsageLimitExceeded { card_id: CardId, count: u8 },

    #[error("Invalid rules: {0}")]
    InvalidRules(String),

    #[error("Match was started with different rules")]
    RulesMismatch,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BattleError {
    /// 같은 매치에서 입력만 바꿔 다시 시도할 수 있는지 여부
    pub fn is_recoverable(&self) -> bool {
        match self {
            BattleError::CardNotInHand { .. } => true,
            BattleError::CardUsageLimitExceeded { .. } => true,
            BattleError::InsufficientCards { .. } => true,
            BattleError::MatchAlreadyOver => false,
            BattleError::InvalidRules(_) => false,
            BattleError::RulesMismatch => false,
            BattleError::Serialization(_) => false,
        }
    }

    /// UI에 그대로 보여줄 수 있는 안내 문구
    pub fn prompt(&self) -> String {
        match self {
            BattleError::InsufficientCards { required, actual } => format!(
                "You need at least {} rated posts to start a battle (you have {}).",
                required, actual
            ),
            BattleError::MatchAlreadyOver => {
                "This match has already ended. Start a new match to keep playing.".to_string()
            }
            BattleError::CardNotInHand { .. } => {
                "That card is not in your hand. Choose a card from your hand.".to_string()
            }
            BattleError::CardUsageLimitExceeded { count, .. } => format!(
                "That card has been played {} times already. Choose a different card.",
                count
            ),
            BattleError::RulesMismatch => {
                "The rules of a match cannot change once it has started.".to_string()
            }
            BattleError::InvalidRules(_) | BattleError::Serialization(_) => {
                "Something went wrong with this match. Please try again.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for BattleError {
    fn from(err: serde_json::Error) -> Self {
        BattleError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for BattleError {
    fn from(err: serde_yaml::Error) -> Self {
        BattleError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_names_card_and_count() {
        let err = BattleError::CardUsageLimitExceeded { card_id: 7, count: 2 };
        assert_eq!(err.to_string(), "Card 7 has already been played 2 times");
        assert!(err.prompt().contains("Choose a different card"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_match_over_is_not_recoverable() {
        let err = BattleError::MatchAlreadyOver;
        assert!(!err.is_recoverable());
        assert!(err.prompt().contains("already ended"));
    }

    #[test]
    fn test_rules_mismatch_is_not_recoverable() {
        let err = BattleError::RulesMismatch;
        assert!(!err.is_recoverable());
        assert!(err.prompt().contains("cannot change"));
    }

    #[test]
    fn test_insufficient_cards_message() {
        let err = BattleError::InsufficientCards { required: 5, actual: 3 };
        assert_eq!(err.to_string(), "Insufficient eligible cards: required 5, found 3");
    }
}
