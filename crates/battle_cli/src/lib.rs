//! Battle CLI Library
//!
//! 카드 풀 JSON / 규칙 YAML 로딩과 파일 기반 레이팅 오라클

use anyhow::{Context, Result};
use battle_core::{parse_rating, BattleRules, Card, OracleFailure, RatingOracle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// 카드 풀 JSON (카드 배열) 로딩
pub fn load_pool(path: &Path) -> Result<Vec<Card>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read card pool: {}", path.display()))?;
    let cards: Vec<Card> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse card pool: {}", path.display()))?;
    Ok(cards)
}

/// 규칙 YAML 로딩 (검증 포함)
pub fn load_rules(path: &Path) -> Result<BattleRules> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules: {}", path.display()))?;
    BattleRules::from_yaml_str(&yaml)
        .with_context(|| format!("Invalid rules file: {}", path.display()))
}

/// 레이팅 파일 항목: 점수 그대로이거나 모델이 돌려준 응답 텍스트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingEntry {
    Score(i64),
    Reply(String),
}

/// 이미지별 고정 응답 테이블 오라클
///
/// 테이블에 없는 이미지는 호출 실패로 처리된다. 숫자 항목의 범위 검사는 엔진의
/// 재시도 로직이 맡고, 텍스트 항목은 `parse_rating`으로 읽는다.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    ratings: HashMap<String, RatingEntry>,
}

impl TableOracle {
    pub fn new(ratings: HashMap<String, RatingEntry>) -> Self {
        Self { ratings }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ratings: {}", path.display()))?;
        let ratings: HashMap<String, RatingEntry> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse ratings: {}", path.display()))?;
        info!(path = %path.display(), entries = ratings.len(), "ratings loaded");
        Ok(Self::new(ratings))
    }
}

impl RatingOracle for TableOracle {
    fn rate(&self, image_ref: &str, _prompt: &str, scale_max: u8) -> Result<i64, OracleFailure> {
        match self.ratings.get(image_ref) {
            Some(RatingEntry::Score(score)) => Ok(*score),
            Some(RatingEntry::Reply(text)) => parse_rating(text, scale_max).map(i64::from),
            None => Err(OracleFailure::Unavailable(format!("no rating for {}", image_ref))),
        }
    }
}

/// `--choices 3,1,4` 파싱
pub fn parse_choices(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u64>().with_context(|| format!("Invalid card id: {}", s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattleEngine, CardStats};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_pool() {
        let cards = vec![
            Card::new(1, "a.jpg").with_stats(CardStats::new(1, 2, 3, 4, 5)).with_effect("Glow"),
            Card::new(2, "b.jpg"),
        ];
        let file = write_temp(&serde_json::to_string(&cards).unwrap());

        let loaded = load_pool(file.path()).unwrap();
        assert_eq!(loaded, cards);
        assert!(loaded[0].is_enriched());
        assert!(!loaded[1].is_enriched());
    }

    #[test]
    fn test_load_pool_reports_path() {
        let file = write_temp("not json");
        let err = load_pool(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse card pool"));
    }

    #[test]
    fn test_load_rules_validates() {
        let file = write_temp("round_cap: 7\nscore_to_win: 4\n");
        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.round_cap, 7);
        assert_eq!(rules.score_to_win, 4);
        assert_eq!(rules.hand_size, 5);

        let bad = write_temp("hand_size: 0\n");
        assert!(load_rules(bad.path()).is_err());
    }

    #[test]
    fn test_table_oracle() {
        let file = write_temp(r#"{"a.jpg": 7, "b.jpg": 42, "c.jpg": "Score: 9/10", "d.jpg": "lovely"}"#);
        let oracle = TableOracle::load(file.path()).unwrap();

        assert_eq!(oracle.rate("a.jpg", "prompt", 10), Ok(7));
        assert_eq!(oracle.rate("b.jpg", "prompt", 10), Ok(42));
        assert_eq!(oracle.rate("c.jpg", "prompt", 10), Ok(9));
        assert!(matches!(oracle.rate("d.jpg", "prompt", 10), Err(OracleFailure::NotNumeric(_))));
        assert!(matches!(oracle.rate("e.jpg", "prompt", 10), Err(OracleFailure::Unavailable(_))));
    }

    #[test]
    fn test_text_replies_drive_theme_rounds() {
        let cards: Vec<Card> = (1..=5)
            .map(|id| {
                Card::new(id, format!("{}.jpg", id))
                    .with_stats(CardStats::new(5, 5, 5, 5, 5))
                    .with_effect("Glow")
            })
            .collect();
        let ratings = cards
            .iter()
            .map(|card| {
                let reply = format!("I would rate this {} out of 10.", card.id + 3);
                (card.image_ref.clone(), RatingEntry::Reply(reply))
            })
            .collect();
        let rules = BattleRules { stat_branch_probability: 0.0, ..BattleRules::standard() };
        let mut pools = HashMap::new();
        pools.insert("cli".to_string(), cards);

        let mut engine = BattleEngine::with_seed(rules, TableOracle::new(ratings), 17).unwrap();
        let state = engine.start_match("cli", &pools).unwrap();
        let choice = state.playable_ids()[0];
        let (outcome, _) = engine.play_round(&state, choice).unwrap();

        assert_eq!(outcome.player1_value, Some(choice as u8 + 3));
        let opponent = outcome.player2_card.id().unwrap();
        assert_eq!(outcome.player2_value, Some(opponent as u8 + 3));
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(parse_choices("3, 1,4").unwrap(), vec![3, 1, 4]);
        assert!(parse_choices("").unwrap().is_empty());
        assert!(parse_choices("3,x").is_err());
    }
}
