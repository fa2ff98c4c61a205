//! # Battle Rules Configuration
//!
//! 게임 규칙 상수를 하나의 값 객체로 모아 엔진 생성 시 주입한다.
//!
//! ## 프리셋
//! - `standard()`: 5라운드, 3점 선승, 카드당 2회
//! - `quick()`: 3라운드, 2점 선승
//! - `stats_only()`: 고정 스탯 비교만 사용 (오라클 호출 없음)
//!
//! ## 사용법
//! ```rust
//! use battle_core::engine::config::BattleRules;
//!
//! let rules = BattleRules::standard();
//! let yaml = rules.to_yaml_string().unwrap();
//! let loaded = BattleRules::from_yaml_str(&yaml).unwrap();
//! assert_eq!(rules, loaded);
//! ```

mod themes;

pub use themes::{default_themes, DEFAULT_THEMES};

use crate::error::{BattleError, Result};
use crate::models::StatAxis;
use serde::{Deserialize, Serialize};

/// 한쪽 레이팅이 없을 때의 판정 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullRatingPolicy {
    /// 한쪽이라도 값이 없으면 무승부
    #[default]
    Draw,
    /// 값이 있는 쪽이 승리 (둘 다 없으면 무승부)
    PresentWins,
}

/// 카드 배틀 규칙
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    /// 고정 스탯 비교에 쓰는 축 (기본: 5축 전부)
    pub stat_axes: Vec<StatAxis>,
    /// 테마 카탈로그 (기본: 20개)
    pub themes: Vec<String>,
    /// 오라클 평가 척도 상한 (기본: 10, 하한은 항상 1)
    pub rating_scale_max: u8,
    /// 오라클 호출당 최대 시도 횟수 (기본: 3)
    pub oracle_attempts: u32,
    /// 라운드 상한 (기본: 5)
    pub round_cap: u32,
    /// 승리 점수 (기본: 3)
    pub score_to_win: u32,
    /// 핸드 크기 (기본: 5)
    pub hand_size: usize,
    /// 카드당 최대 사용 횟수 (기본: 2)
    pub usage_cap: u8,
    /// 고정 스탯 분기 확률 (기본: 0.5)
    pub stat_branch_probability: f32,
    pub null_rating: NullRatingPolicy,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            stat_axes: StatAxis::ALL.to_vec(),
            themes: default_themes(),
            rating_scale_max: 10,
            oracle_attempts: 3,
            round_cap: 5,
            score_to_win: 3,
            hand_size: 5,
            usage_cap: 2,
            stat_branch_probability: 0.5,
            null_rating: NullRatingPolicy::Draw,
        }
    }
}

impl BattleRules {
    pub fn standard() -> Self {
        Self::default()
    }

    /// 짧은 매치 (3라운드, 2점 선승)
    pub fn quick() -> Self {
        Self { round_cap: 3, score_to_win: 2, ..Self::default() }
    }

    /// 오라클 없이 고정 스탯만 비교
    pub fn stats_only() -> Self {
        Self { stat_branch_probability: 1.0, ..Self::default() }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "quick" => Some(Self::quick()),
            "stats_only" => Some(Self::stats_only()),
            _ => None,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let rules: BattleRules = serde_yaml::from_str(yaml)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// 진행 불가능한 규칙 조합을 거부한다
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(BattleError::InvalidRules(msg.to_string()));

        if self.hand_size == 0 {
            return invalid("hand_size must be at least 1");
        }
        if self.usage_cap == 0 {
            return invalid("usage_cap must be at least 1");
        }
        if self.round_cap == 0 {
            return invalid("round_cap must be at least 1");
        }
        if self.score_to_win == 0 {
            return invalid("score_to_win must be at least 1");
        }
        if self.rating_scale_max == 0 {
            return invalid("rating_scale_max must be at least 1");
        }
        if self.oracle_attempts == 0 {
            return invalid("oracle_attempts must be at least 1");
        }
        // 매 라운드 Player1 카드가 1회씩 소모되므로 라운드 상한까지 낼 카드가 있어야 한다
        if self.round_cap as usize > self.hand_size.saturating_mul(self.usage_cap as usize) {
            return invalid("round_cap must not exceed hand_size * usage_cap");
        }
        if !(0.0..=1.0).contains(&self.stat_branch_probability) {
            return invalid("stat_branch_probability must be within 0.0..=1.0");
        }
        if self.stat_branch_probability > 0.0 && self.stat_axes.is_empty() {
            return invalid("stat_axes must not be empty when the stat branch can be chosen");
        }
        if self.stat_branch_probability < 1.0 && self.themes.is_empty() {
            return invalid("themes must not be empty when the theme branch can be chosen");
        }
        Ok(())
    }
}

// ========== Tests ==========
