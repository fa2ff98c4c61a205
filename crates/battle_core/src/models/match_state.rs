//! Match state (aggregate root)
//!
//! `MatchState` is owned by exactly one match session. It is created once by
//! `BattleEngine::start_match` and changed only by `record_round`, which applies
//! a resolved round as a single transition. The caller keeps the state between
//! rounds, so everything here is serializable.
//!
//! The rules a match was dealt with travel inside the state and stay fixed
//! until the match ends.

use super::card::CardId;
use super::hand::Hand;
use super::round::RoundOutcome;
use crate::engine::config::BattleRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 카드별 사용 횟수 (증가만 함)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageCounter {
    counts: BTreeMap<CardId, u8>,
}

impl UsageCounter {
    pub fn count(&self, card_id: CardId) -> u8 {
        self.counts.get(&card_id).copied().unwrap_or(0)
    }

    /// 사용 횟수 +1, 새 값을 반환
    pub(crate) fn record(&mut self, card_id: CardId) -> u8 {
        let entry = self.counts.entry(card_id).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn total_plays(&self) -> u32 {
        self.counts.values().map(|&c| c as u32).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub(crate) hand: Hand,
    pub(crate) usage: UsageCounter,
    pub(crate) score: u32,
}

impl PlayerState {
    pub(crate) fn new(hand: Hand) -> Self {
        Self { hand, usage: UsageCounter::default(), score: 0 }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn usage(&self) -> &UsageCounter {
        &self.usage
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 아직 낼 수 있는 카드 ID (핸드 순서 유지)
    pub fn playable_ids(&self, usage_cap: u8) -> Vec<CardId> {
        self.hand
            .cards()
            .iter()
            .filter(|card| self.usage.count(card.id) < usage_cap)
            .map(|card| card.id)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    Player1,
    Player2,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// 누군가 승리 점수에 도달
    ScoreThreshold,
    /// 라운드 상한 도달
    RoundCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: MatchWinner,
    pub reason: EndReason,
    pub player1_score: u32,
    pub player2_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchPhase {
    AwaitingChoice,
    MatchOver(MatchResult),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) rules: BattleRules,
    pub(crate) player1: PlayerState,
    pub(crate) player2: PlayerState,
    /// 다음에 진행할 라운드 번호 (1부터)
    pub(crate) round: u32,
    pub(crate) last_outcome: Option<RoundOutcome>,
    #[serde(default)]
    pub(crate) history: Vec<RoundOutcome>,
    pub(crate) phase: MatchPhase,
}

impl MatchState {
    pub fn new(player1_hand: Hand, player2_hand: Hand, rules: BattleRules) -> Self {
        Self {
            rules,
            player1: PlayerState::new(player1_hand),
            player2: PlayerState::new(player2_hand),
            round: 1,
            last_outcome: None,
            history: Vec::new(),
            phase: MatchPhase::AwaitingChoice,
        }
    }

    /// 매치 시작 시 고정된 규칙
    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn player1(&self) -> &PlayerState {
        &self.player1
    }

    pub fn player2(&self) -> &PlayerState {
        &self.player2
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player1.score, self.player2.score)
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    pub fn phase(&self) -> &MatchPhase {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::MatchOver(_))
    }

    pub fn result(&self) -> Option<&MatchResult> {
        match &self.phase {
            MatchPhase::MatchOver(result) => Some(result),
            MatchPhase::AwaitingChoice => None,
        }
    }

    /// Player1이 이번 라운드에 낼 수 있는 카드. 매치가 끝났으면 비어 있다
    pub fn playable_ids(&self) -> Vec<CardId> {
        if self.is_over() {
            return Vec::new();
        }
        self.player1.playable_ids(self.rules.usage_cap)
    }

    /// 해결된 라운드를 한 번의 전이로 반영한다.
    ///
    /// 사용 횟수, 점수, 라운드 번호, 최근 결과를 갱신한 뒤 곧바로 종료 조건을 검사한다.
    pub(crate) fn record_round(&mut self, outcome: RoundOutcome) {
        self.player1.usage.record(outcome.player1_card.id);
        if let Some(opponent_card) = outcome.player2_card.id() {
            self.player2.usage.record(opponent_card);
        }

        self.player1.score += outcome.score_delta.player1;
        self.player2.score += outcome.score_delta.player2;
        self.round += 1;

        self.history.push(outcome.clone());
        self.last_outcome = Some(outcome);

        if let Some(result) = self.check_termination() {
            self.phase = MatchPhase::MatchOver(result);
        }
    }

    fn check_termination(&self) -> Option<MatchResult> {
        let (p1, p2) = self.scores();
        let score_to_win = self.rules.score_to_win;
        let reason = if p1 >= score_to_win || p2 >= score_to_win {
            EndReason::ScoreThreshold
        } else if self.round > self.rules.round_cap {
            EndReason::RoundCap
        } else {
            return None;
        };

        let winner = match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => MatchWinner::Player1,
            std::cmp::Ordering::Less => MatchWinner::Player2,
            std::cmp::Ordering::Equal => MatchWinner::Draw,
        };

        Some(MatchResult { winner, reason, player1_score: p1, player2_score: p2 })
    }
}
