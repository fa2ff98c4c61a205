//! Battle round engine
//!
//! One call to `play_round` runs one state-machine step:
//!
//! ```text
//! AwaitingChoice ──play_round──▶ RoundResolved ──▶ AwaitingChoice (next round)
//!                                              └─▶ MatchOver
//! ```
//!
//! Player1 is the side that submits a card choice. Player2 is the non-interactive
//! counterpart; the engine picks its card from whatever is still playable.
//!
//! A match keeps the rules it was dealt with. The engine only plays states whose
//! stored rules equal its own.
//!
//! Validation failures return an error before anything is touched. Once a choice
//! passes validation the round always resolves, even if the rating oracle is down.

use super::config::{BattleRules, NullRatingPolicy};
use super::hand::{assemble_hand, eligible_cards};
use super::oracle::{rate_with_retry, theme_prompt, RatingOracle};
use super::rng::{self, BattleRng};
use crate::error::{BattleError, Result};
use crate::models::{
    Card, CardId, ComparisonAxis, MatchState, PlayedCard, RoundOutcome, RoundWinner, ScoreDelta,
};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// 플레이어 ID → enrichment 완료 카드 목록
pub trait CardPoolProvider {
    fn cards_for(&self, player_id: &str) -> Vec<Card>;
}

impl CardPoolProvider for HashMap<String, Vec<Card>> {
    fn cards_for(&self, player_id: &str) -> Vec<Card> {
        self.get(player_id).cloned().unwrap_or_default()
    }
}

/// 두 값을 비교해 라운드 승자를 정한다
pub fn decide_winner(
    player1: Option<u8>,
    player2: Option<u8>,
    policy: NullRatingPolicy,
) -> RoundWinner {
    match (player1, player2) {
        (Some(a), Some(b)) => match a.cmp(&b) {
            Ordering::Greater => RoundWinner::Player1,
            Ordering::Less => RoundWinner::Player2,
            Ordering::Equal => RoundWinner::Draw,
        },
        (Some(_), None) if policy == NullRatingPolicy::PresentWins => RoundWinner::Player1,
        (None, Some(_)) if policy == NullRatingPolicy::PresentWins => RoundWinner::Player2,
        _ => RoundWinner::Draw,
    }
}

pub struct BattleEngine<O, R> {
    rules: BattleRules,
    oracle: O,
    rng: R,
}

impl<O: RatingOracle> BattleEngine<O, ChaCha8Rng> {
    /// 시드 고정 엔진 (리플레이/테스트용)
    pub fn with_seed(rules: BattleRules, oracle: O, seed: u64) -> Result<Self> {
        Self::new(rules, oracle, rng::seeded(seed))
    }

    pub fn with_entropy(rules: BattleRules, oracle: O) -> Result<Self> {
        Self::new(rules, oracle, rng::from_entropy())
    }
}

impl<O: RatingOracle, R: BattleRng> BattleEngine<O, R> {
    pub fn new(rules: BattleRules, oracle: O, rng: R) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules, oracle, rng })
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    /// 한 플레이어의 카드 풀에서 양쪽 핸드를 모두 뽑는다 (핸드끼리 겹칠 수 있음)
    pub fn start_match<P: CardPoolProvider + ?Sized>(
        &mut self,
        player_id: &str,
        provider: &P,
    ) -> Result<MatchState> {
        let pool = eligible_cards(&provider.cards_for(player_id));
        let player1_hand = assemble_hand(&pool, &self.rules, &mut self.rng)?;
        let player2_hand = assemble_hand(&pool, &self.rules, &mut self.rng)?;

        info!(player_id, pool = pool.len(), "match started");
        Ok(MatchState::new(player1_hand, player2_hand, self.rules.clone()))
    }

    /// 양쪽이 각자의 카드 풀을 쓰는 매치
    pub fn start_match_versus<P: CardPoolProvider + ?Sized>(
        &mut self,
        player_id: &str,
        opponent_id: &str,
        provider: &P,
    ) -> Result<MatchState> {
        let player1_pool = eligible_cards(&provider.cards_for(player_id));
        let player2_pool = eligible_cards(&provider.cards_for(opponent_id));
        let player1_hand = assemble_hand(&player1_pool, &self.rules, &mut self.rng)?;
        let player2_hand = assemble_hand(&player2_pool, &self.rules, &mut self.rng)?;

        info!(player_id, opponent_id, "match started");
        Ok(MatchState::new(player1_hand, player2_hand, self.rules.clone()))
    }

    /// 입력 상태는 그대로 두고 (결과, 다음 상태)를 돌려준다
    pub fn play_round(
        &mut self,
        state: &MatchState,
        card_id: CardId,
    ) -> Result<(RoundOutcome, MatchState)> {
        let mut next = state.clone();
        let outcome = self.play_round_in_place(&mut next, card_id)?;
        Ok((outcome, next))
    }

    /// 검증 실패 시 `state`는 변경되지 않는다
    pub fn play_round_in_place(
        &mut self,
        state: &mut MatchState,
        card_id: CardId,
    ) -> Result<RoundOutcome> {
        let card = self.validate_choice(state, card_id)?;
        let round = state.round();

        let outcome = match self.pick_opponent_card(state, card_id) {
            Some(opponent_card) => self.resolve_contest(round, card, opponent_card),
            None => Self::no_contest(round, card),
        };
        debug!(summary = %outcome.summary(), "round resolved");

        state.record_round(outcome.clone());

        if let Some(result) = state.result() {
            info!(
                winner = ?result.winner,
                reason = ?result.reason,
                player1_score = result.player1_score,
                player2_score = result.player2_score,
                "match over"
            );
        }
        Ok(outcome)
    }

    fn validate_choice(&self, state: &MatchState, card_id: CardId) -> Result<Card> {
        if state.rules() != &self.rules {
            return Err(BattleError::RulesMismatch);
        }
        if state.is_over() {
            return Err(BattleError::MatchAlreadyOver);
        }

        let player = state.player1();
        let card = player.hand().get(card_id).ok_or(BattleError::CardNotInHand { card_id })?;

        let count = player.usage().count(card_id);
        if count >= self.rules.usage_cap {
            return Err(BattleError::CardUsageLimitExceeded { card_id, count });
        }

        Ok(card.clone())
    }

    /// 상대 후보: 사용 한도가 남았고 이번에 Player1이 고른 ID가 아닌 카드
    fn pick_opponent_card(&mut self, state: &MatchState, chosen: CardId) -> Option<Card> {
        let opponent = state.player2();
        let candidates: Vec<&Card> = opponent
            .hand()
            .cards()
            .iter()
            .filter(|card| card.id != chosen)
            .filter(|card| opponent.usage().count(card.id) < self.rules.usage_cap)
            .collect();

        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.choose_index(candidates.len());
        Some(candidates[index].clone())
    }

    fn no_contest(round: u32, card: Card) -> RoundOutcome {
        RoundOutcome {
            round,
            axis: ComparisonAxis::NoContest,
            player1_value: None,
            player2_value: None,
            player1_card: card,
            player2_card: PlayedCard::NoCardPlayed,
            winner: RoundWinner::Draw,
            score_delta: ScoreDelta::default(),
        }
    }

    fn resolve_contest(&mut self, round: u32, card: Card, opponent_card: Card) -> RoundOutcome {
        let axis = self.choose_axis();
        let (player1_value, player2_value) = self.resolve_values(&axis, &card, &opponent_card);
        let winner = decide_winner(player1_value, player2_value, self.rules.null_rating);

        RoundOutcome {
            round,
            axis,
            player1_card: card,
            player2_card: PlayedCard::Card(opponent_card),
            player1_value,
            player2_value,
            winner,
            score_delta: ScoreDelta::for_winner(winner),
        }
    }

    fn choose_axis(&mut self) -> ComparisonAxis {
        if self.rng.next_f32() < self.rules.stat_branch_probability {
            let index = self.rng.choose_index(self.rules.stat_axes.len());
            ComparisonAxis::Stat(self.rules.stat_axes[index])
        } else {
            let index = self.rng.choose_index(self.rules.themes.len());
            ComparisonAxis::Theme(self.rules.themes[index].clone())
        }
    }

    fn resolve_values(
        &self,
        axis: &ComparisonAxis,
        card: &Card,
        opponent_card: &Card,
    ) -> (Option<u8>, Option<u8>) {
        match axis {
            ComparisonAxis::Stat(stat) => (Some(card.stat(*stat)), Some(opponent_card.stat(*stat))),
            ComparisonAxis::Theme(theme) => {
                let scale = self.rules.rating_scale_max;
                let attempts = self.rules.oracle_attempts;
                let prompt = theme_prompt(theme, scale);
                let oracle = &self.oracle;

                // 두 호출은 서로 독립적이므로 동시에 실행하고 둘 다 끝날 때까지 기다린다
                rayon::join(
                    || rate_with_retry(oracle, &card.image_ref, &prompt, scale, attempts),
                    || rate_with_retry(oracle, &opponent_card.image_ref, &prompt, scale, attempts),
                )
            }
            ComparisonAxis::NoContest => (None, None),
        }
    }
}
