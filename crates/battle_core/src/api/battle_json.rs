// Card Battle JSON API Layer
// String in / string out wrappers for the transport layer. The caller keeps the
// full MatchState between calls and sends it back with every round. The rules
// ride inside that state; a round request can restate them but not change them.

use crate::engine::{BattleEngine, BattleRng, BattleRules, RatingOracle, UnavailableOracle};
use crate::error::{BattleError, Result};
use crate::models::{Card, CardId, MatchResult, MatchState, RoundOutcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

const OPPONENT_POOL_KEY: &str = "__opponent__";

// ========== Request/Response Structures ==========

#[derive(Debug, Serialize, Deserialize)]
pub struct StartMatchRequest {
    pub player_id: String,
    /// 카드 풀 제공자가 돌려준 플레이어 카드
    pub cards: Vec<Card>,
    /// 없으면 같은 풀에서 상대 핸드도 뽑는다
    #[serde(default)]
    pub opponent_cards: Option<Vec<Card>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: Option<BattleRules>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartMatchResponse {
    pub success: bool,
    pub state: Option<MatchState>,
    pub playable_card_ids: Vec<CardId>,
    pub error: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayRoundRequest {
    pub state: MatchState,
    pub card_id: CardId,
    #[serde(default)]
    pub seed: Option<u64>,
    /// 있으면 매치에 저장된 규칙과 같아야 한다
    #[serde(default)]
    pub rules: Option<BattleRules>,
}

/// 라운드 결과 + 화면 표시용 문자열
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundView {
    #[serde(flatten)]
    pub outcome: RoundOutcome,
    pub comparison_type: String,
    pub axis_label: String,
    pub player1_display: String,
    pub player2_display: String,
}

impl From<RoundOutcome> for RoundView {
    fn from(outcome: RoundOutcome) -> Self {
        Self {
            comparison_type: outcome.axis.comparison_type().to_string(),
            axis_label: outcome.axis.label(),
            player1_display: RoundOutcome::display_value(outcome.player1_value),
            player2_display: RoundOutcome::display_value(outcome.player2_value),
            outcome,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayRoundResponse {
    pub success: bool,
    pub outcome: Option<RoundView>,
    pub state: Option<MatchState>,
    pub match_result: Option<MatchResult>,
    pub playable_card_ids: Vec<CardId>,
    pub error: Option<String>,
    pub prompt: Option<String>,
}

// ========== Public API Functions ==========

/// 매치 시작
pub fn start_match_json(request_json: &str) -> String {
    let response = match serde_json::from_str::<StartMatchRequest>(request_json) {
        Ok(request) => {
            let rules = request.rules.clone().unwrap_or_default();
            match start_match(request, &rules) {
                Ok(state) => StartMatchResponse {
                    success: true,
                    playable_card_ids: state.playable_ids(),
                    state: Some(state),
                    error: None,
                    prompt: None,
                },
                Err(err) => {
                    warn!(error = %err, "start match rejected");
                    StartMatchResponse {
                        success: false,
                        state: None,
                        playable_card_ids: Vec::new(),
                        prompt: Some(err.prompt()),
                        error: Some(err.to_string()),
                    }
                }
            }
        }
        Err(e) => StartMatchResponse {
            success: false,
            state: None,
            playable_card_ids: Vec::new(),
            error: Some(format!("Invalid request format: {}", e)),
            prompt: None,
        },
    };

    to_json(&response)
}

/// 라운드 진행. 실패 시 상태는 돌려주지 않으며 호출자는 기존 상태로 다시 요청하면 된다
pub fn play_round_json<O: RatingOracle>(request_json: &str, oracle: &O) -> String {
    let response = match serde_json::from_str::<PlayRoundRequest>(request_json) {
        Ok(request) => match play_round(request, oracle) {
                Ok((outcome, state)) => PlayRoundResponse {
                    success: true,
                    outcome: Some(outcome.into()),
                    match_result: state.result().copied(),
                    playable_card_ids: state.playable_ids(),
                    state: Some(state),
                    error: None,
                    prompt: None,
                },
                Err(err) => {
                    warn!(error = %err, "round rejected");
                    PlayRoundResponse {
                        success: false,
                        outcome: None,
                        state: None,
                        match_result: None,
                        playable_card_ids: Vec::new(),
                        prompt: Some(err.prompt()),
                        error: Some(err.to_string()),
                    }
                }
            },
        Err(e) => PlayRoundResponse {
            success: false,
            outcome: None,
            state: None,
            match_result: None,
            playable_card_ids: Vec::new(),
            error: Some(format!("Invalid request format: {}", e)),
            prompt: None,
        },
    };

    to_json(&response)
}

// ========== Internals ==========

fn start_match(request: StartMatchRequest, rules: &BattleRules) -> Result<MatchState> {
    match request.seed {
        Some(seed) => {
            deal(BattleEngine::with_seed(rules.clone(), UnavailableOracle, seed)?, request)
        }
        None => deal(BattleEngine::with_entropy(rules.clone(), UnavailableOracle)?, request),
    }
}

fn deal<R: BattleRng>(
    mut engine: BattleEngine<UnavailableOracle, R>,
    request: StartMatchRequest,
) -> Result<MatchState> {
    let mut pools = HashMap::new();
    pools.insert(request.player_id.clone(), request.cards);

    match request.opponent_cards {
        Some(opponent_cards) => {
            pools.insert(OPPONENT_POOL_KEY.to_string(), opponent_cards);
            engine.start_match_versus(&request.player_id, OPPONENT_POOL_KEY, &pools)
        }
        None => engine.start_match(&request.player_id, &pools),
    }
}

fn play_round<O: RatingOracle>(
    request: PlayRoundRequest,
    oracle: &O,
) -> Result<(RoundOutcome, MatchState)> {
    let rules = request.state.rules();
    if request.rules.as_ref().is_some_and(|restated| restated != rules) {
        return Err(BattleError::RulesMismatch);
    }

    match request.seed {
        Some(seed) => BattleEngine::with_seed(rules.clone(), oracle, seed)?
            .play_round(&request.state, request.card_id),
        None => BattleEngine::with_entropy(rules.clone(), oracle)?
            .play_round(&request.state, request.card_id),
    }
}

fn to_json<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        let err = BattleError::from(e);
        format!(r#"{{"success":false,"error":{:?}}}"#, err.to_string())
    })
}
