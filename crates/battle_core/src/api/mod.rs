//! JSON API for the card battle engine

pub mod battle_json;

pub use battle_json::{
    play_round_json, start_match_json, PlayRoundRequest, PlayRoundResponse, RoundView,
    StartMatchRequest, StartMatchResponse,
};
