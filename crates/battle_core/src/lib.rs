//! # battle_core - Turn-based Card Battle Engine
//!
//! Plays short comparison matches between hands of media-backed cards.
//!
//! ## Features
//! - Hand assembly from a player's enrichment-complete cards
//! - Round state machine with per-card usage caps and first-to-N / round-cap termination
//! - Fixed-stat rounds and theme rounds scored by an external rating oracle
//! - Injected randomness (seeded ChaCha for replays and tests)
//! - JSON API for the transport layer
//!
//! ## Usage
//! ```rust
//! use battle_core::{BattleEngine, BattleRules, Card, CardStats, UnavailableOracle};
//! use std::collections::HashMap;
//!
//! let cards: Vec<Card> = (1..=6)
//!     .map(|id| {
//!         Card::new(id, format!("img/{}.jpg", id))
//!             .with_stats(CardStats::new(3, 4, 5, 6, 7))
//!             .with_effect("Catches the light")
//!     })
//!     .collect();
//! let mut pools = HashMap::new();
//! pools.insert("alice".to_string(), cards);
//!
//! let mut engine = BattleEngine::with_seed(BattleRules::stats_only(), UnavailableOracle, 42).unwrap();
//! let state = engine.start_match("alice", &pools).unwrap();
//! let choice = state.player1().hand().cards()[0].id;
//! let (outcome, next) = engine.play_round(&state, choice).unwrap();
//! assert_eq!(outcome.round, 1);
//! assert_eq!(next.round(), 2);
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{play_round_json, start_match_json};
pub use engine::{
    assemble_hand, decide_winner, eligible_cards, parse_rating, BattleEngine, BattleRng,
    BattleRules, CardPoolProvider, NullRatingPolicy, OracleFailure, RatingOracle,
    UnavailableOracle,
};
pub use error::{BattleError, Result};
pub use models::{
    Card, CardId, CardStats, ComparisonAxis, EndReason, Hand, MatchPhase, MatchResult, MatchState,
    MatchWinner, PlayedCard, RoundOutcome, RoundWinner, ScoreDelta, StatAxis,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
