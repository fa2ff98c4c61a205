//! Card battle engine
//!
//! - `hand`: eligibility filter and hand assembly
//! - `battle_engine`: round state machine (opponent pick, axis choice, scoring, termination)
//! - `oracle`: rating oracle capability with retry
//! - `rng`: injected random source
//! - `config`: rule constants

pub mod battle_engine;
pub mod config;
pub mod hand;
pub mod oracle;
pub mod rng;

pub use battle_engine::{decide_winner, BattleEngine, CardPoolProvider};
pub use config::{BattleRules, NullRatingPolicy};
pub use hand::{assemble_hand, eligible_cards};
pub use oracle::{
    parse_rating, rate_with_retry, theme_prompt, OracleFailure, RatingOracle, UnavailableOracle,
};
pub use rng::BattleRng;
