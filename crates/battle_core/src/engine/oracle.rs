//! Rating oracle capability
//!
//! The theme branch asks an external model to score a card's image against a
//! prompt on a 1..=scale_max scale. The engine only sees the `RatingOracle`
//! trait; concrete HTTP/model clients live outside this crate.
//!
//! Failures never abort a round: `rate_with_retry` retries up to the configured
//! attempt budget and then yields `None`, which the round resolves as a missing
//! rating.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleFailure {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Rating reply is not numeric: {0:?}")]
    NotNumeric(String),

    #[error("Rating {value} is outside 1..={scale_max}")]
    OutOfRange { value: i64, scale_max: u8 },
}

/// 이미지 + 프롬프트 → 정수 점수
///
/// 두 플레이어의 호출이 동시에 실행될 수 있으므로 `Send + Sync`가 필요하다.
pub trait RatingOracle: Send + Sync {
    fn rate(&self, image_ref: &str, prompt: &str, scale_max: u8) -> Result<i64, OracleFailure>;
}

impl<T: RatingOracle + ?Sized> RatingOracle for &T {
    fn rate(&self, image_ref: &str, prompt: &str, scale_max: u8) -> Result<i64, OracleFailure> {
        (**self).rate(image_ref, prompt, scale_max)
    }
}

impl<T: RatingOracle + ?Sized> RatingOracle for Box<T> {
    fn rate(&self, image_ref: &str, prompt: &str, scale_max: u8) -> Result<i64, OracleFailure> {
        (**self).rate(image_ref, prompt, scale_max)
    }
}

/// 항상 실패하는 오라클 (레이팅 서비스가 없는 환경)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableOracle;

impl RatingOracle for UnavailableOracle {
    fn rate(&self, _image_ref: &str, _prompt: &str, _scale_max: u8) -> Result<i64, OracleFailure> {
        Err(OracleFailure::Unavailable("no rating service configured".to_string()))
    }
}

/// 테마 평가 프롬프트
pub fn theme_prompt(theme: &str, scale_max: u8) -> String {
    format!(
        "Rate how strongly this image expresses the theme \"{}\" on a scale from 1 to {}. \
         Reply with a single integer only.",
        theme, scale_max
    )
}

/// 모델의 자유 텍스트 응답에서 첫 번째 정수를 점수로 읽는다
pub fn parse_rating(reply: &str, scale_max: u8) -> Result<u8, OracleFailure> {
    let start = reply
        .char_indices()
        .find(|(i, c)| {
            c.is_ascii_digit()
                || (*c == '-' && reply[i + 1..].starts_with(|n: char| n.is_ascii_digit()))
        })
        .map(|(i, _)| i)
        .ok_or_else(|| OracleFailure::NotNumeric(reply.to_string()))?;

    let token: String = reply[start..]
        .chars()
        .enumerate()
        .take_while(|(n, c)| c.is_ascii_digit() || (*n == 0 && *c == '-'))
        .map(|(_, c)| c)
        .collect();

    let value: i64 = token.parse().map_err(|_| OracleFailure::NotNumeric(reply.to_string()))?;
    check_range(value, scale_max)
}

fn check_range(value: i64, scale_max: u8) -> Result<u8, OracleFailure> {
    if (1..=scale_max as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(OracleFailure::OutOfRange { value, scale_max })
    }
}

/// 최대 `attempts`회까지 재시도. 모두 실패하면 None
pub fn rate_with_retry<O: RatingOracle + ?Sized>(
    oracle: &O,
    image_ref: &str,
    prompt: &str,
    scale_max: u8,
    attempts: u32,
) -> Option<u8> {
    for attempt in 1..=attempts {
        match oracle.rate(image_ref, prompt, scale_max).and_then(|v| check_range(v, scale_max)) {
            Ok(score) => {
                debug!(image_ref, attempt, score, "oracle rating accepted");
                return Some(score);
            }
            Err(failure) => {
                warn!(image_ref, attempt, attempts, %failure, "oracle rating failed");
            }
        }
    }
    warn!(image_ref, attempts, "oracle retries exhausted, recording no rating");
    None
}

#[cfg(test)]
pub(crate) mod stub {
    use super::{OracleFailure, RatingOracle};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// 이미지별로 응답 순서를 미리 정해두는 테스트용 오라클
    #[derive(Debug, Default)]
    pub(crate) struct StubOracle {
        replies: Mutex<HashMap<String, Vec<Result<i64, OracleFailure>>>>,
        calls: AtomicU32,
    }

    impl StubOracle {
        pub(crate) fn with(mut self, image_ref: &str, replies: Vec<Result<i64, OracleFailure>>) -> Self {
            if let Ok(map) = self.replies.get_mut() {
                map.insert(image_ref.to_string(), replies.into_iter().rev().collect());
            }
            self
        }

        pub(crate) fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RatingOracle for StubOracle {
        fn rate(&self, image_ref: &str, _prompt: &str, _scale_max: u8) -> Result<i64, OracleFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut map = self.replies.lock().unwrap();
            map.get_mut(image_ref)
                .and_then(|queue| queue.pop())
                .unwrap_or_else(|| Err(OracleFailure::Unavailable("no stub reply".to_string())))
        }
    }
}
