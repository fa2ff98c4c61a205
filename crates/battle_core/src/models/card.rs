// 배틀 카드 데이터 구조
use serde::{Deserialize, Serialize};
use std::fmt;

/// 카드 고유 ID (원본 미디어 게시물 ID)
pub type CardId = u64;

/// 고정 스탯 축 (5종)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatAxis {
    Beauty,
    Impact,
    Soothing,
    Uniqueness,
    Storytelling,
}

impl StatAxis {
    pub const ALL: [StatAxis; 5] = [
        StatAxis::Beauty,
        StatAxis::Impact,
        StatAxis::Soothing,
        StatAxis::Uniqueness,
        StatAxis::Storytelling,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            StatAxis::Beauty => "beauty",
            StatAxis::Impact => "impact",
            StatAxis::Soothing => "soothing",
            StatAxis::Uniqueness => "uniqueness",
            StatAxis::Storytelling => "storytelling",
        }
    }
}

impl fmt::Display for StatAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 카드 스탯 벡터
///
/// 각 축은 enrichment 단계에서 계산된 정수값이며, 값이 없으면 비교 시 0으로 취급한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    #[serde(default)]
    pub beauty: Option<u8>,
    #[serde(default)]
    pub impact: Option<u8>,
    #[serde(default)]
    pub soothing: Option<u8>,
    #[serde(default)]
    pub uniqueness: Option<u8>,
    #[serde(default)]
    pub storytelling: Option<u8>,
}

impl CardStats {
    pub fn new(beauty: u8, impact: u8, soothing: u8, uniqueness: u8, storytelling: u8) -> Self {
        Self {
            beauty: Some(beauty),
            impact: Some(impact),
            soothing: Some(soothing),
            uniqueness: Some(uniqueness),
            storytelling: Some(storytelling),
        }
    }

    pub fn get(&self, axis: StatAxis) -> Option<u8> {
        match axis {
            StatAxis::Beauty => self.beauty,
            StatAxis::Impact => self.impact,
            StatAxis::Soothing => self.soothing,
            StatAxis::Uniqueness => self.uniqueness,
            StatAxis::Storytelling => self.storytelling,
        }
    }

    pub fn with(mut self, axis: StatAxis, value: u8) -> Self {
        let slot = match axis {
            StatAxis::Beauty => &mut self.beauty,
            StatAxis::Impact => &mut self.impact,
            StatAxis::Soothing => &mut self.soothing,
            StatAxis::Uniqueness => &mut self.uniqueness,
            StatAxis::Storytelling => &mut self.storytelling,
        };
        *slot = Some(value);
        self
    }

    /// 모든 축이 비어 있는지
    pub fn is_empty(&self) -> bool {
        StatAxis::ALL.iter().all(|axis| self.get(*axis).is_none())
    }
}

/// 배틀 카드 (불변 스냅샷)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// 이미지 참조 (URL 또는 스토리지 키)
    pub image_ref: String,
    #[serde(default)]
    pub stats: Option<CardStats>,
    /// 짧은 효과 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Card {
    pub fn new(id: CardId, image_ref: impl Into<String>) -> Self {
        Self { id, image_ref: image_ref.into(), stats: None, effect: None, caption: None }
    }

    pub fn with_stats(mut self, stats: CardStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// 비교용 스탯 값 (없으면 0)
    pub fn stat(&self, axis: StatAxis) -> u8 {
        self.stats.and_then(|stats| stats.get(axis)).unwrap_or(0)
    }

    /// enrichment 완료 여부: 이미지, 스탯, 효과 텍스트가 모두 있어야 배틀에 참가 가능
    pub fn is_enriched(&self) -> bool {
        let has_image = !self.image_ref.trim().is_empty();
        let has_stats = self.stats.is_some_and(|stats| !stats.is_empty());
        let has_effect = self.effect.as_deref().is_some_and(|text| !text.trim().is_empty());
        has_image && has_stats && has_effect
    }
}
