//! Default theme catalog for the theme comparison branch

/// 테마 라벨 (오라클 프롬프트에 그대로 삽입됨)
pub const DEFAULT_THEMES: [&str; 20] = [
    "nostalgia",
    "adventure",
    "serenity",
    "mystery",
    "romance",
    "humor",
    "energy",
    "melancholy",
    "wonder",
    "freedom",
    "city life",
    "nature",
    "nightlife",
    "friendship",
    "solitude",
    "celebration",
    "craftsmanship",
    "speed",
    "coziness",
    "retro vibes",
];

pub fn default_themes() -> Vec<String> {
    DEFAULT_THEMES.iter().map(|t| t.to_string()).collect()
}
