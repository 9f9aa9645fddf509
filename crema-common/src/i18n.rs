//! Display strings for the text the core itself produces
//!
//! Only radar axis labels, feed tab names and the unlock toast prefix live
//! here. Everything else is rendered by the UI layer.

use crate::feed::FeedTab;
use crate::flavor::FlavorAxis;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Simplified Chinese
    #[default]
    SC,
    /// Traditional Chinese
    TC,
    EN,
    JP,
    KR,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::SC,
        Language::TC,
        Language::EN,
        Language::JP,
        Language::KR,
    ];

    /// Radar label for a flavor axis
    pub fn axis_label(self, axis: FlavorAxis) -> &'static str {
        use FlavorAxis::*;
        use Language::*;
        match (self, axis) {
            (SC, Acidity) => "酸质",
            (SC, Sweetness) => "甜感",
            (SC, Body) => "醇厚",
            (SC, Bitterness) => "苦度",
            (SC, Aftertaste) => "余韵",
            (TC, Acidity) => "酸質",
            (TC, Sweetness) => "甜感",
            (TC, Body) => "醇厚",
            (TC, Bitterness) => "苦度",
            (TC, Aftertaste) => "餘韻",
            (EN, Acidity) => "Acidity",
            (EN, Sweetness) => "Sweetness",
            (EN, Body) => "Body",
            (EN, Bitterness) => "Bitter",
            (EN, Aftertaste) => "Finish",
            (JP, Acidity) => "酸味",
            (JP, Sweetness) => "甘味",
            (JP, Body) => "コク",
            (JP, Bitterness) => "苦味",
            (JP, Aftertaste) => "後味",
            (KR, Acidity) => "산미",
            (KR, Sweetness) => "단맛",
            (KR, Body) => "바디",
            (KR, Bitterness) => "쓴맛",
            (KR, Aftertaste) => "여운",
        }
    }

    /// Label for a feed tab
    pub fn tab_label(self, tab: FeedTab) -> &'static str {
        use FeedTab::*;
        use Language::*;
        match (self, tab) {
            (SC, Following) => "关注",
            (SC, Discover) => "发现",
            (SC, Local) => "本地",
            (TC, Following) => "關注",
            (TC, Discover) => "發現",
            (TC, Local) => "在地",
            (EN, Following) => "Following",
            (EN, Discover) => "Discover",
            (EN, Local) => "Local",
            (JP, Following) => "フォロー",
            (JP, Discover) => "発見",
            (JP, Local) => "周辺",
            (KR, Following) => "팔로잉",
            (KR, Discover) => "발견",
            (KR, Local) => "주변",
        }
    }

    /// Prefix of the transient "new specimen unlocked" notification
    pub fn unlock_toast(self) -> &'static str {
        match self {
            Language::SC => "解锁新图鉴",
            Language::TC => "解鎖新圖鑑",
            Language::EN => "New Specimen Unlocked",
            Language::JP => "新品種解禁",
            Language::KR => "새로운 표본 잠금 해제",
        }
    }

    /// Canonical short code
    pub fn code(self) -> &'static str {
        match self {
            Language::SC => "SC",
            Language::TC => "TC",
            Language::EN => "EN",
            Language::JP => "JP",
            Language::KR => "KR",
        }
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown language: {}", s)))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
