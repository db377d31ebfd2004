use std::fmt;

use serde::Serialize;

/// Placeholder shown for reflections stored without an author line.
pub const ANONYMOUS_LABEL: &str = "익명";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reflection {
    pub author: String,
    pub comment: String,
}

impl Reflection {
    pub fn new(author: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            comment: comment.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_empty() && self.comment.is_empty()
    }

    pub fn display_author(&self) -> &str {
        if self.author.is_empty() {
            ANONYMOUS_LABEL
        } else {
            &self.author
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCategory {
    Unhealthy,
    Moderate,
    Healthy,
    AnalysisError,
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthCategory::Unhealthy => "Unhealthy",
            HealthCategory::Moderate => "Moderate",
            HealthCategory::Healthy => "Healthy",
            HealthCategory::AnalysisError => "Analysis error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: HealthCategory,
    /// Mean sample value, absent when analysis failed.
    pub mean: Option<f64>,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    EthicsVideo,
    PlantAnalysis,
    TextMining,
    ViewSubmissions,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::EthicsVideo,
        MenuItem::PlantAnalysis,
        MenuItem::TextMining,
        MenuItem::ViewSubmissions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MenuItem::EthicsVideo => "AI 윤리와 스마트팜",
            MenuItem::PlantAnalysis => "식물 상태 분석",
            MenuItem::TextMining => "텍스트 마이닝",
            MenuItem::ViewSubmissions => "제출된 생각 보기",
        }
    }

    /// Subcommand that opens this view.
    pub fn command(self) -> &'static str {
        match self {
            MenuItem::EthicsVideo => "video",
            MenuItem::PlantAnalysis => "plant",
            MenuItem::TextMining => "mining",
            MenuItem::ViewSubmissions => "submissions",
        }
    }
}
