use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Trivia,
    Meme,
    QuickWin,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Trivia, ContentKind::Meme, ContentKind::QuickWin];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Trivia => "trivia",
            ContentKind::Meme => "meme",
            ContentKind::QuickWin => "quick_win",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaItem {
    #[serde(default)]
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl TriviaItem {
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.options.iter().any(|option| option == &self.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeItem {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickWinItem {
    pub text: String,
}

/// One entry of the remote `/loops` listing: `{"type": ..., "content": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ContentItem {
    Trivia(TriviaItem),
    Meme(MemeItem),
    QuickWin(QuickWinItem),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Trivia(_) => ContentKind::Trivia,
            ContentItem::Meme(_) => ContentKind::Meme,
            ContentItem::QuickWin(_) => ContentKind::QuickWin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TodayCount {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatsRecord {
    pub total_count: u64,
    pub today: TodayCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub loop_id: u64,
    pub success: bool,
}

impl CompletionEvent {
    pub fn completed() -> Self {
        Self {
            loop_id: 0,
            success: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Builtin,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub source: CatalogSource,
    pub trivia: usize,
    pub memes: usize,
    pub quick_wins: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub choice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoopOutcome {
    Presenting {
        kind: ContentKind,
        id: u64,
        question: String,
        options: Vec<String>,
    },
    Resolved {
        kind: ContentKind,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correct: Option<bool>,
        stats: StatsRecord,
    },
}
