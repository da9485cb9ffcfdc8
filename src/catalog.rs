use crate::errors::CatalogError;
use crate::models::{
    CatalogSource, CatalogSummary, ContentItem, ContentKind, MemeItem, QuickWinItem, TriviaItem,
};
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub source: CatalogSource,
    pub trivia: Vec<TriviaItem>,
    pub memes: Vec<MemeItem>,
    pub quick_wins: Vec<QuickWinItem>,
}

impl Collections {
    pub fn pick(&self, kind: ContentKind) -> Result<ContentItem, CatalogError> {
        let mut rng = rand::rng();
        let picked = match kind {
            ContentKind::Trivia => self.trivia.choose(&mut rng).cloned().map(ContentItem::Trivia),
            ContentKind::Meme => self.memes.choose(&mut rng).cloned().map(ContentItem::Meme),
            ContentKind::QuickWin => self
                .quick_wins
                .choose(&mut rng)
                .cloned()
                .map(ContentItem::QuickWin),
        };
        picked.ok_or(CatalogError::Empty(kind))
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            source: self.source,
            trivia: self.trivia.len(),
            memes: self.memes.len(),
            quick_wins: self.quick_wins.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub trivia: usize,
    pub memes: usize,
    pub quick_wins: usize,
    pub dropped: usize,
    pub retained: Vec<ContentKind>,
}

pub struct Catalog {
    current: RwLock<Arc<Collections>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::with_collections(builtin_collections())
    }

    pub fn with_collections(collections: Collections) -> Self {
        Self {
            current: RwLock::new(Arc::new(collections)),
        }
    }

    pub async fn snapshot(&self) -> Arc<Collections> {
        Arc::clone(&*self.current.read().await)
    }

    pub async fn summary(&self) -> CatalogSummary {
        self.snapshot().await.summary()
    }

    pub async fn pick_random(&self, kind: ContentKind) -> Result<ContentItem, CatalogError> {
        self.snapshot().await.pick(kind)
    }

    /// Swaps in the given items as a new generation, routed by kind.
    ///
    /// Malformed trivia is dropped. A kind with no surviving items keeps the
    /// content it had before, so a pick never lands on an empty collection.
    pub async fn replace_all(&self, items: Vec<ContentItem>) -> ReplaceOutcome {
        let mut trivia = Vec::new();
        let mut memes = Vec::new();
        let mut quick_wins = Vec::new();
        let mut dropped = 0;

        for item in items {
            match item {
                ContentItem::Trivia(question) if question.is_well_formed() => trivia.push(question),
                ContentItem::Trivia(question) => {
                    warn!(id = question.id, "dropping malformed trivia item");
                    dropped += 1;
                }
                ContentItem::Meme(meme) => memes.push(meme),
                ContentItem::QuickWin(win) => quick_wins.push(win),
            }
        }

        let mut current = self.current.write().await;
        let mut retained = Vec::new();
        if trivia.is_empty() {
            trivia = current.trivia.clone();
            retained.push(ContentKind::Trivia);
        }
        if memes.is_empty() {
            memes = current.memes.clone();
            retained.push(ContentKind::Meme);
        }
        if quick_wins.is_empty() {
            quick_wins = current.quick_wins.clone();
            retained.push(ContentKind::QuickWin);
        }

        let next = Collections {
            source: CatalogSource::Remote,
            trivia,
            memes,
            quick_wins,
        };
        let outcome = ReplaceOutcome {
            trivia: next.trivia.len(),
            memes: next.memes.len(),
            quick_wins: next.quick_wins.len(),
            dropped,
            retained,
        };
        *current = Arc::new(next);
        drop(current);

        if !outcome.retained.is_empty() {
            warn!(retained = ?outcome.retained, "remote catalog had no items for some kinds, keeping previous content");
        }
        info!(
            trivia = outcome.trivia,
            memes = outcome.memes,
            quick_wins = outcome.quick_wins,
            "catalog replaced"
        );
        outcome
    }
}

fn trivia(id: u64, question: &str, options: [&str; 3], answer: &str) -> TriviaItem {
    TriviaItem {
        id,
        question: question.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        answer: answer.to_string(),
    }
}

pub fn builtin_collections() -> Collections {
    Collections {
        source: CatalogSource::Builtin,
        trivia: vec![
            trivia(1, "What is the capital of France?", ["Paris", "Berlin", "London"], "Paris"),
            trivia(2, "How many continents are there?", ["5", "6", "7"], "7"),
            trivia(3, "What planet is known as the Red Planet?", ["Mars", "Venus", "Saturn"], "Mars"),
            trivia(4, "Which ocean is the largest?", ["Atlantic", "Pacific", "Indian"], "Pacific"),
            trivia(
                5,
                "What gas do plants absorb from the atmosphere?",
                ["Oxygen", "Carbon dioxide", "Nitrogen"],
                "Carbon dioxide",
            ),
        ],
        memes: [
            "Keep calm and carry on! 😄",
            "Here’s a puppy to brighten your day 🐶",
            "Remember: you are awesome! 💪",
            "Take a deep breath and smile 😊",
            "Life is better when you’re laughing 😂",
        ]
        .into_iter()
        .map(|text| MemeItem { text: text.to_string() })
        .collect(),
        quick_wins: [
            "You drank a glass of water – hydration win! 💧",
            "You stood up and stretched – good for you! 🦌‍♂️",
            "You read a page of a book – knowledge gained 📚",
            "You wrote down one thing you’re grateful for – gratitude boost 🙏",
            "You smiled at a stranger – positivity shared 😊",
        ]
        .into_iter()
        .map(|text| QuickWinItem { text: text.to_string() })
        .collect(),
    }
}
