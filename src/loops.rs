use crate::catalog::Catalog;
use crate::errors::LoopError;
use crate::models::{ContentItem, ContentKind, LoopOutcome, TriviaItem};
use crate::stats::LocalStatsStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoopPhase {
    #[default]
    Idle,
    Presenting(TriviaItem),
    Resolved,
}

pub struct LoopController {
    catalog: Arc<Catalog>,
    stats: Arc<LocalStatsStore>,
    phase: Mutex<LoopPhase>,
}

impl LoopController {
    pub fn new(catalog: Arc<Catalog>, stats: Arc<LocalStatsStore>) -> Self {
        Self {
            catalog,
            stats,
            phase: Mutex::new(LoopPhase::Idle),
        }
    }

    pub async fn phase(&self) -> LoopPhase {
        self.phase.lock().await.clone()
    }

    pub async fn start(&self, kind: ContentKind) -> Result<LoopOutcome, LoopError> {
        let mut phase = self.phase.lock().await;
        *phase = LoopPhase::Idle;
        let item = self.catalog.pick_random(kind).await?;
        debug!(%kind, "presenting loop");

        match item {
            ContentItem::Trivia(question) => {
                let outcome = LoopOutcome::Presenting {
                    kind,
                    id: question.id,
                    question: question.question.clone(),
                    options: question.options.clone(),
                };
                *phase = LoopPhase::Presenting(question);
                Ok(outcome)
            }
            ContentItem::Meme(meme) => {
                let outcome = self.resolve(kind, meme.text, None).await?;
                *phase = LoopPhase::Resolved;
                Ok(outcome)
            }
            ContentItem::QuickWin(win) => {
                let outcome = self.resolve(kind, win.text, None).await?;
                *phase = LoopPhase::Resolved;
                Ok(outcome)
            }
        }
    }

    /// Right and wrong answers both count as a completed loop. The question
    /// stays open if the completion cannot be stored.
    pub async fn answer(&self, choice: &str) -> Result<LoopOutcome, LoopError> {
        let mut phase = self.phase.lock().await;
        let LoopPhase::Presenting(question) = &*phase else {
            return Err(LoopError::NotPresenting);
        };
        if !question.options.iter().any(|option| option == choice) {
            return Err(LoopError::UnknownOption(choice.to_string()));
        }

        let correct = choice == question.answer;
        let message = feedback(correct, &question.answer);
        let outcome = self.resolve(ContentKind::Trivia, message, Some(correct)).await?;
        *phase = LoopPhase::Resolved;
        Ok(outcome)
    }

    async fn resolve(
        &self,
        kind: ContentKind,
        message: String,
        correct: Option<bool>,
    ) -> Result<LoopOutcome, LoopError> {
        let stats = self.stats.record(1).await?;
        Ok(LoopOutcome::Resolved {
            kind,
            message,
            correct,
            stats,
        })
    }
}

fn feedback(correct: bool, answer: &str) -> String {
    if correct {
        format!("Correct! 🎉 {answer} is the right answer.")
    } else {
        format!("Oops! The correct answer was {answer}. Try another loop!")
    }
}
