/*!
 * Pronunciation drills.
 *
 * A drill walks through a list of lexical items. For each one it speaks the
 * Arabic prompt, listens for an answer, checks it and records the outcome,
 * giving the learner up to `max_attempts` tries per item.
 */

use chrono::Utc;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::app_config::DrillConfig;
use crate::content::LexicalItem;
use crate::database::{AttemptRecord, GameStats, StatsStore};
use crate::errors::{DrillError, SpeechError};
use crate::matching::{MatchResult, MatchType, PronunciationChecker};
use crate::speech::{SpeechRecognizer, SpeechSynthesizer, Utterance};

/// Which threshold a drill grades against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrillMode {
    #[default]
    Lenient,
    Strict,
}

impl DrillMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Per-session drill behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct DrillOptions {
    pub max_attempts: u32,
    pub speak_prompts: bool,
    pub voice_lang: String,
    pub speech_rate: f32,
}

impl From<&DrillConfig> for DrillOptions {
    fn from(config: &DrillConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            speak_prompts: config.speak_prompts,
            voice_lang: config.voice_lang.clone(),
            speech_rate: config.speech_rate,
        }
    }
}

impl Default for DrillOptions {
    fn default() -> Self {
        Self::from(&DrillConfig::default())
    }
}

/// Learner-facing wording for a check result
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub accepted: bool,
    pub message: String,
}

impl Feedback {
    pub fn from_result(result: &MatchResult) -> Self {
        let message = match result.match_type {
            MatchType::Exact | MatchType::Alternate => "Correct!".to_string(),
            MatchType::Partial => "Close enough!".to_string(),
            MatchType::Similarity => format!("Almost, {}% match", result.percent()),
            MatchType::None => format!("Try again, {}% close", result.percent()),
        };

        Self {
            accepted: result.is_correct,
            message,
        }
    }
}

/// Progress notifications emitted while a drill runs
#[derive(Debug, Clone)]
pub enum DrillEvent<'a> {
    /// A new item is about to be asked
    Prompt { index: usize, total: usize, item: &'a LexicalItem },
    /// An answer was checked
    Checked { item: &'a LexicalItem, heard: &'a str, result: MatchResult, feedback: Feedback },
    /// The item is finished without a correct answer
    Revealed { item: &'a LexicalItem },
}

/// What happened to one item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub expected: String,
    pub attempts: Vec<MatchResult>,
    pub correct: bool,
}

/// Result of a finished or interrupted drill
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrillSummary {
    pub game: String,
    pub total: usize,
    pub correct: usize,
    pub outcomes: Vec<ItemOutcome>,
    /// Input ended before every item was asked
    pub aborted: bool,
}

impl DrillSummary {
    pub fn score_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Pick up to `count` items, optionally shuffled
pub fn select_items(items: &[LexicalItem], count: usize, shuffle: bool) -> Vec<LexicalItem> {
    select_items_with_rng(items, count, shuffle, &mut rand::rng())
}

/// Same as [`select_items`] with an explicit random source
pub fn select_items_with_rng<R: Rng + ?Sized>(
    items: &[LexicalItem],
    count: usize,
    shuffle: bool,
    rng: &mut R,
) -> Vec<LexicalItem> {
    let mut selected = items.to_vec();
    if shuffle {
        selected.shuffle(rng);
    }
    selected.truncate(count);
    selected
}

/// One drill over a list of items
#[derive(Debug, Clone)]
pub struct DrillSession {
    game: String,
    checker: PronunciationChecker,
    options: DrillOptions,
}

impl DrillSession {
    /// Create a session; every item gets at least one attempt
    pub fn new(game: &str, checker: PronunciationChecker, mut options: DrillOptions) -> Self {
        if options.max_attempts == 0 {
            warn!("Drill '{}' configured with 0 attempts per item, using 1", game);
            options.max_attempts = 1;
        }

        Self {
            game: game.to_string(),
            checker,
            options,
        }
    }

    pub fn options(&self) -> &DrillOptions {
        &self.options
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    /// Run the drill without progress notifications
    pub async fn run<S, R>(
        &self,
        items: &[LexicalItem],
        synthesizer: &S,
        recognizer: &mut R,
        stats: &dyn StatsStore,
    ) -> Result<DrillSummary, DrillError>
    where
        S: SpeechSynthesizer + ?Sized,
        R: SpeechRecognizer + ?Sized,
    {
        self.run_with_events(items, synthesizer, recognizer, stats, &mut |_| {})
            .await
    }

    /// Run the drill, reporting progress through `on_event`
    ///
    /// The recognizer is stopped before returning, whether the drill
    /// completed, ran out of input or failed.
    pub async fn run_with_events<S, R>(
        &self,
        items: &[LexicalItem],
        synthesizer: &S,
        recognizer: &mut R,
        stats: &dyn StatsStore,
        on_event: &mut (dyn for<'e> FnMut(DrillEvent<'e>) + Send),
    ) -> Result<DrillSummary, DrillError>
    where
        S: SpeechSynthesizer + ?Sized,
        R: SpeechRecognizer + ?Sized,
    {
        if items.is_empty() {
            return Err(DrillError::NoItems);
        }

        let result = self
            .run_items(items, synthesizer, recognizer, stats, on_event)
            .await;
        recognizer.stop();

        if let Ok(summary) = &result {
            info!(
                "Drill '{}' finished: {}/{} correct ({}%){}",
                summary.game,
                summary.correct,
                summary.total,
                summary.score_percent(),
                if summary.aborted { ", input ended early" } else { "" }
            );
        }
        result
    }

    async fn run_items<S, R>(
        &self,
        items: &[LexicalItem],
        synthesizer: &S,
        recognizer: &mut R,
        stats: &dyn StatsStore,
        on_event: &mut (dyn for<'e> FnMut(DrillEvent<'e>) + Send),
    ) -> Result<DrillSummary, DrillError>
    where
        S: SpeechSynthesizer + ?Sized,
        R: SpeechRecognizer + ?Sized,
    {
        let mut game_stats = stats
            .get_stats(&self.game)
            .await
            .map_err(|e| DrillError::Stats(e.to_string()))?
            .unwrap_or_default();

        let mut summary = DrillSummary {
            game: self.game.clone(),
            ..Default::default()
        };

        for (index, item) in items.iter().enumerate() {
            on_event(DrillEvent::Prompt { index, total: items.len(), item });

            if self.options.speak_prompts {
                let utterance = Utterance::new(&item.ar)
                    .with_lang(&self.options.voice_lang)
                    .with_rate(self.options.speech_rate);
                synthesizer.speak(&utterance).await?;
            }

            let mut outcome = ItemOutcome {
                expected: item.ar.clone(),
                attempts: Vec::new(),
                correct: false,
            };

            while (outcome.attempts.len() as u32) < self.options.max_attempts {
                let heard = match recognizer.listen().await {
                    Ok(Some(heard)) => heard,
                    Ok(None) => {
                        summary.aborted = true;
                        break;
                    }
                    Err(SpeechError::Aborted) => {
                        info!("Listening cancelled in drill '{}'", self.game);
                        summary.aborted = true;
                        break;
                    }
                    Err(e) => return Err(e.into()),
                };

                let result = self.checker.check(&heard, item);
                let feedback = Feedback::from_result(&result);
                debug!("'{}' heard as '{}': {}", item.ar, heard, feedback.message);

                let attempt = AttemptRecord::new(&self.game, &item.ar, &heard, &result);
                stats
                    .record_attempt(&attempt)
                    .await
                    .map_err(|e| DrillError::Stats(e.to_string()))?;

                outcome.attempts.push(result);
                on_event(DrillEvent::Checked { item, heard: &heard, result, feedback });

                if result.is_correct {
                    outcome.correct = true;
                    break;
                }
            }

            // An item interrupted before any answer is not scored
            if summary.aborted && outcome.attempts.is_empty() {
                break;
            }

            if !outcome.correct {
                on_event(DrillEvent::Revealed { item });
            }

            game_stats.record(outcome.correct, Utc::now());
            self.save_stats(stats, &game_stats).await?;

            summary.total += 1;
            if outcome.correct {
                summary.correct += 1;
            }
            summary.outcomes.push(outcome);

            if summary.aborted {
                break;
            }
        }

        if summary.aborted {
            warn!(
                "Input ended after {} of {} items in drill '{}'",
                summary.total,
                items.len(),
                self.game
            );
        }

        Ok(summary)
    }

    async fn save_stats(&self, stats: &dyn StatsStore, game_stats: &GameStats) -> Result<(), DrillError> {
        stats
            .put_stats(&self.game, game_stats)
            .await
            .map_err(|e| DrillError::Stats(e.to_string()))
    }
}
