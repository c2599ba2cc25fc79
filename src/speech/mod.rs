/*!
 * Speech capabilities.
 *
 * Synthesis and recognition are injected into drills through the traits
 * below instead of being reached as process-wide singletons:
 * - `console`: stdout synthesizer and line-based typed recognizer
 * - `mock`: scripted implementations for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::SpeechError;

pub mod console;
pub mod mock;

pub use console::{ConsoleSynthesizer, TypedRecognizer};

/// Default BCP 47 voice language
pub const DEFAULT_VOICE_LANG: &str = "ar-SA";

/// Default speaking rate, slightly slower than normal speech
pub const DEFAULT_SPEECH_RATE: f32 = 0.8;

/// A piece of text to be spoken
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// Voice language
    pub lang: String,
    /// Speaking rate, 1.0 is normal speed
    pub rate: f32,
}

impl Utterance {
    /// Create an Arabic utterance with default voice settings
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lang: DEFAULT_VOICE_LANG.to_string(),
            rate: DEFAULT_SPEECH_RATE,
        }
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }
}

/// Text-to-speech capability
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Speak an utterance, returning once it has been handed to the output
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Speech-to-text capability
///
/// A recognizer delivers one transcript per call. Callers must not overlap
/// sessions: await each `listen` before starting the next, and `stop` when
/// done.
#[async_trait]
pub trait SpeechRecognizer: Send + Debug {
    /// Wait for the next transcript
    ///
    /// # Returns
    /// * `Ok(Some(text))` - A transcript (possibly empty)
    /// * `Ok(None)` - No more input will arrive
    /// * `Err(SpeechError)` - The recognizer failed
    async fn listen(&mut self) -> Result<Option<String>, SpeechError>;

    /// End the current recognition session
    fn stop(&mut self) {}
}
