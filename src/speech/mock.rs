/*!
 * Mock speech implementations for testing.
 *
 * - `ScriptedRecognizer` - Replays a fixed list of transcripts, then ends
 * - `RecordingSynthesizer` - Remembers everything it was asked to speak
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{SpeechRecognizer, SpeechSynthesizer, Utterance};
use crate::errors::SpeechError;

/// One scripted recognizer response
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedResponse {
    /// Deliver this transcript
    Transcript(String),
    /// Fail with an unavailable error
    Fail(String),
    /// Cancel the session, as a user interrupt would
    Abort,
}

/// Recognizer that replays scripted responses in order
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    script: VecDeque<ScriptedResponse>,
    stop_count: Arc<AtomicUsize>,
}

impl ScriptedRecognizer {
    /// Create a recognizer returning the given transcripts, then `None`
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: transcripts
                .into_iter()
                .map(|t| ScriptedResponse::Transcript(t.into()))
                .collect(),
            stop_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a recognizer from explicit responses
    pub fn from_responses(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            script: responses.into(),
            stop_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `stop` calls, readable after the recognizer is moved
    pub fn stop_counter(&self) -> Arc<AtomicUsize> {
        self.stop_count.clone()
    }

    /// Responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen(&mut self) -> Result<Option<String>, SpeechError> {
        match self.script.pop_front() {
            Some(ScriptedResponse::Transcript(text)) => Ok(Some(text)),
            Some(ScriptedResponse::Fail(message)) => Err(SpeechError::Unavailable(message)),
            Some(ScriptedResponse::Abort) => Err(SpeechError::Aborted),
            None => Ok(None),
        }
    }

    fn stop(&mut self) {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Synthesizer that records utterances instead of speaking them
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    spoken: Mutex<Vec<Utterance>>,
    failing: bool,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A synthesizer whose every call fails
    pub fn failing() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Texts spoken so far
    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .map(|spoken| spoken.iter().map(|u| u.text.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.failing {
            return Err(SpeechError::Unavailable("no voice installed".to_string()));
        }

        self.spoken
            .lock()
            .map_err(|e| SpeechError::Io(e.to_string()))?
            .push(utterance.clone());
        Ok(())
    }
}
