/*!
 * Console speech capabilities.
 *
 * Used by the CLI: prompts are printed instead of spoken and answers are
 * typed, one per line.
 */

use async_trait::async_trait;
use log::{debug, trace};
use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use super::{SpeechRecognizer, SpeechSynthesizer, Utterance};
use crate::errors::SpeechError;

/// Synthesizer that writes utterances to a text sink
pub struct ConsoleSynthesizer {
    out: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSynthesizer").finish_non_exhaustive()
    }
}

impl ConsoleSynthesizer {
    /// Synthesizer printing to stdout
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out: Mutex::new(out) }
    }
}

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        trace!("Speaking '{}' ({}, rate {})", utterance.text, utterance.lang, utterance.rate);

        let mut out = self
            .out
            .lock()
            .map_err(|e| SpeechError::Io(format!("Output lock poisoned: {}", e)))?;
        writeln!(out, "🔊 {}", utterance.text)?;
        out.flush()?;
        Ok(())
    }
}

/// Recognizer that treats each input line as a transcript
#[derive(Debug)]
pub struct TypedRecognizer<R> {
    reader: R,
    stopped: bool,
    /// Ctrl-C while waiting for a line cancels the session
    interruptible: bool,
}

impl TypedRecognizer<BufReader<Stdin>> {
    /// Recognizer reading from stdin
    ///
    /// Ctrl-C while waiting for an answer ends the session with
    /// [`SpeechError::Aborted`].
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin())).interruptible()
    }
}

impl<R> TypedRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + std::fmt::Debug,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            stopped: false,
            interruptible: false,
        }
    }

    /// Treat Ctrl-C during `listen` as a cancelled session
    pub fn interruptible(mut self) -> Self {
        self.interruptible = true;
        self
    }
}

#[async_trait]
impl<R> SpeechRecognizer for TypedRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + std::fmt::Debug,
{
    async fn listen(&mut self) -> Result<Option<String>, SpeechError> {
        // A stopped recognizer starts a new session on the next call
        self.stopped = false;

        let mut line = String::new();
        let read = if self.interruptible {
            tokio::select! {
                read = self.reader.read_line(&mut line) => read?,
                _ = tokio::signal::ctrl_c() => {
                    debug!("Typed input interrupted");
                    return Err(SpeechError::Aborted);
                }
            }
        } else {
            self.reader.read_line(&mut line).await?
        };
        if read == 0 {
            debug!("Typed input reached end of stream");
            return Ok(None);
        }

        let transcript = line.trim_end_matches(['\r', '\n']).to_string();
        trace!("Heard '{}'", transcript);
        Ok(Some(transcript))
    }

    fn stop(&mut self) {
        if !self.stopped {
            debug!("Typed recognizer stopped");
            self.stopped = true;
        }
    }
}
