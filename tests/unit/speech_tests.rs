/*!
 * Tests for speech capabilities and their mocks
 */

use std::sync::atomic::Ordering;
use tokio::io::BufReader;

use nutq::errors::SpeechError;
use nutq::speech::mock::{RecordingSynthesizer, ScriptedRecognizer, ScriptedResponse};
use nutq::speech::{SpeechRecognizer, SpeechSynthesizer, TypedRecognizer, Utterance};

#[test]
fn test_utterance_defaults_shouldTargetArabicVoice() {
    let utterance = Utterance::new("مرحبا");
    assert_eq!(utterance.lang, "ar-SA");
    assert_eq!(utterance.rate, 0.8);

    let utterance = utterance.with_lang("ar-EG").with_rate(1.0);
    assert_eq!(utterance.lang, "ar-EG");
    assert_eq!(utterance.rate, 1.0);
}

#[tokio::test]
async fn test_scriptedRecognizer_shouldReplayThenEnd() {
    let mut recognizer = ScriptedRecognizer::from_responses(vec![
        ScriptedResponse::Transcript("شكرا".to_string()),
        ScriptedResponse::Fail("microphone busy".to_string()),
    ]);
    let stops = recognizer.stop_counter();

    assert_eq!(recognizer.listen().await.unwrap(), Some("شكرا".to_string()));
    assert!(matches!(recognizer.listen().await, Err(SpeechError::Unavailable(_))));
    assert_eq!(recognizer.remaining(), 0);
    assert_eq!(recognizer.listen().await.unwrap(), None);

    recognizer.stop();
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_recordingSynthesizer_shouldRememberUtterances() {
    let synthesizer = RecordingSynthesizer::new();
    synthesizer.speak(&Utterance::new("واحد")).await.unwrap();
    synthesizer.speak(&Utterance::new("اثنان")).await.unwrap();
    assert_eq!(synthesizer.spoken_texts(), vec!["واحد".to_string(), "اثنان".to_string()]);

    let failing = RecordingSynthesizer::failing();
    assert!(failing.speak(&Utterance::new("واحد")).await.is_err());
    assert!(failing.spoken_texts().is_empty());
}

#[test]
fn test_typedRecognizer_afterStop_shouldKeepReading() {
    tokio_test::block_on(async {
        let input: &[u8] = "كتاب\nبيت\n".as_bytes();
        let mut recognizer = TypedRecognizer::new(BufReader::new(input));

        assert_eq!(recognizer.listen().await.unwrap(), Some("كتاب".to_string()));
        recognizer.stop();
        recognizer.stop();
        assert_eq!(recognizer.listen().await.unwrap(), Some("بيت".to_string()));
        assert_eq!(recognizer.listen().await.unwrap(), None);
    });
}

#[tokio::test]
async fn test_scriptedRecognizer_abort_shouldReportCancellation() {
    let mut recognizer = ScriptedRecognizer::from_responses(vec![ScriptedResponse::Abort]);
    assert!(matches!(recognizer.listen().await, Err(SpeechError::Aborted)));
    assert_eq!(recognizer.listen().await.unwrap(), None);
}

#[tokio::test]
async fn test_typedRecognizer_interruptible_shouldStillReadLines() {
    let input: &[u8] = "شكرا\n".as_bytes();
    let mut recognizer = TypedRecognizer::new(BufReader::new(input)).interruptible();

    assert_eq!(recognizer.listen().await.unwrap(), Some("شكرا".to_string()));
    assert_eq!(recognizer.listen().await.unwrap(), None);
}
