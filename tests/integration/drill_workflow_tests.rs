/*!
 * Integration tests for scripted drill sessions
 */

use anyhow::Result;
use std::sync::atomic::Ordering;

use nutq::database::{MemoryStatsStore, StatsStore};
use nutq::drill::{DrillEvent, DrillOptions, DrillSession};
use nutq::errors::{DrillError, SpeechError};
use nutq::matching::{MatchType, PronunciationChecker};
use nutq::speech::mock::{RecordingSynthesizer, ScriptedRecognizer, ScriptedResponse};

use crate::common;

fn session(max_attempts: u32) -> DrillSession {
    let options = DrillOptions { max_attempts, ..DrillOptions::default() };
    DrillSession::new("greetings", PronunciationChecker::default(), options)
}

#[tokio::test]
async fn test_drill_allCorrect_shouldScoreEveryItem() -> Result<()> {
    common::init_logging();
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا", "شكرا"]);
    let stops = recognizer.stop_counter();
    let stats = MemoryStatsStore::new();

    let summary = session(2).run(&items, &synthesizer, &mut recognizer, &stats).await?;

    assert_eq!(summary.game, "greetings");
    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.score_percent(), 100);
    assert!(!summary.aborted);
    assert_eq!(stops.load(Ordering::SeqCst), 1);

    // Prompts are spoken as written, diacritics included
    assert_eq!(synthesizer.spoken_texts(), vec!["مَرْحَبًا".to_string(), "شُكْرًا".to_string()]);

    let game_stats = stats.get_stats("greetings").await?.expect("stats saved");
    assert_eq!(game_stats.played, 2);
    assert_eq!(game_stats.correct, 2);
    assert_eq!(game_stats.best_streak, 2);
    assert_eq!(stats.attempt_count().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_drill_wrongAnswers_shouldRetryUpToMaxAttempts() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["باي", "اهلا", "xyz", "abc", "شكرا"]);
    let stats = MemoryStatsStore::new();

    let mut events = Vec::new();
    let mut on_event = |event: DrillEvent<'_>| match event {
        DrillEvent::Prompt { index, total, item } => events.push(format!("prompt {}/{} {}", index + 1, total, item.eng)),
        DrillEvent::Checked { heard, feedback, .. } => events.push(format!("checked {} {}", heard, feedback.message)),
        DrillEvent::Revealed { item } => events.push(format!("revealed {}", item.eng)),
    };

    let summary = session(2)
        .run_with_events(&items, &synthesizer, &mut recognizer, &stats, &mut on_event)
        .await?;

    assert_eq!(
        events,
        vec![
            "prompt 1/2 hello",
            "checked باي Try again, 0% close",
            "checked اهلا Correct!",
            "prompt 2/2 thank you",
            "checked xyz Try again, 0% close",
            "checked abc Try again, 0% close",
            "revealed thank you",
        ]
    );

    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.outcomes[0].attempts.len(), 2);
    assert_eq!(summary.outcomes[0].attempts[1].match_type, MatchType::Alternate);
    assert!(!summary.outcomes[1].correct);

    // The unused transcript is left for the next session
    assert_eq!(recognizer.remaining(), 1);
    assert_eq!(stats.attempt_count().await, 4);

    let game_stats = stats.get_stats("greetings").await?.expect("stats saved");
    assert_eq!(game_stats.played, 2);
    assert_eq!(game_stats.correct, 1);
    assert_eq!(game_stats.current_streak, 0);
    assert_eq!(game_stats.best_streak, 1);
    Ok(())
}

#[tokio::test]
async fn test_drill_inputEndsBeforeAnswer_shouldStopWithoutScoringItem() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا"]);
    let stops = recognizer.stop_counter();
    let stats = MemoryStatsStore::new();

    let summary = session(2).run(&items, &synthesizer, &mut recognizer, &stats).await?;

    assert!(summary.aborted);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.correct, 1);
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert_eq!(stats.get_stats("greetings").await?.map(|s| s.played), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_drill_inputEndsAfterWrongAnswer_shouldScoreItemAsMissed() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا", "باي"]);
    let stats = MemoryStatsStore::new();

    let summary = session(3).run(&items, &synthesizer, &mut recognizer, &stats).await?;

    assert!(summary.aborted);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.outcomes[1].attempts.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_drill_failingSynthesizer_shouldReturnSpeechErrorAndStop() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::failing();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا"]);
    let stops = recognizer.stop_counter();
    let stats = MemoryStatsStore::new();

    let result = session(2).run(&items, &synthesizer, &mut recognizer, &stats).await;

    assert!(matches!(result, Err(DrillError::Speech(SpeechError::Unavailable(_)))));
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert_eq!(recognizer.remaining(), 1);
    assert_eq!(stats.attempt_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_drill_failingRecognizer_shouldPropagateError() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::from_responses(vec![
        ScriptedResponse::Transcript("مرحبا".to_string()),
        ScriptedResponse::Fail("permission denied".to_string()),
    ]);
    let stops = recognizer.stop_counter();
    let stats = MemoryStatsStore::new();

    let result = session(2).run(&items, &synthesizer, &mut recognizer, &stats).await;

    assert!(matches!(result, Err(DrillError::Speech(_))));
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    // The first item was already saved
    assert_eq!(stats.get_stats("greetings").await?.map(|s| s.played), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_drill_speakPromptsDisabled_shouldStaySilent() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::failing();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا", "شكرا"]);
    let stats = MemoryStatsStore::new();

    let options = DrillOptions { speak_prompts: false, ..DrillOptions::default() };
    let summary = DrillSession::new("greetings", PronunciationChecker::default(), options)
        .run(&items, &synthesizer, &mut recognizer, &stats)
        .await?;

    assert_eq!(summary.correct, 2);
    Ok(())
}

#[tokio::test]
async fn test_drill_noItems_shouldFail() {
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا"]);
    let stats = MemoryStatsStore::new();

    let result = session(2).run(&[], &synthesizer, &mut recognizer, &stats).await;
    assert!(matches!(result, Err(DrillError::NoItems)));
    assert_eq!(recognizer.remaining(), 1);
}

#[tokio::test]
async fn test_drill_zeroMaxAttempts_shouldStillAskEveryItem() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["مرحبا", "شكرا"]);
    let stats = MemoryStatsStore::new();

    let summary = session(0).run(&items, &synthesizer, &mut recognizer, &stats).await?;

    assert!(!summary.aborted);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 2);
    assert_eq!(recognizer.remaining(), 0);
    assert_eq!(synthesizer.spoken_texts(), vec!["مَرْحَبًا".to_string(), "شُكْرًا".to_string()]);
    assert_eq!(stats.attempt_count().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_drill_zeroMaxAttempts_wrongAnswer_shouldMoveOn() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::new(["باي", "شكرا"]);
    let stats = MemoryStatsStore::new();

    let summary = session(0).run(&items, &synthesizer, &mut recognizer, &stats).await?;

    assert!(!summary.aborted);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.outcomes[0].attempts.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_drill_listeningCancelled_shouldEndGracefully() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let mut recognizer = ScriptedRecognizer::from_responses(vec![
        ScriptedResponse::Transcript("مرحبا".to_string()),
        ScriptedResponse::Abort,
    ]);
    let stops = recognizer.stop_counter();
    let stats = MemoryStatsStore::new();

    let summary = session(2).run(&items, &synthesizer, &mut recognizer, &stats).await?;

    assert!(summary.aborted);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.correct, 1);
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert_eq!(stats.get_stats("greetings").await?.map(|s| s.played), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_drill_secondRound_shouldAccumulateStats() -> Result<()> {
    let items = common::greeting_items();
    let synthesizer = RecordingSynthesizer::new();
    let stats = MemoryStatsStore::new();

    for answers in [["مرحبا", "شكرا"], ["اهلا", "شكرا"]] {
        let mut recognizer = ScriptedRecognizer::new(answers);
        session(1).run(&items, &synthesizer, &mut recognizer, &stats).await?;
    }

    let game_stats = stats.get_stats("greetings").await?.expect("stats saved");
    assert_eq!(game_stats.played, 4);
    assert_eq!(game_stats.correct, 4);
    assert_eq!(game_stats.current_streak, 4);
    Ok(())
}
