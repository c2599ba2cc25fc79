/*!
 * # nutq - Arabic pronunciation matching and drills
 *
 * A Rust library for checking spoken or typed Arabic answers against
 * expected vocabulary, and for running pronunciation drills on top of it.
 *
 * ## Features
 *
 * - Arabic normalization (tashkeel, alef variants, bidi marks, whitespace)
 * - Positional and Levenshtein similarity scoring
 * - Precedence-ordered pronunciation checking with accepted alternates
 * - JSON vocabulary content store
 * - Injectable speech synthesis and recognition
 * - SQLite-backed per-game statistics
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `matching`: Normalizer, similarity scorers and pronunciation checker
 * - `content`: Lexical items and the category-keyed content store
 * - `speech`: Speech capability traits with console and mock implementations
 * - `database`: Statistics store trait, SQLite repository and in-memory store
 * - `drill`: Drill sessions built on the checker
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod content;
pub mod database;
pub mod drill;
pub mod errors;
pub mod matching;
pub mod speech;

// Re-export main types for easier usage
pub use app_config::Config;
pub use content::{ContentStore, LexicalItem};
pub use drill::{DrillMode, DrillSession, DrillSummary};
pub use errors::{AppError, ContentError, DrillError, SpeechError};
pub use matching::{check_pronunciation, normalize, similarity, MatchResult, MatchType, PronunciationChecker};
