use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::content::{ContentStore, LexicalItem};
use crate::database::{DatabaseConnection, Repository, StatsStore};
use crate::drill::{select_items, DrillEvent, DrillMode, DrillOptions, DrillSession, DrillSummary};
use crate::errors::{AppError, DrillError};
use crate::speech::{SpeechRecognizer, SpeechSynthesizer};

/// Game key used when a drill spans every category
pub const ALL_CATEGORIES_GAME: &str = "all";

/// Main application controller: ties configuration, content, statistics
/// and speech together
pub struct Controller {
    config: Config,
    /// Directory relative content paths are resolved against
    base_dir: Option<PathBuf>,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("Configuration validation failed: {}", e)))?;
        Ok(Self { config, base_dir: None })
    }

    /// Load (or create) the configuration file at `path` and resolve
    /// relative paths against its directory
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let config = Config::load_or_create(path).map_err(|e| AppError::Config(format!("{:#}", e)))?;
        debug!("Using configuration from {:?}", path);

        let controller = Self::with_config(config)?;
        Ok(match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => controller.with_base_dir(dir),
            None => controller,
        })
    }

    /// Resolve relative content paths against `dir` instead of the working directory
    pub fn with_base_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Drill silently, showing prompts as text only
    pub fn without_spoken_prompts(mut self) -> Self {
        self.config.drill.speak_prompts = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where the configured content file lives
    pub fn content_path(&self) -> PathBuf {
        let path = Path::new(&self.config.content_path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Load the configured content file
    pub fn load_content(&self) -> Result<ContentStore, AppError> {
        let path = self.content_path();
        debug!("Loading content from {:?}", path);
        Ok(ContentStore::from_path(&path)?)
    }

    /// Open the configured statistics repository
    pub fn open_stats(&self) -> Result<Repository, AppError> {
        let path = self.config.database_path()?;
        Ok(Repository::new(DatabaseConnection::new(path)?))
    }

    /// Items for a drill round from one category or from all of them
    pub fn round_items(
        &self,
        content: &ContentStore,
        category: Option<&str>,
        count: Option<usize>,
    ) -> Result<Vec<LexicalItem>, AppError> {
        let pool: Vec<LexicalItem> = match category {
            Some(category) => content.items(category)?.to_vec(),
            None => content.all_items().cloned().collect(),
        };

        if pool.is_empty() {
            return Err(DrillError::NoItems.into());
        }

        let count = count.unwrap_or(self.config.drill.items_per_round);
        Ok(select_items(&pool, count, self.config.drill.shuffle))
    }

    /// Build a drill session for a game in the given mode
    pub fn drill_session(&self, game: &str, mode: DrillMode) -> DrillSession {
        let checker = self.config.matching.checker(mode.is_strict());
        info!(
            "Starting {:?} drill '{}' (threshold {:.2}, {})",
            mode,
            game,
            checker.threshold(),
            checker.algorithm()
        );
        DrillSession::new(game, checker, DrillOptions::from(&self.config.drill))
    }

    /// Run a full drill round and persist its statistics
    #[allow(clippy::too_many_arguments)]
    pub async fn run_drill<S, R>(
        &self,
        content: &ContentStore,
        category: Option<&str>,
        count: Option<usize>,
        mode: DrillMode,
        synthesizer: &S,
        recognizer: &mut R,
        stats: &dyn StatsStore,
        on_event: &mut (dyn for<'e> FnMut(DrillEvent<'e>) + Send),
    ) -> Result<DrillSummary, AppError>
    where
        S: SpeechSynthesizer + ?Sized,
        R: SpeechRecognizer + ?Sized,
    {
        let items = self.round_items(content, category, count)?;
        let game = category.unwrap_or(ALL_CATEGORIES_GAME);
        let session = self.drill_session(game, mode);

        let summary = session
            .run_with_events(&items, synthesizer, recognizer, stats, on_event)
            .await?;
        Ok(summary)
    }
}
