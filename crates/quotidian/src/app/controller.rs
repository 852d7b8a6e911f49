//! Application controller
//!
//! Owns the provider registry, favourites, and settings, and processes
//! frontend commands from a single channel. Fetches run on short-lived
//! worker threads; completions come back through the same channel and are
//! matched against a generation counter before they touch the snapshot.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::data::favorites::FavoritesBook;
use crate::data::settings::Settings;
use crate::data::types::{QuoteMode, QuoteRecord};
use crate::error::Result;
use crate::providers::ProviderRegistry;

use super::state::{AppCommand, AppSnapshot, FetchPhase};

const NOTICE_ADDED: &str = "Added to favourites.";
const NOTICE_DUPLICATE: &str = "Already in favourites.";
const NOTICE_REMOVED: &str = "Quote removed from favourites.";
const NOTICE_NOTHING_TO_SAVE: &str = "No quote to save.";

/// The application controller
///
/// Runs on a dedicated thread and serializes all state changes: frontends
/// only send commands and read the shared snapshot.
pub struct AppController {
    cmd_rx: Receiver<AppCommand>,
    cmd_tx: Sender<AppCommand>,
    shared_state: Arc<Mutex<AppSnapshot>>,
    registry: Arc<ProviderRegistry>,
    favorites: FavoritesBook,
    favorites_path: PathBuf,
    settings: Settings,
    settings_path: PathBuf,
    /// Monotonically increasing counter to discard stale fetch results
    fetch_generation: u64,
}

impl AppController {
    /// Create a controller with the default providers and storage locations
    pub fn new(
        cmd_rx: Receiver<AppCommand>,
        cmd_tx: Sender<AppCommand>,
        shared_state: Arc<Mutex<AppSnapshot>>,
    ) -> Result<Self> {
        let registry = Arc::new(ProviderRegistry::with_defaults()?);
        let favorites_path = FavoritesBook::default_path()?;
        let settings_path = Settings::default_path()?;

        let favorites = FavoritesBook::load_from(&favorites_path);
        let settings = Settings::load_from(&settings_path).unwrap_or_else(|e| {
            warn!("using default settings: {}", e);
            Settings::default()
        });

        Ok(Self {
            cmd_rx,
            cmd_tx,
            shared_state,
            registry,
            favorites,
            favorites_path,
            settings,
            settings_path,
            fetch_generation: 0,
        })
    }

    #[cfg(test)]
    fn with_parts(
        cmd_rx: Receiver<AppCommand>,
        cmd_tx: Sender<AppCommand>,
        shared_state: Arc<Mutex<AppSnapshot>>,
        registry: ProviderRegistry,
        favorites_path: PathBuf,
        settings_path: PathBuf,
    ) -> Self {
        let favorites = FavoritesBook::load_from(&favorites_path);
        Self {
            cmd_rx,
            cmd_tx,
            shared_state,
            registry: Arc::new(registry),
            favorites,
            favorites_path,
            settings: Settings::default(),
            settings_path,
            fetch_generation: 0,
        }
    }

    /// The quote mode persisted from the previous run
    pub fn startup_mode(&self) -> QuoteMode {
        self.settings.mode
    }

    /// Run the controller loop (blocking; call from a dedicated thread)
    ///
    /// Returns when a `Shutdown` command arrives or every sender is gone.
    pub fn run(&mut self) {
        self.publish_initial_state();

        loop {
            match self.cmd_rx.recv() {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    }

    /// Seed the snapshot with persisted state before the first command
    fn publish_initial_state(&mut self) {
        let mut state = self.lock_state();
        state.mode = self.settings.mode;
        state.favorites = self.favorites.records().to_vec();
    }

    /// Handle a single command. Returns true when the loop should exit.
    fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::Fetch(mode) => self.start_fetch(mode),
            AppCommand::SaveFavorite => self.save_favorite(),
            AppCommand::RemoveFavorite(quote_text) => self.remove_favorite(&quote_text),
            AppCommand::InternalFetchDone { generation, record } => {
                self.apply_fetch_done(generation, record);
            }
            AppCommand::Shutdown => return true,
        }
        false
    }

    /// Fetch a quote on a worker thread and send the result back
    ///
    /// Each call bumps `fetch_generation`; results from earlier calls are
    /// discarded in [`AppController::apply_fetch_done`]. A mode change is
    /// persisted immediately so the next run starts where this one left off.
    fn start_fetch(&mut self, mode: QuoteMode) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;

        if self.settings.mode != mode {
            self.settings.mode = mode;
            if let Err(e) = self.settings.save_to(&self.settings_path) {
                warn!("could not persist mode preference: {}", e);
            }
        }

        {
            let mut state = self.lock_state();
            state.phase = FetchPhase::Loading;
            state.mode = mode;
            state.notice = None;
        }

        debug!("fetch issued (mode {}, generation {})", mode, generation);

        let registry = Arc::clone(&self.registry);
        let cmd_tx = self.cmd_tx.clone();

        std::thread::Builder::new()
            .name("quote-fetch".into())
            .spawn(move || {
                let record = registry.fetch_or_fallback(mode);
                let _ = cmd_tx.send(AppCommand::InternalFetchDone { generation, record });
            })
            .expect("Failed to spawn quote-fetch thread");
    }

    /// Apply a finished fetch, unless a newer fetch was issued meanwhile
    fn apply_fetch_done(&mut self, generation: u64, record: QuoteRecord) {
        if generation != self.fetch_generation {
            // A newer fetch was issued while this one was in flight; its
            // completion owns the display now.
            debug!("discarding stale fetch result (generation {})", generation);
            return;
        }

        let mut state = self.lock_state();
        state.phase = FetchPhase::Loaded;
        state.quote = Some(record);
    }

    /// Save the displayed quote, reporting the added/duplicate outcome
    ///
    /// Refused while a fetch is loading, before the first fetch, and when
    /// the display holds the failure sentinel.
    fn save_favorite(&mut self) {
        let record = {
            let mut state = self.lock_state();
            if !state.can_save() {
                state.notice = Some(NOTICE_NOTHING_TO_SAVE.to_string());
                return;
            }
            state.quote.clone()
        };
        let Some(record) = record else {
            return;
        };

        let added = self.favorites.add(record);
        let persist_err = self.persist_favorites();

        let mut state = self.lock_state();
        state.favorites = self.favorites.records().to_vec();
        state.notice = Some(match persist_err {
            Some(msg) => msg,
            None if added => NOTICE_ADDED.to_string(),
            None => NOTICE_DUPLICATE.to_string(),
        });
    }

    /// Remove every favourite with this quote text and persist the result
    ///
    /// Idempotent: a miss removes nothing but still rewrites the slot.
    fn remove_favorite(&mut self, quote_text: &str) {
        let removed = self.favorites.remove(quote_text);
        let persist_err = self.persist_favorites();

        let mut state = self.lock_state();
        state.favorites = self.favorites.records().to_vec();
        match persist_err {
            Some(msg) => state.notice = Some(msg),
            None if removed > 0 => state.notice = Some(NOTICE_REMOVED.to_string()),
            None => {}
        }
    }

    /// Write the favourites slot; a failure becomes a notice, not a crash
    fn persist_favorites(&mut self) -> Option<String> {
        match self.favorites.save_to(&self.favorites_path) {
            Ok(()) => None,
            Err(e) => {
                warn!("could not persist favourites: {}", e);
                Some(format!("Could not save favourites: {}", e))
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AppSnapshot> {
        self.shared_state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::providers::QuoteProvider;
    use crossbeam_channel::bounded;
    use std::env::temp_dir;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("quotidian_ctrl_test_{}_{}.json", id, name))
    }

    struct FixedProvider {
        mode: QuoteMode,
        record: QuoteRecord,
    }

    impl FixedProvider {
        fn new(mode: QuoteMode, quote: &str, author: &str) -> Self {
            Self {
                mode,
                record: QuoteRecord::new(quote, author),
            }
        }
    }

    impl QuoteProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn mode(&self) -> QuoteMode {
            self.mode
        }

        fn fetch_random(&self) -> Result<QuoteRecord> {
            Ok(self.record.clone())
        }
    }

    struct FailingProvider {
        mode: QuoteMode,
    }

    impl QuoteProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn mode(&self) -> QuoteMode {
            self.mode
        }

        fn fetch_random(&self) -> Result<QuoteRecord> {
            Err(AppError::Parse("mock failure".to_string()))
        }
    }

    struct Fixture {
        ctrl: AppController,
        cmd_rx: Receiver<AppCommand>,
        shared_state: Arc<Mutex<AppSnapshot>>,
        favorites_path: PathBuf,
        settings_path: PathBuf,
    }

    impl Fixture {
        fn new(registry: ProviderRegistry, name: &str) -> Self {
            let (cmd_tx, cmd_rx) = bounded(16);
            let shared_state = Arc::new(Mutex::new(AppSnapshot::default()));
            let favorites_path = temp_path(&format!("{}_favs", name));
            let settings_path = temp_path(&format!("{}_settings", name));
            let ctrl = AppController::with_parts(
                cmd_rx.clone(),
                cmd_tx,
                shared_state.clone(),
                registry,
                favorites_path.clone(),
                settings_path.clone(),
            );
            Self {
                ctrl,
                cmd_rx,
                shared_state,
                favorites_path,
                settings_path,
            }
        }

        /// Wait for the worker thread spawned by the last fetch
        fn recv_fetch_done(&self) -> AppCommand {
            let cmd = self
                .cmd_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("worker never reported back");
            assert!(matches!(cmd, AppCommand::InternalFetchDone { .. }));
            cmd
        }

        fn snapshot(&self) -> AppSnapshot {
            self.shared_state
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        fn cleanup(&self) {
            let _ = fs::remove_file(&self.favorites_path);
            let _ = fs::remove_file(&self.settings_path);
        }
    }

    fn life_registry(quote: &str, author: &str) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(FixedProvider::new(QuoteMode::Life, quote, author)));
        registry
    }

    #[test]
    fn test_fetch_moves_loading_to_loaded() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "fetch");

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        assert_eq!(fx.snapshot().phase, FetchPhase::Loading);
        assert!(fx.snapshot().quote.is_none());

        let done = fx.recv_fetch_done();
        fx.ctrl.handle_command(done);

        let snapshot = fx.snapshot();
        assert_eq!(snapshot.phase, FetchPhase::Loaded);
        assert_eq!(snapshot.quote, Some(QuoteRecord::new("Q", "A")));

        fx.cleanup();
    }

    #[test]
    fn test_stale_fetch_result_discarded() {
        let mut registry = life_registry("life quote", "la");
        registry.register(Box::new(FixedProvider::new(QuoteMode::Dev, "dev quote", "da")));
        let mut fx = Fixture::new(registry, "stale");

        // First fetch completes, but before its result is applied the user
        // has already switched mode and fetched again.
        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        let stale = fx.recv_fetch_done();

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Dev));
        let current = fx.recv_fetch_done();

        fx.ctrl.handle_command(stale);
        let snapshot = fx.snapshot();
        assert_eq!(snapshot.phase, FetchPhase::Loading);
        assert!(snapshot.quote.is_none());

        fx.ctrl.handle_command(current);
        let snapshot = fx.snapshot();
        assert_eq!(snapshot.phase, FetchPhase::Loaded);
        assert_eq!(snapshot.quote, Some(QuoteRecord::new("dev quote", "da")));
        assert_eq!(snapshot.mode, QuoteMode::Dev);

        fx.cleanup();
    }

    #[test]
    fn test_failed_fetch_lands_as_sentinel() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(FailingProvider {
            mode: QuoteMode::Life,
        }));
        let mut fx = Fixture::new(registry, "failed");

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        let done = fx.recv_fetch_done();
        fx.ctrl.handle_command(done);

        let snapshot = fx.snapshot();
        assert_eq!(snapshot.phase, FetchPhase::Loaded);
        assert!(snapshot.fetch_failed());
        assert!(!snapshot.can_save());

        fx.cleanup();
    }

    #[test]
    fn test_save_before_any_fetch_is_refused() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "noquote");

        fx.ctrl.handle_command(AppCommand::SaveFavorite);

        let snapshot = fx.snapshot();
        assert_eq!(snapshot.notice.as_deref(), Some("No quote to save."));
        assert!(snapshot.favorites.is_empty());
        // The guard fires before anything touches the slot.
        assert!(!fx.favorites_path.exists());

        fx.cleanup();
    }

    #[test]
    fn test_save_sentinel_is_refused() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(FailingProvider {
            mode: QuoteMode::Life,
        }));
        let mut fx = Fixture::new(registry, "sentinel");

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        let done = fx.recv_fetch_done();
        fx.ctrl.handle_command(done);
        fx.ctrl.handle_command(AppCommand::SaveFavorite);

        let snapshot = fx.snapshot();
        assert_eq!(snapshot.notice.as_deref(), Some("No quote to save."));
        assert!(snapshot.favorites.is_empty());

        fx.cleanup();
    }

    #[test]
    fn test_save_then_duplicate_save() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "savedup");

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        let done = fx.recv_fetch_done();
        fx.ctrl.handle_command(done);

        fx.ctrl.handle_command(AppCommand::SaveFavorite);
        let snapshot = fx.snapshot();
        assert_eq!(snapshot.notice.as_deref(), Some("Added to favourites."));
        assert_eq!(snapshot.favorites.len(), 1);

        fx.ctrl.handle_command(AppCommand::SaveFavorite);
        let snapshot = fx.snapshot();
        assert_eq!(snapshot.notice.as_deref(), Some("Already in favourites."));
        assert_eq!(snapshot.favorites.len(), 1);

        // The slot holds exactly one record.
        let book = FavoritesBook::load_from(&fx.favorites_path);
        assert_eq!(book.len(), 1);

        fx.cleanup();
    }

    #[test]
    fn test_remove_updates_snapshot_and_slot() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "remove");

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        let done = fx.recv_fetch_done();
        fx.ctrl.handle_command(done);
        fx.ctrl.handle_command(AppCommand::SaveFavorite);

        fx.ctrl.handle_command(AppCommand::RemoveFavorite("Q".to_string()));

        let snapshot = fx.snapshot();
        assert!(snapshot.favorites.is_empty());
        assert_eq!(
            snapshot.notice.as_deref(),
            Some("Quote removed from favourites.")
        );
        assert!(FavoritesBook::load_from(&fx.favorites_path).is_empty());

        fx.cleanup();
    }

    #[test]
    fn test_remove_miss_still_writes_slot() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "removemiss");

        fx.ctrl
            .handle_command(AppCommand::RemoveFavorite("absent".to_string()));

        // Nothing matched, but the slot is rewritten anyway.
        let content = fs::read_to_string(&fx.favorites_path).unwrap();
        assert_eq!(content.trim(), "[]");
        assert!(fx.snapshot().notice.is_none());

        fx.cleanup();
    }

    #[test]
    fn test_mode_change_persists_settings() {
        let mut registry = life_registry("L", "la");
        registry.register(Box::new(FixedProvider::new(QuoteMode::Dev, "D", "da")));
        let mut fx = Fixture::new(registry, "modeswitch");

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Dev));

        assert_eq!(fx.snapshot().mode, QuoteMode::Dev);
        let saved = Settings::load_from(&fx.settings_path).unwrap();
        assert_eq!(saved.mode, QuoteMode::Dev);

        // Drain the worker message so the thread can finish.
        let _ = fx.recv_fetch_done();
        fx.cleanup();
    }

    #[test]
    fn test_fetch_clears_previous_notice() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "noticegone");

        fx.ctrl.handle_command(AppCommand::SaveFavorite);
        assert!(fx.snapshot().notice.is_some());

        fx.ctrl.handle_command(AppCommand::Fetch(QuoteMode::Life));
        assert!(fx.snapshot().notice.is_none());

        let _ = fx.recv_fetch_done();
        fx.cleanup();
    }

    #[test]
    fn test_shutdown_stops_the_loop() {
        let mut fx = Fixture::new(life_registry("Q", "A"), "shutdown");

        assert!(!fx.ctrl.handle_command(AppCommand::RemoveFavorite("x".into())));
        assert!(fx.ctrl.handle_command(AppCommand::Shutdown));

        fx.cleanup();
    }

    #[test]
    fn test_initial_state_mirrors_persisted_favorites() {
        let favorites_path = temp_path("seed_favs");
        fs::write(
            &favorites_path,
            r#"[{"quote": "A", "author": "X"}, {"quote": "B", "author": "Y"}]"#,
        )
        .unwrap();
        let settings_path = temp_path("seed_settings");

        let (cmd_tx, cmd_rx) = bounded(16);
        let shared_state = Arc::new(Mutex::new(AppSnapshot::default()));
        let mut ctrl = AppController::with_parts(
            cmd_rx,
            cmd_tx,
            shared_state.clone(),
            life_registry("Q", "A"),
            favorites_path.clone(),
            settings_path.clone(),
        );

        ctrl.publish_initial_state();

        let snapshot = shared_state.lock().unwrap().clone();
        assert_eq!(snapshot.favorites.len(), 2);
        assert_eq!(snapshot.favorites[0].quote, "A");
        assert_eq!(snapshot.phase, FetchPhase::Idle);

        let _ = fs::remove_file(&favorites_path);
        let _ = fs::remove_file(&settings_path);
    }
}
