//! Game orchestrator
//!
//! Owns the simulation plus its platform collaborators (store, audio) and
//! exposes the small surface the page needs: a HUD snapshot and the
//! start/retry and mute commands.

use glam::Vec2;

use crate::audio::SoundSink;
use crate::consts::MAX_HEALTH;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Everything the HUD and overlays read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub health: u8,
    pub level: u32,
    pub muted: bool,
}

impl Hud {
    /// Filled hearts for remaining health, hollow for lost
    pub fn hearts(&self) -> String {
        (0..MAX_HEALTH)
            .map(|i| if i < self.health { '\u{2665}' } else { '\u{2661}' })
            .collect()
    }
}

/// A mounted game instance
pub struct Game<S: KeyValueStore, A: SoundSink> {
    state: GameState,
    high_score: HighScore,
    settings: Settings,
    store: S,
    audio: A,
}

impl<S: KeyValueStore, A: SoundSink> Game<S, A> {
    /// Read persisted high score and settings once, then build the state
    pub fn mount(seed: u64, viewport: Vec2, tuning: Tuning, store: S, audio: A) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let state = GameState::new(seed, viewport, tuning, high_score.best);
        log::info!("Game mounted with seed {}", seed);
        Self {
            state,
            high_score,
            settings,
            store,
            audio,
        }
    }

    /// Run one frame of simulation and act on what it produced
    pub fn frame(&mut self, input: &TickInput) {
        tick(&mut self.state, input);
        self.dispatch_events();
    }

    /// Start or retry. Ignored while a session is running.
    pub fn start(&mut self) {
        if self.state.start() {
            log::info!("Session started");
        }
        self.dispatch_events();
    }

    /// Flip the mute flag and persist it. Returns the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        if let Err(err) = self.settings.save(&mut self.store) {
            log::warn!("Could not save settings: {}", err);
        }
        self.settings.muted
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.state.phase,
            score: self.state.score,
            high_score: self.high_score.best.max(self.state.high_score),
            health: self.state.health,
            level: self.state.level,
            muted: self.settings.muted,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for debugging and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(effect) => {
                    if !self.settings.muted {
                        self.audio.play(effect);
                    }
                }
                GameEvent::EnemyDestroyed { kind, points } => {
                    log::trace!("{:?} destroyed (+{})", kind, points);
                }
                GameEvent::PlayerHit { health } => {
                    log::debug!("Player hit, health {}", health);
                }
                GameEvent::GameOver { score, new_record } => {
                    log::info!("Game over: score {}", score);
                    if new_record {
                        if let Err(err) = self.high_score.record(score, &mut self.store) {
                            log::warn!("Could not save high score: {}", err);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::persistence::{MemoryStore, StorageError};
    use crate::platform::PointerCell;
    use crate::sim::{Enemy, EnemyKind};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundEffect>,
    }

    impl SoundSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    /// Store whose writes always fail
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn input() -> TickInput {
        TickInput {
            viewport: VIEWPORT,
            pointer: None,
        }
    }

    /// Put a fresh enemy on top of the player with one life left
    fn doom<S: KeyValueStore, A: SoundSink>(game: &mut Game<S, A>, score: u64) {
        let state = game.state_mut();
        let tuning = state.tuning.clone();
        state.score = score;
        state.health = 1;
        let pos = state.player.pos;
        state.enemies.push(Enemy::new(EnemyKind::Drone, pos, 0.0, &tuning));
    }

    #[test]
    fn test_mount_reads_high_score() {
        let store = MemoryStore::with_entry(HighScore::STORAGE_KEY, "1234");
        let game = Game::mount(1, VIEWPORT, Tuning::default(), store, Recorder::default());
        let hud = game.hud();
        assert_eq!(hud.high_score, 1234);
        assert_eq!(hud.phase, GamePhase::Start);
        assert_eq!(hud.health, 3);
    }

    #[test]
    fn test_corrupt_high_score_is_zero() {
        let store = MemoryStore::with_entry(HighScore::STORAGE_KEY, "garbage");
        let game = Game::mount(1, VIEWPORT, Tuning::default(), store, Recorder::default());
        assert_eq!(game.hud().high_score, 0);
    }

    #[test]
    fn test_start_plays_powerup() {
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), MemoryStore::new(), Recorder::default());
        game.start();
        assert_eq!(game.hud().phase, GamePhase::Playing);
        assert_eq!(game.audio_mut().played, vec![SoundEffect::Powerup]);
    }

    #[test]
    fn test_mute_silences_effects() {
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), MemoryStore::new(), Recorder::default());
        assert!(game.toggle_mute());
        game.start();
        for _ in 0..60 {
            game.frame(&input());
        }
        assert!(game.audio_mut().played.is_empty());
        assert!(game.hud().muted);
    }

    #[test]
    fn test_mute_is_persisted() {
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), MemoryStore::new(), Recorder::default());
        game.toggle_mute();
        let store = game.store.clone();
        let remounted = Game::mount(2, VIEWPORT, Tuning::default(), store, Recorder::default());
        assert!(remounted.settings().muted);
    }

    #[test]
    fn test_lower_score_keeps_stored_record() {
        let store = MemoryStore::with_entry(HighScore::STORAGE_KEY, "500");
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), store, Recorder::default());
        game.start();
        doom(&mut game, 300);
        game.frame(&input());

        let hud = game.hud();
        assert_eq!(hud.phase, GamePhase::GameOver);
        assert_eq!(hud.high_score, 500);
        assert_eq!(game.store.get(HighScore::STORAGE_KEY).as_deref(), Some("500"));
    }

    #[test]
    fn test_new_record_is_persisted_on_game_over() {
        let store = MemoryStore::with_entry(HighScore::STORAGE_KEY, "500");
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), store, Recorder::default());
        game.start();
        doom(&mut game, 800);
        game.frame(&input());

        assert_eq!(game.hud().high_score, 800);
        assert_eq!(game.store.get(HighScore::STORAGE_KEY).as_deref(), Some("800"));
        assert_eq!(game.audio_mut().played.last(), Some(&SoundEffect::Explosion));
    }

    #[test]
    fn test_retry_after_game_over() {
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), MemoryStore::new(), Recorder::default());
        game.start();
        for _ in 0..200 {
            game.frame(&input());
        }
        doom(&mut game, 50);
        game.frame(&input());
        assert_eq!(game.hud().phase, GamePhase::GameOver);

        game.start();
        let hud = game.hud();
        assert_eq!((hud.phase, hud.health, hud.score, hud.level), (GamePhase::Playing, 3, 0, 1));
        assert!(game.state().enemies.is_empty());
        assert!(game.state().bullets.is_empty());
        assert!(game.state().particles.is_empty());
    }

    #[test]
    fn test_storage_failure_does_not_break_play() {
        let store = ReadOnlyStore(MemoryStore::new());
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), store, Recorder::default());
        game.toggle_mute();
        game.start();
        doom(&mut game, 900);
        game.frame(&input());
        assert_eq!(game.hud().high_score, 900);
        assert_eq!(game.hud().phase, GamePhase::GameOver);
    }

    #[test]
    fn test_hud_hearts() {
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), MemoryStore::new(), Recorder::default());
        game.start();
        assert_eq!(game.hud().hearts(), "\u{2665}\u{2665}\u{2665}");
        game.state_mut().health = 1;
        assert_eq!(game.hud().hearts(), "\u{2665}\u{2661}\u{2661}");
    }

    #[test]
    fn test_retry_ignores_previous_session_pointer() {
        let pointer = PointerCell::new();
        let mut game = Game::mount(1, VIEWPORT, Tuning::default(), MemoryStore::new(), Recorder::default());
        game.start();
        pointer.set(Vec2::new(40.0, 40.0));
        game.frame(&TickInput { viewport: VIEWPORT, pointer: pointer.get() });
        doom(&mut game, 0);
        game.frame(&input());
        assert_eq!(game.hud().phase, GamePhase::GameOver);

        pointer.clear();
        game.start();
        let reset = game.state().player.pos;
        game.frame(&TickInput { viewport: VIEWPORT, pointer: pointer.get() });
        assert_eq!(game.state().player.pos, reset);
    }
}
