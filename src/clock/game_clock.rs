use log::{debug, info, warn};
use std::fmt;
use tokio::time::{Duration, Instant};

use super::timer::{tick_period, TaskTimer};
use crate::game::config::{MAX_BASE_SPEED, MIN_BASE_SPEED};
use crate::game::{
    ConfigError, Direction, GameConfig, GameEngine, GameOver, GamePhase, RenderSnapshot,
    TickResult,
};
use crate::metrics::GameMetrics;
use crate::store::HighScoreStore;

/// Refresh rate of the elapsed time display
const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Which scheduled task fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Advance the simulation
    Tick,
    /// Refresh elapsed play time
    Second,
}

/// Rejected session operation
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Configuration can only change between runs
    RunInProgress,
    InvalidConfig(ConfigError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunInProgress => write!(f, "settings are locked while a game is running"),
            Self::InvalidConfig(err) => write!(f, "invalid settings: {}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            Self::RunInProgress => None,
        }
    }
}

/// Drives a [`GameEngine`] in real time
///
/// Owns two independently cancellable periodic tasks: the simulation tick,
/// whose period follows the engine's speed, and a 1 Hz play-time refresh.
/// Both are armed only while the engine is running. The clock never touches
/// engine state except through engine methods.
pub struct GameClock {
    engine: GameEngine,
    metrics: GameMetrics,
    tick_timer: TaskTimer,
    clock_timer: TaskTimer,
    store: Box<dyn HighScoreStore>,
}

impl GameClock {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_engine(GameEngine::new(config), store)
    }

    /// Wrap an existing engine, seeding its high score from the store
    pub fn with_engine(mut engine: GameEngine, store: Box<dyn HighScoreStore>) -> Self {
        match store.load() {
            Ok(high_score) => engine.set_high_score(high_score),
            Err(err) => warn!("Could not read high score, starting from zero: {:#}", err),
        }

        Self {
            engine,
            metrics: GameMetrics::new(),
            tick_timer: TaskTimer::new(),
            clock_timer: TaskTimer::new(),
            store,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.engine.snapshot()
    }

    pub fn elapsed_text(&self) -> String {
        self.metrics.format_time()
    }

    /// Current simulation tick period, `None` while the tick task is idle
    pub fn tick_period(&self) -> Option<Duration> {
        self.tick_timer.period()
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_timer.is_armed()
    }

    pub fn is_counting_time(&self) -> bool {
        self.clock_timer.is_armed()
    }

    /// Begin a run from Idle; no-op in any other phase
    pub fn start(&mut self) -> bool {
        if !self.engine.start() {
            return false;
        }

        self.metrics.on_game_start(Instant::now());
        self.arm_timers();
        info!(
            "game started at {:.1} ticks/s on a {}x{} board",
            self.engine.speed(),
            self.engine.state().grid_size,
            self.engine.state().grid_size
        );
        true
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&mut self) -> bool {
        let now = Instant::now();

        match self.engine.phase() {
            GamePhase::Running => {
                self.engine.pause();
                self.cancel_timers();
                self.metrics.on_pause(now);
                info!("paused at {}", self.metrics.format_time());
                true
            }
            GamePhase::Paused => {
                self.engine.resume();
                self.metrics.on_resume(now);
                self.arm_timers();
                info!("resumed at {}", self.metrics.format_time());
                true
            }
            phase => {
                debug!("pause ignored while {:?}", phase);
                false
            }
        }
    }

    /// Abandon whatever is going on and set up a fresh idle board
    pub fn restart(&mut self) {
        self.cancel_timers();
        self.engine.reset();
        self.metrics.reset();
        info!("board reset");
    }

    /// Forward a direction from the input adapter
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.engine.set_pending_direction(direction)
    }

    /// Swap in new settings between runs and reset the board
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<(), SessionError> {
        if !self.engine.phase().is_settled() {
            return Err(SessionError::RunInProgress);
        }
        config.validate().map_err(SessionError::InvalidConfig)?;

        self.cancel_timers();
        self.engine.reconfigure(config);
        self.metrics.reset();
        Ok(())
    }

    /// Nudge the base speed within its allowed range
    pub fn adjust_base_speed(&mut self, delta: i32) -> Result<u32, SessionError> {
        let mut config = self.config().clone();
        let speed = i64::from(config.base_speed) + i64::from(delta);
        let base_speed =
            speed.clamp(i64::from(MIN_BASE_SPEED), i64::from(MAX_BASE_SPEED)) as u32;
        config.base_speed = base_speed;
        self.reconfigure(config)?;
        Ok(base_speed)
    }

    pub fn cycle_board_size(&mut self) -> Result<(), SessionError> {
        let mut config = self.config().clone();
        config.board_size = config.board_size.next();
        self.reconfigure(config)
    }

    pub fn cycle_background(&mut self) -> Result<(), SessionError> {
        let mut config = self.config().clone();
        config.background = config.background.next();
        self.reconfigure(config)
    }

    /// Wait for whichever armed task fires next
    ///
    /// Pending forever while neither task is armed. Cancel safe.
    pub async fn next_event(&mut self) -> ClockEvent {
        tokio::select! {
            biased;
            _ = self.tick_timer.tick() => ClockEvent::Tick,
            _ = self.clock_timer.tick() => ClockEvent::Second,
        }
    }

    pub fn handle(&mut self, event: ClockEvent) -> Option<TickResult> {
        match event {
            ClockEvent::Tick => Some(self.on_tick()),
            ClockEvent::Second => {
                self.on_second();
                None
            }
        }
    }

    /// Run one simulation step and react to what the engine reports
    pub fn on_tick(&mut self) -> TickResult {
        let result = self.engine.tick();

        if let Some(speed) = result.speed_changed {
            self.tick_timer.arm(tick_period(speed));
            debug!("tick timer re-armed at {:?}", tick_period(speed));
        }

        if let Some(over) = result.game_over {
            self.finish(over);
        }

        result
    }

    pub fn on_second(&mut self) {
        self.metrics.update(Instant::now());
    }

    fn finish(&mut self, over: GameOver) {
        self.cancel_timers();
        self.metrics.on_game_over(Instant::now());

        if over.new_high_score {
            info!("new high score {}", over.final_score);
            if let Err(err) = self.store.save(over.final_score) {
                warn!("Could not save high score: {:#}", err);
            }
        }
    }

    fn arm_timers(&mut self) {
        self.tick_timer.arm(tick_period(self.engine.speed()));
        self.clock_timer.arm(CLOCK_PERIOD);
    }

    fn cancel_timers(&mut self) {
        self.tick_timer.cancel();
        self.clock_timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, FoodKind, GameState, Position, Snake};
    use crate::store::MemoryStore;
    use tokio::time::{advance, timeout};

    fn clock_with(snake: Snake, food: Food, score: u32, stored: u32) -> GameClock {
        let config = GameConfig::default();
        let mut state = GameState::new(snake, food, config.grid_size(), config.base_speed());
        state.score = score;
        let engine = GameEngine::from_state(config, state, 17);
        GameClock::with_engine(engine, Box::new(MemoryStore::new(stored)))
    }

    fn fresh_clock() -> GameClock {
        GameClock::with_engine(
            GameEngine::with_seed(GameConfig::default(), 1),
            Box::new(MemoryStore::default()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_arms_both_tasks() {
        let mut clock = fresh_clock();
        assert!(!clock.is_ticking());

        assert!(clock.start());
        assert_eq!(clock.phase(), GamePhase::Running);
        assert_eq!(clock.tick_period(), Some(Duration::from_millis(200)));
        assert!(clock.is_counting_time());

        // Already running
        assert!(!clock.start());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_per_second_follow_speed() {
        let mut clock = fresh_clock();
        clock.start();

        let mut ticks = 0;
        loop {
            match clock.next_event().await {
                ClockEvent::Tick => {
                    clock.on_tick();
                    ticks += 1;
                }
                ClockEvent::Second => break,
            }
        }

        assert_eq!(ticks, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_time_skips_pause() {
        let mut clock = fresh_clock();
        clock.start();

        advance(Duration::from_secs(5)).await;
        assert!(clock.toggle_pause());
        assert_eq!(clock.metrics().elapsed_secs(), 5);
        assert!(!clock.is_ticking());
        assert!(!clock.is_counting_time());

        advance(Duration::from_secs(100)).await;
        assert!(clock.toggle_pause());
        assert!(clock.is_ticking());

        advance(Duration::from_secs(1)).await;
        clock.on_second();
        assert_eq!(clock.metrics().elapsed_secs(), 6);
        assert_eq!(clock.elapsed_text(), "00:06");
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_clock_has_no_events() {
        let mut clock = fresh_clock();
        clock.start();
        clock.toggle_pause();

        assert!(timeout(Duration::from_secs(30), clock.next_event())
            .await
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_rearms_tick_timer() {
        let mut clock = clock_with(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Food::new(Position::new(6, 5), FoodKind::White),
            49,
            0,
        );
        clock.start();
        assert_eq!(clock.tick_period(), Some(Duration::from_millis(200)));

        let result = clock.on_tick();

        assert_eq!(result.speed_changed, Some(5.5));
        assert_eq!(clock.engine().speed(), 5.5);
        assert_eq!(clock.tick_period(), Some(Duration::from_secs_f64(1.0 / 5.5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_cancels_tasks_and_persists_high_score() {
        let mut clock = clock_with(
            Snake::new(Position::new(0, 0), Direction::Left, 1),
            Food::new(Position::new(9, 9), FoodKind::White),
            37,
            20,
        );
        assert_eq!(clock.engine().high_score(), 20);
        clock.start();

        let result = clock.on_tick();

        assert!(result.game_over.unwrap().new_high_score);
        assert_eq!(clock.phase(), GamePhase::Over);
        assert!(!clock.is_ticking());
        assert!(!clock.is_counting_time());
        assert_eq!(clock.store().load().unwrap(), 37);
        assert_eq!(clock.metrics().games_played, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lower_score_keeps_stored_high_score() {
        let mut clock = clock_with(
            Snake::new(Position::new(0, 0), Direction::Up, 1),
            Food::new(Position::new(9, 9), FoodKind::White),
            10,
            37,
        );
        clock.start();

        let result = clock.on_tick();

        assert!(!result.game_over.unwrap().new_high_score);
        assert_eq!(clock.store().load().unwrap(), 37);
        assert_eq!(clock.engine().high_score(), 37);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_after_game_over_needs_restart() {
        let mut clock = clock_with(
            Snake::new(Position::new(0, 0), Direction::Left, 1),
            Food::new(Position::new(9, 9), FoodKind::White),
            0,
            0,
        );
        clock.start();
        clock.on_tick();

        assert!(!clock.start());
        assert!(!clock.toggle_pause());

        clock.restart();
        assert_eq!(clock.phase(), GamePhase::Idle);
        assert!(clock.start());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_and_resets() {
        let mut clock = fresh_clock();
        clock.start();
        clock.steer(Direction::Down);
        clock.on_tick();
        advance(Duration::from_secs(3)).await;
        clock.on_second();

        clock.restart();

        assert_eq!(clock.phase(), GamePhase::Idle);
        assert!(!clock.is_ticking());
        assert!(!clock.is_counting_time());
        assert_eq!(clock.elapsed_text(), "00:00");

        let snapshot = clock.snapshot();
        assert_eq!(snapshot.cells, vec![Position::new(5, 5)]);
        assert_eq!(snapshot.food.kind, FoodKind::White);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.speed, 5.0);

        // A stray tick after restart cannot move the idle board
        clock.on_tick();
        assert_eq!(clock.snapshot().cells, vec![Position::new(5, 5)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_locked_while_running() {
        let mut clock = fresh_clock();
        clock.start();

        assert_eq!(clock.adjust_base_speed(1), Err(SessionError::RunInProgress));
        assert_eq!(clock.cycle_board_size(), Err(SessionError::RunInProgress));
        clock.toggle_pause();
        assert_eq!(clock.cycle_background(), Err(SessionError::RunInProgress));
        assert_eq!(clock.config().base_speed, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_apply_between_runs() {
        let mut clock = fresh_clock();

        assert_eq!(clock.adjust_base_speed(3), Ok(8));
        assert_eq!(clock.engine().speed(), 8.0);
        assert_eq!(clock.adjust_base_speed(100), Ok(MAX_BASE_SPEED));
        assert_eq!(clock.adjust_base_speed(-100), Ok(MIN_BASE_SPEED));

        clock.cycle_board_size().unwrap();
        assert_eq!(clock.snapshot().grid_size, 25);

        clock.start();
        assert_eq!(clock.tick_period(), Some(Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_rejected() {
        let mut clock = fresh_clock();
        let config = GameConfig {
            base_speed: 0,
            ..GameConfig::default()
        };

        assert!(matches!(
            clock.reconfigure(config),
            Err(SessionError::InvalidConfig(ConfigError::SpeedOutOfRange(0)))
        ));
    }
}
