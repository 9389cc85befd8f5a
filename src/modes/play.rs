use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::clock::GameClock;
use crate::input::{InputHandler, KeyAction};
use crate::render::{Hud, Renderer};

/// Interactive play in the terminal
pub struct PlayMode {
    clock: GameClock,
    renderer: Renderer,
    input_handler: InputHandler,
    notice: Option<String>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(clock: GameClock) -> Self {
        Self {
            clock,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            notice: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Simulation tick or play-time refresh
                event = self.clock.next_event() => {
                    self.clock.handle(event);
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.clock.snapshot();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quitting after {} games", self.clock.metrics().games_played);
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        let settings = match action {
            KeyAction::Steer(direction) => {
                self.clock.steer(direction);
                return;
            }
            KeyAction::Start => {
                self.notice = None;
                self.clock.start();
                return;
            }
            KeyAction::TogglePause => {
                self.clock.toggle_pause();
                return;
            }
            KeyAction::Restart => {
                self.notice = None;
                self.clock.restart();
                return;
            }
            KeyAction::Quit => {
                self.should_quit = true;
                return;
            }
            KeyAction::None => return,
            KeyAction::SpeedUp => self.clock.adjust_base_speed(1).map(|_| ()),
            KeyAction::SpeedDown => self.clock.adjust_base_speed(-1).map(|_| ()),
            KeyAction::CycleBoardSize => self.clock.cycle_board_size(),
            KeyAction::CycleBackground => self.clock.cycle_background(),
        };

        self.notice = settings.err().map(|err| err.to_string());
    }

    fn hud(&self) -> Hud {
        Hud {
            elapsed: self.clock.elapsed_text(),
            games_played: self.clock.metrics().games_played,
            config: self.clock.config().clone(),
            notice: self.notice.clone(),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine, GamePhase};
    use crate::store::MemoryStore;

    fn mode() -> PlayMode {
        let engine = GameEngine::with_seed(GameConfig::default(), 8);
        PlayMode::new(GameClock::with_engine(engine, Box::new(MemoryStore::default())))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_steer() {
        let mut mode = mode();
        mode.apply(KeyAction::Start);
        assert_eq!(mode.clock.phase(), GamePhase::Running);

        mode.apply(KeyAction::Steer(Direction::Up));
        assert_eq!(
            mode.clock.engine().state().pending_direction,
            Some(Direction::Up)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_rejected_mid_run_leave_notice() {
        let mut mode = mode();
        mode.apply(KeyAction::Start);
        mode.apply(KeyAction::SpeedUp);

        assert_eq!(
            mode.notice.as_deref(),
            Some("settings are locked while a game is running")
        );
        assert_eq!(mode.clock.config().base_speed, 5);

        mode.apply(KeyAction::Restart);
        assert!(mode.notice.is_none());
        mode.apply(KeyAction::SpeedUp);
        assert_eq!(mode.clock.config().base_speed, 6);
        assert_eq!(mode.hud().config.base_speed, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit() {
        let mut mode = mode();
        mode.apply(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
