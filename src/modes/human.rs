use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEvent, GameSession, SessionState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{FruitPulse, Renderer};

/// Render at roughly 60 FPS; the simulation keeps its own fixed tick
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode {
    session: GameSession,
    pulse: FruitPulse,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let pulse = FruitPulse::new(config.pulse_duration());
        let session = match seed {
            Some(seed) => GameSession::with_seed(config, seed),
            None => GameSession::new(config),
        }
        .context("Failed to create game session")?;

        Ok(Self {
            session,
            pulse,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();
        let mut needs_draw = true;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                        needs_draw = true;
                    }
                }

                // One frame: simulation catch-up, animation, then a single draw
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let delta = now - last_frame;
                    last_frame = now;

                    let animating = self.pulse.is_active();
                    let changed = self.frame(delta)?;

                    // Idle with nothing animating: stop drawing until something happens
                    if needs_draw || changed || self.session.wants_frames(animating) {
                        terminal.draw(|frame| {
                            self.renderer.render(frame, &self.session.scene(), &self.pulse, &self.metrics);
                        }).context("Failed to draw frame")?;
                        needs_draw = false;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            self.handle_key(key)?;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.session.request_direction(direction);
            }
            KeyAction::Start => {
                self.pulse.cancel();
                let events = self
                    .session
                    .start()
                    .context("Failed to start a new game")?;
                self.apply_events(&events);
            }
            KeyAction::TogglePause => {
                self.session.toggle_pause();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(())
    }

    /// Advance simulation and animation by one frame; returns true if
    /// anything visible changed
    fn frame(&mut self, delta: Duration) -> Result<bool> {
        if self.session.state() == SessionState::Running {
            self.metrics.update(delta);
        }

        let mut events = self
            .session
            .advance(delta)
            .context("Game session failed")?;

        if self.pulse.update(delta) {
            let respawned = self
                .session
                .complete_fruit_pulse()
                .context("Failed to move the fruit")?;
            events.extend(respawned);
        }

        self.apply_events(&events);
        Ok(!events.is_empty())
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.metrics.on_event(event);

            match event {
                GameEvent::FruitEaten { cell, color } => self.pulse.start(*cell, *color),
                GameEvent::GameOver { final_score } => {
                    info!("Game over, final score {}", final_score);
                }
                _ => {}
            }
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
    use crate::game::{Cell, Direction};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(mode: &mut HumanMode, code: KeyCode) {
        mode.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn started() -> HumanMode {
        let mut mode = HumanMode::new(GameConfig::default(), Some(11)).unwrap();
        press(&mut mode, KeyCode::Enter);
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();
        assert_eq!(mode.session.state(), SessionState::Idle);
        assert_eq!(mode.session.score(), 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_start_and_pause_keys() {
        let mut mode = started();
        assert_eq!(mode.session.state(), SessionState::Running);

        press(&mut mode, KeyCode::Char(' '));
        assert_eq!(mode.session.state(), SessionState::Paused);
        press(&mut mode, KeyCode::Char(' '));
        assert_eq!(mode.session.state(), SessionState::Running);
    }

    #[test]
    fn test_steering_keys() {
        let mut mode = started();
        press(&mut mode, KeyCode::Up);
        assert_eq!(mode.session.direction(), Direction::Forward);

        // Reversal is dropped by the session
        press(&mut mode, KeyCode::Down);
        assert_eq!(mode.session.direction(), Direction::Forward);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = started();
        press(&mut mode, KeyCode::Char('q'));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_eating_starts_pulse_and_respawns_after_it() {
        let mut mode = started();
        assert!(mode.session.place_fruit(Cell::new(210, 200)));

        assert!(mode.frame(Duration::from_millis(160)).unwrap());
        assert_eq!(mode.session.score(), 1);
        assert!(mode.pulse.is_active());
        assert!(mode.session.is_respawn_pending());
        assert_eq!(mode.metrics.fruit_eaten, 1);

        mode.frame(Duration::from_millis(100)).unwrap();
        assert!(mode.session.is_respawn_pending());

        mode.frame(Duration::from_millis(60)).unwrap();
        assert!(!mode.pulse.is_active());
        assert!(!mode.session.is_respawn_pending());
        assert!(!mode.session.snake().occupies(mode.session.fruit().cell));
    }

    #[test]
    fn test_restart_cancels_pulse() {
        let mut mode = started();
        assert!(mode.session.place_fruit(Cell::new(210, 200)));
        mode.frame(Duration::from_millis(160)).unwrap();
        assert!(mode.pulse.is_active());

        press(&mut mode, KeyCode::Enter);
        assert!(!mode.pulse.is_active());
        assert_eq!(mode.session.score(), 0);
        assert_eq!(mode.metrics.elapsed_time, Duration::ZERO);
    }

    #[test]
    fn test_paused_frame_changes_nothing() {
        let mut mode = started();
        press(&mut mode, KeyCode::Char('p'));

        let head = mode.session.snake().head().cell;
        assert!(!mode.frame(Duration::from_secs(2)).unwrap());
        assert_eq!(mode.session.snake().head().cell, head);
        assert_eq!(mode.metrics.elapsed_time, Duration::ZERO);
    }
}
