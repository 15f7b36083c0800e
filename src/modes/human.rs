use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{Interval, MissedTickBehavior, interval, interval_at};

use crate::audio::{SoundSink, open_sound};
use crate::game::{Action, GameConfig, GameEngine, GameState, Status};
use crate::input::{InputHandler, KeyAction, PendingTurn};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Screen};

/// Render at ~30 FPS, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Countdown { started: Instant },
    Playing,
    GameOver { since: Instant },
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sound: Box<dyn SoundSink>,
    phase: Phase,
    pending_turn: PendingTurn,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let sound = open_sound(config.sound);
        Self::with_sound(config, sound)
    }

    /// Same as [`HumanMode::new`] with an explicit sound sink
    pub fn with_sound(config: GameConfig, sound: Box<dyn SoundSink>) -> Result<Self> {
        info!("starting with {:?}", config);
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sound,
            phase: Phase::Countdown {
                started: Instant::now(),
            },
            pending_turn: PendingTurn::default(),
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

        info!(
            "leaving after {} games, high score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_period = self.tick_period();
        let mut tick_timer = tick_interval(tick_period);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

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

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.advance_phase(Instant::now()) {
                        // the round just started, first move one full tick from now
                        tick_period = self.tick_period();
                        tick_timer = tick_interval(tick_period);
                    }
                    self.metrics.update();

                    let screen = self.screen(Instant::now());
                    let tick_rate = self.engine.config().tick_rate(self.state.score);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, screen, &self.state, &self.metrics, tick_rate);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Speed follows the score
            let period = self.tick_period();
            if period != tick_period {
                debug!("tick period now {:?} at score {}", period, self.state.score);
                tick_period = period;
                tick_timer = tick_interval(tick_period);
            }
        }

        Ok(())
    }

    fn tick_period(&self) -> Duration {
        self.engine.config().tick_interval(self.state.score)
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind == KeyEventKind::Press {
                self.handle_key(key, Instant::now());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::GameAction(Action::Move(direction)) => {
                if self.phase == Phase::Playing {
                    self.pending_turn
                        .request(self.state.snake.direction, direction);
                }
            }
            KeyAction::Restart => {
                if self.accepting_game_over_input(now) {
                    self.reset_game(now);
                }
            }
            KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
        }
    }

    /// Move from the countdown to play once it runs out
    ///
    /// Returns true when the round starts on this call.
    fn advance_phase(&mut self, now: Instant) -> bool {
        if let Phase::Countdown { started } = self.phase {
            if now.saturating_duration_since(started) >= self.engine.config().countdown() {
                self.phase = Phase::Playing;
                self.pending_turn.clear();
                self.metrics.on_round_start();
                info!("round started");
                return true;
            }
        }
        false
    }

    fn update_game(&mut self, now: Instant) {
        if self.phase != Phase::Playing {
            return;
        }

        let action = self.pending_turn.take();
        let result = self.engine.step(&mut self.state, action);

        if result.ate_healthy {
            debug!(
                "ate healthy food, score {} length {}",
                self.state.score,
                self.state.snake.len()
            );
            self.sound.play_eat();
        } else if result.ate_unhealthy {
            debug!("ate unhealthy food at {:?}", self.state.snake.head());
        }

        if result.terminated {
            if let Status::Over(reason) = self.state.status {
                info!(
                    "game over ({:?}) with score {} after {} steps",
                    reason, self.state.score, self.state.steps
                );
            }
            self.metrics.on_game_over(&self.state);
            self.phase = Phase::GameOver { since: now };
        }
    }

    fn accepting_game_over_input(&self, now: Instant) -> bool {
        match self.phase {
            Phase::GameOver { since } => {
                now.saturating_duration_since(since) >= self.engine.config().game_over_pause()
            }
            _ => false,
        }
    }

    fn screen(&self, now: Instant) -> Screen {
        match self.phase {
            Phase::Countdown { started } => {
                let left = self
                    .engine
                    .config()
                    .countdown()
                    .saturating_sub(now.saturating_duration_since(started));
                Screen::Countdown(left.as_millis().div_ceil(1000) as u64)
            }
            Phase::Playing => Screen::Playing,
            Phase::GameOver { .. } => Screen::GameOver {
                accepting_input: self.accepting_game_over_input(now),
            },
        }
    }

    fn reset_game(&mut self, now: Instant) {
        self.state = self.engine.reset();
        self.pending_turn.clear();
        self.phase = Phase::Countdown { started: now };
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

/// Interval whose first tick is one full period away
fn tick_interval(period: Duration) -> Interval {
    let mut timer = interval_at(tokio::time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
