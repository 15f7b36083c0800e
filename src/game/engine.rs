use anyhow::Result;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{EndReason, GameState, Position, Snake, Status},
};

/// Random draws tried before falling back to a scan of the free cells
const PLACEMENT_ATTEMPTS: usize = 64;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// The head ran into the body this tick
    pub collided: bool,
    /// Healthy food was eaten this tick
    pub ate_healthy: bool,
    /// Unhealthy food was eaten this tick
    pub ate_unhealthy: bool,
    /// The round is over (this tick or earlier)
    pub terminated: bool,
}

/// The game engine that handles all game logic
///
/// The engine owns the configuration and the food RNG; the state it mutates
/// belongs to the caller.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round: a one-cell snake in the middle heading right
    pub fn reset(&mut self) -> GameState {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let center = Position::new((width / 2) as i32, (height / 2) as i32);
        let snake = Snake::new(center, Direction::Right);

        let healthy = self.spawn_food(&snake, width, height, None);
        let unhealthy =
            healthy.and_then(|healthy| self.spawn_food(&snake, width, height, Some(healthy)));

        let (healthy_food, unhealthy_food, status) = match (healthy, unhealthy) {
            (Some(healthy), Some(unhealthy)) => (healthy, unhealthy, Status::Running),
            // only reachable on a grid too small for a snake and two foods
            _ => (center, center, Status::Over(EndReason::BoardFull)),
        };

        GameState {
            snake,
            healthy_food,
            unhealthy_food,
            grid_width: width,
            grid_height: height,
            score: 0,
            steps: 0,
            status,
        }
    }

    /// Advance the round by one tick
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult {
                terminated: true,
                ..StepResult::default()
            };
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction)
            .wrapped(state.grid_width, state.grid_height);

        state.steps += 1;

        if state.snake.occupies(new_head) {
            state.status = Status::Over(EndReason::Collision);
            return StepResult {
                collided: true,
                terminated: true,
                ..StepResult::default()
            };
        }

        state.snake.push_head(new_head);

        let mut result = StepResult::default();
        let (width, height) = (state.grid_width, state.grid_height);

        if new_head == state.healthy_food {
            result.ate_healthy = true;
            state.score += 1;

            let healthy =
                self.spawn_food(&state.snake, width, height, Some(state.unhealthy_food));
            let unhealthy = healthy
                .and_then(|healthy| self.spawn_food(&state.snake, width, height, Some(healthy)));
            match (healthy, unhealthy) {
                (Some(healthy), Some(unhealthy)) => {
                    state.healthy_food = healthy;
                    state.unhealthy_food = unhealthy;
                }
                _ => self.end_board_full(state),
            }
        } else {
            if new_head == state.unhealthy_food {
                result.ate_unhealthy = true;
                match self.spawn_food(&state.snake, width, height, Some(state.healthy_food)) {
                    Some(unhealthy) => state.unhealthy_food = unhealthy,
                    None => self.end_board_full(state),
                }
            }
            state.snake.drop_tail();
        }

        result.terminated = !state.is_running();
        result
    }

    fn end_board_full(&self, state: &mut GameState) {
        warn!(
            "no free cell left for food on the {}x{} grid, ending round at score {}",
            state.grid_width, state.grid_height, state.score
        );
        state.status = Status::Over(EndReason::BoardFull);
    }

    /// Pick a random cell that is neither under the snake nor on `avoid`
    ///
    /// Tries uniform draws first and scans the grid when those keep landing
    /// on occupied cells. `None` means the grid has no free cell.
    fn spawn_food(
        &mut self,
        snake: &Snake,
        width: usize,
        height: usize,
        avoid: Option<Position>,
    ) -> Option<Position> {
        let is_free = |pos: Position| !snake.occupies(pos) && Some(pos) != avoid;

        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if is_free(pos) {
                return Some(pos);
            }
        }

        debug!(
            "food placement fell back to a scan with {} of {} cells taken",
            snake.len(),
            width * height
        );
        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|&pos| is_free(pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
