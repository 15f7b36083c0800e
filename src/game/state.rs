use anyhow::{Result, bail, ensure};
use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a `width x height` torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A one-cell snake, the shape every round starts with
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Fails on an empty body or on repeated cells.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Result<Self> {
        let mut body = VecDeque::new();
        for pos in segments {
            if body.contains(&pos) {
                bail!("snake segment ({}, {}) appears twice", pos.x, pos.y);
            }
            body.push_back(pos);
        }
        ensure!(!body.is_empty(), "snake needs at least one segment");
        Ok(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Whether any segment, head or tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    pub(crate) fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The head ran into the body
    Collision,
    /// No free cell was left to put food on
    BoardFull,
}

/// Round status; `Over` is terminal until the next reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(EndReason),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub healthy_food: Position,
    pub unhealthy_food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub status: Status,
}

impl GameState {
    /// Create a new running state, checking that every piece is on the grid
    /// and that nothing overlaps
    pub fn new(
        snake: Snake,
        healthy_food: Position,
        unhealthy_food: Position,
        grid_width: usize,
        grid_height: usize,
    ) -> Result<Self> {
        let state = Self {
            snake,
            healthy_food,
            unhealthy_food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            status: Status::Running,
        };

        for pos in state.snake.segments() {
            ensure!(
                state.is_in_bounds(*pos),
                "snake segment ({}, {}) is off the {}x{} grid",
                pos.x,
                pos.y,
                grid_width,
                grid_height
            );
        }
        for (name, food) in [("healthy", healthy_food), ("unhealthy", unhealthy_food)] {
            ensure!(
                state.is_in_bounds(food),
                "{} food ({}, {}) is off the grid",
                name,
                food.x,
                food.y
            );
            ensure!(
                !state.snake.occupies(food),
                "{} food ({}, {}) is under the snake",
                name,
                food.x,
                food.y
            );
        }
        ensure!(
            healthy_food != unhealthy_food,
            "both foods share cell ({}, {})",
            healthy_food.x,
            healthy_food.y
        );

        Ok(state)
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }
}
