//! Property-based tests for the tick rule.
//!
//! Random seeds, grid sizes and input sequences are driven through the
//! engine; every tick is checked against the movement, growth and food
//! placement rules.

use proptest::prelude::*;

use healthy_snake::game::{
    Action, Direction, EndReason, GameConfig, GameEngine, GameState, Position, Snake, Status,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Continue),
        3 => direction().prop_map(Action::Move),
    ]
}

fn engine(width: usize, height: usize, seed: u64) -> GameEngine {
    GameEngine::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::new(width, height)
    })
    .unwrap()
}

fn foods_are_valid(state: &GameState) -> bool {
    state.is_in_bounds(state.healthy_food)
        && state.is_in_bounds(state.unhealthy_food)
        && state.healthy_food != state.unhealthy_food
        && !state.snake.occupies(state.healthy_food)
        && !state.snake.occupies(state.unhealthy_food)
}

fn has_unique_segments(state: &GameState) -> bool {
    let mut seen = std::collections::HashSet::new();
    state.snake.segments().all(|pos| seen.insert(*pos))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every tick of a random game obeys the tick rule.
    #[test]
    fn prop_tick_rule_holds(
        width in 2usize..12,
        height in 2usize..12,
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let mut engine = engine(width, height, seed);
        let mut state = engine.reset();
        prop_assert!(foods_are_valid(&state));

        for action in actions {
            let before = state.clone();
            let result = engine.step(&mut state, action);

            if !before.is_running() {
                prop_assert_eq!(&state, &before);
                prop_assert!(result.terminated);
                continue;
            }

            let expected_direction = match action {
                Action::Move(dir) if !before.snake.direction.is_opposite(dir) => dir,
                _ => before.snake.direction,
            };
            prop_assert_eq!(state.snake.direction, expected_direction);

            let (dx, dy) = expected_direction.delta();
            let head = before.snake.head();
            let expected_head = Position::new(
                (head.x + dx).rem_euclid(width as i32),
                (head.y + dy).rem_euclid(height as i32),
            );

            if result.collided {
                prop_assert!(before.snake.occupies(expected_head));
                prop_assert_eq!(state.status, Status::Over(EndReason::Collision));
                prop_assert_eq!(&state.snake, &before.snake);
                continue;
            }

            prop_assert_eq!(state.snake.head(), expected_head);
            prop_assert!(state.is_in_bounds(state.snake.head()));
            prop_assert!(has_unique_segments(&state));

            if result.ate_healthy {
                prop_assert_eq!(state.snake.len(), before.snake.len() + 1);
                prop_assert_eq!(state.score, before.score + 1);
            } else {
                prop_assert_eq!(state.snake.len(), before.snake.len());
                prop_assert_eq!(state.score, before.score);
            }

            if state.is_running() {
                prop_assert!(foods_are_valid(&state));
                if !result.ate_healthy {
                    prop_assert_eq!(state.healthy_food, before.healthy_food);
                }
                if !result.ate_healthy && !result.ate_unhealthy {
                    prop_assert_eq!(state.unhealthy_food, before.unhealthy_food);
                }
            } else {
                prop_assert_eq!(state.status, Status::Over(EndReason::BoardFull));
            }
        }
    }

    /// Asking for the opposite heading never changes it.
    #[test]
    fn prop_reversal_is_ignored(
        seed in any::<u64>(),
        heading in direction(),
    ) {
        let mut engine = engine(30, 20, seed);
        let mut state = engine.reset();
        state.snake.direction = heading;

        engine.step(&mut state, Action::Move(heading.opposite()));

        prop_assert_eq!(state.snake.direction, heading);
    }
}

fn snake(cells: &[(i32, i32)], direction: Direction) -> Snake {
    Snake::from_segments(cells.iter().map(|&(x, y)| Position::new(x, y)), direction).unwrap()
}

#[test]
fn start_then_one_tick() {
    let mut engine = engine(30, 20, 99);
    let mut state = engine.reset();
    assert_eq!(state.snake.head(), Position::new(15, 10));
    // keep the first move clear of food
    state.healthy_food = Position::new(0, 0);
    state.unhealthy_food = Position::new(0, 1);

    engine.step(&mut state, Action::Continue);

    let body: Vec<_> = state.snake.segments().copied().collect();
    assert_eq!(body, vec![Position::new(16, 10)]);
    assert_eq!(state.score, 0);
    assert_eq!(state.status, Status::Running);
}

#[test]
fn healthy_food_grows_snake() {
    let mut engine = engine(30, 20, 5);
    let mut state = GameState::new(
        snake(&[(5, 5), (4, 5)], Direction::Right),
        Position::new(6, 5),
        Position::new(0, 0),
        30,
        20,
    )
    .unwrap();

    let result = engine.step(&mut state, Action::Continue);

    assert!(result.ate_healthy);
    let body: Vec<_> = state.snake.segments().copied().collect();
    assert_eq!(
        body,
        vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
    );
    assert_eq!(state.score, 1);
    assert!(!body.contains(&state.healthy_food));
}

#[test]
fn duplicate_segments_are_rejected() {
    let result = Snake::from_segments([Position::new(3, 3), Position::new(3, 3)], Direction::Up);
    assert!(result.is_err());
}

#[test]
fn plain_move_keeps_length() {
    let mut engine = engine(30, 20, 5);
    let mut state = GameState::new(
        snake(&[(3, 1), (2, 1), (1, 1)], Direction::Right),
        Position::new(10, 10),
        Position::new(11, 10),
        30,
        20,
    )
    .unwrap();

    engine.step(&mut state, Action::Continue);

    assert_eq!(state.snake.len(), 3);
    assert!(!state.snake.occupies(Position::new(1, 1)));
    assert_eq!(state.snake.head(), Position::new(4, 1));
}

#[test]
fn game_over_is_terminal() {
    let mut engine = engine(10, 10, 3);
    let mut state = GameState::new(
        snake(&[(1, 2), (2, 2), (2, 1), (1, 1)], Direction::Left),
        Position::new(8, 8),
        Position::new(9, 9),
        10,
        10,
    )
    .unwrap();

    let result = engine.step(&mut state, Action::Move(Direction::Up));
    assert!(result.collided);

    let frozen = state.clone();
    for dir in [Direction::Down, Direction::Left, Direction::Right] {
        let result = engine.step(&mut state, Action::Move(dir));
        assert!(result.terminated);
        assert!(!result.collided);
        assert_eq!(state, frozen);
    }
}
