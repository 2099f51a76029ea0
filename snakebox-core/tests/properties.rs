//! Property tests for the game engine and grid projection

use proptest::prelude::*;
use snakebox_core::game::{
    Cell, Direction, Engine, Grid, Point, SnakeGame, StepOutcome, XorShift32, BOARD_HEIGHT,
    BOARD_WIDTH, MAX_SNAKE_LEN,
};
use snakebox_core::scheduler::Deadline;
use snakebox_core::RtcTime;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn interior(p: Point) -> bool {
    p.x >= 1 && p.y >= 1 && (p.x as usize) < BOARD_WIDTH - 1 && (p.y as usize) < BOARD_HEIGHT - 1
}

proptest! {
    #[test]
    fn snake_stays_valid(seed in any::<u32>(), moves in prop::collection::vec(direction(), 0..400)) {
        let mut game: SnakeGame<_> = Engine::new(XorShift32::new(seed));
        let mut last_score = 0;

        for d in moves {
            game.set_direction(d);
            let outcome = game.update();
            if outcome.is_game_over() {
                game.setup();
                last_score = 0;
                continue;
            }

            let snake = game.snake();
            prop_assert!(snake.len() >= 3 && snake.len() <= MAX_SNAKE_LEN);
            prop_assert!(snake.iter().all(|p| p.in_bounds(BOARD_WIDTH, BOARD_HEIGHT)));
            for pair in snake.windows(2) {
                prop_assert!(pair[0].is_adjacent(pair[1]) || pair[0] == pair[1]);
            }

            prop_assert!(game.score() >= last_score);
            last_score = game.score();

            prop_assert!(!snake.contains(&game.food()));
            prop_assert!(interior(game.food()));
        }
    }

    #[test]
    fn reversal_never_changes_direction(seed in any::<u32>(), d in direction()) {
        let mut game: SnakeGame<_> = Engine::new(XorShift32::new(seed));
        game.set_direction(d);
        let before = game.direction();
        game.set_direction(before.opposite());
        prop_assert_eq!(game.direction(), before);
    }

    #[test]
    fn eating_adds_exactly_one(seed in any::<u32>(), moves in prop::collection::vec(direction(), 0..300)) {
        let mut game: SnakeGame<_> = Engine::new(XorShift32::new(seed));
        for d in moves {
            game.set_direction(d);
            let score = game.score();
            let len = game.len();
            match game.update() {
                StepOutcome::Ate => {
                    prop_assert_eq!(game.score(), score + 1);
                    prop_assert_eq!(game.len(), (len + 1).min(MAX_SNAKE_LEN));
                }
                StepOutcome::Moved => {
                    prop_assert_eq!(game.score(), score);
                    prop_assert_eq!(game.len(), len);
                }
                StepOutcome::GameOver(_) => {
                    prop_assert_eq!(game.score(), score);
                    prop_assert_eq!(game.len(), len);
                    game.setup();
                }
            }
        }
    }

    #[test]
    fn grid_matches_engine(seed in any::<u32>(), moves in prop::collection::vec(direction(), 0..200)) {
        let mut game: SnakeGame<_> = Engine::new(XorShift32::new(seed));
        let mut grid: Grid<BOARD_WIDTH, BOARD_HEIGHT> = Grid::new();

        for d in moves {
            game.set_direction(d);
            if game.update().is_game_over() {
                game.setup();
            }
        }
        game.to_grid(&mut grid);

        let mut distinct_body = 0;
        for (i, p) in game.snake().iter().enumerate().skip(1) {
            if !game.snake()[1..i].contains(p) && *p != game.head() {
                distinct_body += 1;
            }
        }

        prop_assert_eq!(grid.count(Cell::Head), 1);
        prop_assert_eq!(grid.get(game.head()), Some(Cell::Head));
        prop_assert_eq!(grid.count(Cell::Body), distinct_body);
        prop_assert_eq!(grid.count(Cell::Food), 1);
        prop_assert_eq!(grid.get(game.food()), Some(Cell::Food));
    }

    #[test]
    fn duration_is_within_a_day(
        h1 in 0u8..24, m1 in 0u8..60, s1 in 0u8..60,
        h2 in 0u8..24, m2 in 0u8..60, s2 in 0u8..60,
    ) {
        let start = RtcTime::new(24, 1, 1, h1, m1, s1);
        let end = RtcTime::new(24, 1, 1, h2, m2, s2);
        let elapsed = start.seconds_until(&end);
        prop_assert!(elapsed < 86_400);
        prop_assert_eq!(
            (start.seconds_since_midnight() + elapsed) % 86_400,
            end.seconds_since_midnight()
        );
    }

    #[test]
    fn deadline_due_iff_period_elapsed(start in any::<u32>(), period in 1u32..100_000, offset in 0u32..200_000) {
        let mut d = Deadline::new(period);
        d.arm(start);
        prop_assert_eq!(d.is_due(start.wrapping_add(offset)), offset >= period);
    }
}
