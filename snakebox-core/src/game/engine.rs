//! Game engine state and stepping

use heapless::Vec;

use super::board::{Direction, Point};
use super::rng::RandomSource;

/// Console board width in cells
pub const BOARD_WIDTH: usize = 20;

/// Console board height in cells
pub const BOARD_HEIGHT: usize = 20;

/// Maximum snake length on the console
pub const MAX_SNAKE_LEN: usize = 100;

/// Snake length after `setup`
pub const INITIAL_LENGTH: usize = 3;

/// Random placement attempts before falling back to a scan
const FOOD_ATTEMPTS: u8 = 32;

/// The engine as configured for the console's 20x20 board
pub type SnakeGame<R> = Engine<R, BOARD_WIDTH, BOARD_HEIGHT, MAX_SNAKE_LEN>;

/// What ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Collision {
    /// Head left the board
    Wall,
    /// Head ran into the snake's own body
    Body,
}

/// Result of one engine step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Snake advanced one cell
    Moved,
    /// Snake advanced onto the food and scored
    Ate,
    /// Move was illegal; the session is over until `setup` is called
    GameOver(Collision),
}

impl StepOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, StepOutcome::GameOver(_))
    }

    pub fn ate(&self) -> bool {
        matches!(self, StepOutcome::Ate)
    }
}

/// One game session on a `W` x `H` board with at most `N` snake cells
///
/// Owns the snake, food, direction, score, and the random source used for
/// food placement. Index 0 of the body is the head.
#[derive(Debug, Clone)]
pub struct Engine<R, const W: usize, const H: usize, const N: usize> {
    rng: R,
    body: Vec<Point, N>,
    food: Point,
    direction: Direction,
    score: u16,
    collision: Option<Collision>,
}

impl<R: RandomSource, const W: usize, const H: usize, const N: usize> Engine<R, W, H, N> {
    const DIMENSIONS_OK: () = assert!(
        W >= 3 && H >= 3 && W <= i16::MAX as usize && H <= i16::MAX as usize && N >= INITIAL_LENGTH,
        "board must be at least 3x3 and hold the initial snake"
    );

    /// Create an engine with a fresh session
    pub fn new(rng: R) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::DIMENSIONS_OK;

        let mut engine = Self {
            rng,
            body: Vec::new(),
            food: Point::default(),
            direction: Direction::Right,
            score: 0,
            collision: None,
        };
        engine.setup();
        engine
    }

    /// Start a new session
    ///
    /// Places a 3-cell snake horizontally through the board centre, heading
    /// right, and drops food on a free non-border cell.
    pub fn setup(&mut self) {
        self.score = 0;
        self.direction = Direction::Right;
        self.collision = None;

        let head_x = (W / 2).max(INITIAL_LENGTH - 1) as i16;
        let head_y = (H / 2) as i16;

        self.body.clear();
        for i in 0..INITIAL_LENGTH as i16 {
            // Capacity is checked by DIMENSIONS_OK
            let _ = self.body.push(Point::new(head_x - i, head_y));
        }

        self.place_food();
    }

    /// Change heading, ignoring an exact reversal
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Advance the snake one cell
    ///
    /// Wall and body collisions end the session and leave the snake and
    /// score untouched. Further calls keep reporting the same collision
    /// until `setup` is called.
    pub fn update(&mut self) -> StepOutcome {
        if let Some(collision) = self.collision {
            return StepOutcome::GameOver(collision);
        }

        let new_head = self.head().step(self.direction);

        if !new_head.in_bounds(W, H) {
            return self.end(Collision::Wall);
        }

        if self.body.contains(&new_head) {
            return self.end(Collision::Body);
        }

        let ate_food = new_head == self.food;

        let len = self.body.len();
        for i in (1..len).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = new_head;

        if !ate_food {
            return StepOutcome::Moved;
        }

        if len < N {
            // New tail overlaps the old one until the next move
            let tail = self.body[len - 1];
            let _ = self.body.push(tail);
        }
        self.score = self.score.saturating_add(1);
        self.place_food();

        StepOutcome::Ate
    }

    fn end(&mut self, collision: Collision) -> StepOutcome {
        self.collision = Some(collision);
        StepOutcome::GameOver(collision)
    }

    /// Drop food on a free non-border cell
    ///
    /// Tries random cells first, then scans the interior, then the whole
    /// board. On a completely full board the food stays where it was.
    fn place_food(&mut self) {
        for _ in 0..FOOD_ATTEMPTS {
            let x = (self.rng.next_u32() % (W as u32 - 2)) as i16 + 1;
            let y = (self.rng.next_u32() % (H as u32 - 2)) as i16 + 1;
            let candidate = Point::new(x, y);
            if !self.body.contains(&candidate) {
                self.food = candidate;
                return;
            }
        }

        if let Some(free) = self.first_free_cell(1, W - 1, 1, H - 1) {
            self.food = free;
        } else if let Some(free) = self.first_free_cell(0, W, 0, H) {
            self.food = free;
        }
    }

    fn first_free_cell(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> Option<Point> {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| Point::new(x as i16, y as i16)))
            .find(|p| !self.body.contains(p))
    }

    /// Current score (foods eaten this session)
    pub fn score(&self) -> u16 {
        self.score
    }

    /// Snake cells, head first
    pub fn snake(&self) -> &[Point] {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if the session can still advance
    pub fn is_alive(&self) -> bool {
        self.collision.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of values, then repeats the last one
    struct Scripted {
        values: &'static [u32],
        index: usize,
    }

    impl Scripted {
        fn new(values: &'static [u32]) -> Self {
            Self { values, index: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.index.min(self.values.len() - 1)];
            self.index += 1;
            value
        }
    }

    // Food lands at (r % 18 + 1, r % 18 + 1) on the console board
    const fn food_at(x: u32, y: u32) -> [u32; 2] {
        [x - 1, y - 1]
    }

    #[test]
    fn test_setup_layout() {
        let game: SnakeGame<_> = Engine::new(Scripted::new(&[0]));
        assert_eq!(
            game.snake(),
            &[Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert!(game.is_alive());
        assert_eq!(game.food(), Point::new(1, 1));
    }

    #[test]
    fn test_moves_right() {
        let mut game: SnakeGame<_> = Engine::new(Scripted::new(&[0]));
        assert_eq!(game.update(), StepOutcome::Moved);
        assert_eq!(
            game.snake(),
            &[Point::new(11, 10), Point::new(10, 10), Point::new(9, 10)]
        );
    }

    #[test]
    fn test_reverse_is_ignored() {
        let mut game: SnakeGame<_> = Engine::new(Scripted::new(&[0]));
        game.set_direction(Direction::Left);
        assert_eq!(game.direction(), Direction::Right);

        game.set_direction(Direction::Up);
        assert_eq!(game.direction(), Direction::Up);
        game.set_direction(Direction::Down);
        assert_eq!(game.direction(), Direction::Up);
    }

    #[test]
    fn test_wall_collision() {
        let mut game: SnakeGame<_> = Engine::new(Scripted::new(&[0]));
        // Head starts at x=10; x=19 is the last legal column
        for _ in 0..9 {
            assert!(!game.update().is_game_over());
        }
        let before: Vec<Point, MAX_SNAKE_LEN> = Vec::from_slice(game.snake()).unwrap();
        assert_eq!(game.update(), StepOutcome::GameOver(Collision::Wall));
        assert_eq!(game.snake(), &before[..]);
        assert!(!game.is_alive());

        // Stays over until setup
        assert_eq!(game.update(), StepOutcome::GameOver(Collision::Wall));
        game.setup();
        assert!(game.is_alive());
        assert_eq!(game.head(), Point::new(10, 10));
    }

    #[test]
    fn test_eat_grows_and_scores() {
        // First placement at (11,10), right in front of the head,
        // then (1,1) for the relocated food
        let script: &'static [u32] = &[10, 9, 0];
        let mut game: SnakeGame<_> = Engine::new(Scripted::new(script));
        assert_eq!(game.food(), Point::new(11, 10));

        assert_eq!(game.update(), StepOutcome::Ate);
        assert_eq!(game.score(), 1);
        assert_eq!(game.len(), 4);
        assert_eq!(
            game.snake(),
            &[
                Point::new(11, 10),
                Point::new(10, 10),
                Point::new(9, 10),
                Point::new(9, 10)
            ]
        );
        assert_eq!(game.food(), Point::new(1, 1));

        // Duplicate tail separates on the next move
        assert_eq!(game.update(), StepOutcome::Moved);
        assert_eq!(
            game.snake(),
            &[
                Point::new(12, 10),
                Point::new(11, 10),
                Point::new(10, 10),
                Point::new(9, 10)
            ]
        );
    }

    #[test]
    fn test_food_never_placed_on_snake() {
        // Every random attempt hits the head at (10,10); the interior scan
        // then finds (1,1)
        const ON_HEAD: [u32; 2] = food_at(10, 10);
        let mut game: SnakeGame<_> = Engine::new(Scripted::new(&ON_HEAD));
        game.place_food();
        assert_eq!(game.food(), Point::new(1, 1));
    }

    #[test]
    fn test_self_collision() {
        // 5-cell snake curled so that turning into it is legal
        let mut game: Engine<_, 10, 10, 16> = Engine::new(Scripted::new(&[0]));
        game.body.clear();
        for p in [
            Point::new(5, 5),
            Point::new(4, 5),
            Point::new(4, 6),
            Point::new(5, 6),
            Point::new(6, 6),
        ] {
            game.body.push(p).unwrap();
        }
        game.set_direction(Direction::Down);
        assert_eq!(game.update(), StepOutcome::GameOver(Collision::Body));
        assert_eq!(game.len(), 5);
    }

    #[test]
    fn test_length_clamped_at_max_score_keeps_counting() {
        // Food always lands on (1,1) or the next free cell
        let mut game: Engine<_, 10, 10, 4> = Engine::new(Scripted::new(&[0]));
        game.food = game.head().step(Direction::Right);
        assert_eq!(game.update(), StepOutcome::Ate);
        assert_eq!(game.len(), 4);

        game.food = game.head().step(Direction::Right);
        assert_eq!(game.update(), StepOutcome::Ate);
        assert_eq!(game.len(), 4);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_tiny_board() {
        let mut game: Engine<_, 3, 3, 9> = Engine::new(Scripted::new(&[0]));
        assert_eq!(
            game.snake(),
            &[Point::new(2, 1), Point::new(1, 1), Point::new(0, 1)]
        );
        // Only interior cell is taken, so food goes to the first free cell
        assert_eq!(game.food(), Point::new(0, 0));
        assert_eq!(game.update(), StepOutcome::GameOver(Collision::Wall));
    }
}
