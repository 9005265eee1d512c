use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::board::Board;
use crate::game::piece::{center, Piece, Shape, ShapeCatalog, ShapeInfo};
use crate::game::score::line_clear_points;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Ready,
    Running,
    Paused,
    GameOver,
}

/// What a gravity tick or a finished row clear did.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// Nothing happened: the game is not running or is waiting on a row clear.
    Idle,
    /// The current piece moved down one row.
    Fell,
    /// The piece locked and these rows are full. The caller must call
    /// [`Game::complete_clear`] once the clear delay has passed.
    Clearing(Vec<usize>),
    /// The preview piece became the current piece.
    Spawned,
    GameOver,
}

enum Axis {
    X,
    Y,
}

pub struct Game {
    config: GameConfig,
    catalog: ShapeCatalog,
    board: Board,
    current: Piece,
    preview: Piece,
    score: u32,
    state: GameState,
    clearing: Option<Vec<usize>>,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let catalog = ShapeCatalog::new();
        let preview = Piece::random(&catalog, &mut rng, config.colors);
        let mut game = Self {
            board: Board::new(config.width, config.height),
            current: preview,
            preview,
            score: 0,
            state: GameState::Ready,
            clearing: None,
            catalog,
            config,
            rng,
        };
        game.reset();
        game
    }

    /// Starts over with an empty board. The piece that was in the preview
    /// becomes the first piece of the new game.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.width, self.config.height);
        self.current = self.preview;
        self.preview = self.random_piece();
        self.place_at_spawn();
        self.score = 0;
        self.state = GameState::Ready;
        self.clearing = None;
    }

    pub fn start(&mut self) -> bool {
        if self.state != GameState::Ready {
            return false;
        }
        self.state = GameState::Running;
        info!(width = self.config.width, height = self.config.height, "game started");
        true
    }

    pub fn restart(&mut self) {
        info!(score = self.score, "restarting game");
        self.reset();
        self.start();
    }

    pub fn pause(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        self.state = GameState::Paused;
        info!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.state = GameState::Running;
        info!("resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            GameState::Running => self.pause(),
            GameState::Paused => self.resume(),
            _ => false,
        }
    }

    /// One step of gravity: move down, or lock the piece if it cannot fall.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.accepts_moves() {
            return TickOutcome::Idle;
        }
        if self.soft_drop() {
            return TickOutcome::Fell;
        }
        self.lock_piece()
    }

    /// Finishes the lock that reported [`TickOutcome::Clearing`].
    ///
    /// Runs regardless of pause. Returns `Idle` when no clear is pending, so
    /// a completion that outlived a restart does nothing.
    pub fn complete_clear(&mut self) -> TickOutcome {
        match self.clearing.take() {
            Some(rows) => self.finish_lock(rows.len()),
            None => TickOutcome::Idle,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.accepts_moves() && self.try_put(self.current.info, -1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.accepts_moves() && self.try_put(self.current.info, 1, 0)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.accepts_moves() && self.try_put(self.current.info, 0, 1)
    }

    /// Drops the piece as far as it goes and returns how many rows it fell.
    /// Locking is left to the next gravity tick.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.soft_drop() {
            rows += 1;
        }
        rows
    }

    /// Turns the piece clockwise, shifting it if it does not fit in place.
    pub fn rotate(&mut self) -> bool {
        if !self.accepts_moves() {
            return false;
        }
        let next_info = self.current.info.rotated();
        let next = *self.catalog.shape(next_info);
        let relative_x = (self.current.shape.width() - next.width()) / 2;

        self.try_put(next_info, relative_x, 0)
            || (relative_x < 0 && self.try_put(next_info, 0, 0))
            || self.retry_rotate(Axis::X, next_info, &next)
            || self.retry_rotate(Axis::Y, next_info, &next)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn preview(&self) -> &Piece {
        &self.preview
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// Rows waiting to be removed, if a clear is pending.
    pub fn clearing_rows(&self) -> Option<&[usize]> {
        self.clearing.as_deref()
    }

    /// Whether the current piece is shown as part of the play field. A
    /// locked piece already lives on the board while its rows are cleared.
    pub fn shows_current(&self) -> bool {
        self.clearing.is_none()
    }

    fn accepts_moves(&self) -> bool {
        self.state == GameState::Running && self.clearing.is_none()
    }

    fn random_piece(&mut self) -> Piece {
        Piece::random(&self.catalog, &mut self.rng, self.config.colors)
    }

    fn place_at_spawn(&mut self) {
        self.current.x = center(self.config.width as i32, self.current.shape.width());
        self.current.y = 0;
    }

    fn try_put(&mut self, info: ShapeInfo, dx: i32, dy: i32) -> bool {
        let shape = *self.catalog.shape(info);
        let (x, y) = (self.current.x + dx, self.current.y + dy);
        if !self.board.can_put(&shape, x, y) {
            return false;
        }
        self.current.info = info;
        self.current.shape = shape;
        self.current.x = x;
        self.current.y = y;
        true
    }

    // Slides the rotated shape away from the wall one cell at a time, as long
    // as the unrotated piece would still fit at the same offset.
    fn retry_rotate(&mut self, axis: Axis, next_info: ShapeInfo, next: &Shape) -> bool {
        let current = self.current.shape;
        let tries = match axis {
            Axis::X => (next.width() - current.width()).abs(),
            Axis::Y => (next.height() - current.height()).abs(),
        };
        let (step_x, step_y) = match axis {
            Axis::X => (-1, 0),
            Axis::Y => (0, -1),
        };

        let (mut dx, mut dy) = (step_x, step_y);
        for _ in 0..tries {
            if !self.board.can_put(&current, self.current.x + dx, self.current.y + dy) {
                break;
            }
            if self.try_put(next_info, dx, dy) {
                return true;
            }
            dx += step_x;
            dy += step_y;
        }
        false
    }

    fn lock_piece(&mut self) -> TickOutcome {
        let piece = self.current;
        self.board.add_shape(&piece.shape, piece.x, piece.y, piece.color);
        let rows = self.board.find_full_rows();
        debug!(x = piece.x, y = piece.y, shape = piece.info.shape_type, rows = rows.len(), "piece locked");

        if rows.is_empty() {
            return self.finish_lock(0);
        }
        self.clearing = Some(rows.clone());
        TickOutcome::Clearing(rows)
    }

    fn finish_lock(&mut self, rows: usize) -> TickOutcome {
        if rows > 0 {
            self.score += line_clear_points(rows);
            debug!(rows, score = self.score, "rows cleared");
        }
        self.board.remove_full_rows();
        self.spawn_next()
    }

    fn spawn_next(&mut self) -> TickOutcome {
        self.current = self.preview;
        self.preview = self.random_piece();
        self.place_at_spawn();

        if self.board.can_put(&self.current.shape, self.current.x, 0) {
            return TickOutcome::Spawned;
        }

        self.current.y = self.reveal_offset();
        self.state = GameState::GameOver;
        info!(score = self.score, "game over");
        TickOutcome::GameOver
    }

    // How far above the board a piece that cannot spawn is drawn: the first
    // offset at which its visible rows fit, or fully hidden.
    fn reveal_offset(&self) -> i32 {
        let shape = &self.current.shape;
        (1..shape.height())
            .find(|&start_y| self.board.can_put_part(shape, self.current.x, -start_y, start_y))
            .map(|start_y| -start_y)
            .unwrap_or(-shape.height())
    }
}
