use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    food::{Food, FoodKind, SpawnTable},
    snapshot::RenderSnapshot,
    state::{EndReason, GamePhase, GameState, Position, Snake},
};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOver {
    pub reason: EndReason,
    pub final_score: u32,
    /// The final score beat the previous high score
    pub new_high_score: bool,
}

/// Result of a game tick
///
/// `speed_changed` is the engine's request to the scheduler to re-arm its
/// tick timer at the new rate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickResult {
    /// Kind of food eaten this tick
    pub ate: Option<FoodKind>,
    /// New speed in ticks per second
    pub speed_changed: Option<f64>,
    pub game_over: Option<GameOver>,
}

/// The game engine that owns and advances the simulation
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    high_score: u32,
    spawn_table: SpawnTable,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Resume from an arbitrary board, e.g. a hand-built scenario
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            state,
            high_score: 0,
            spawn_table: SpawnTable::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let spawn_table = SpawnTable::default();
        let state = Self::fresh_state(&config, &spawn_table, &mut rng);
        Self {
            config,
            state,
            high_score: 0,
            spawn_table,
            rng,
        }
    }

    fn fresh_state(config: &GameConfig, table: &SpawnTable, rng: &mut StdRng) -> GameState {
        let grid_size = config.grid_size();
        let snake = Snake::at(config.origin);
        // A validated board always has a free cell next to the origin
        let food = generate_food(rng, table, &snake, grid_size, true)
            .unwrap_or_else(|| Food::new(config.origin, FoodKind::White));

        GameState::new(snake, food, grid_size, config.base_speed())
    }

    /// Start a fresh idle session: single segment at the origin, white food,
    /// score zero, base speed
    pub fn reset(&mut self) {
        self.state = Self::fresh_state(&self.config, &self.spawn_table, &mut self.rng);
    }

    /// Replace the configuration and reset the board
    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config;
        self.reset();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Seed the high score, typically from the persistent store at startup
    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        self.transition(GamePhase::Idle, GamePhase::Running)
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(GamePhase::Running, GamePhase::Paused)
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        self.transition(GamePhase::Paused, GamePhase::Running)
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase) -> bool {
        if self.state.phase != from {
            debug!(
                "ignoring {:?} -> {:?} while {:?}",
                from, to, self.state.phase
            );
            return false;
        }
        self.state.phase = to;
        true
    }

    /// Queue the direction for the next tick
    ///
    /// Only accepted while running, and never the reverse of the direction
    /// the snake is currently moving in. The last accepted call before a tick
    /// wins.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        if let Some(current) = self.state.snake.direction {
            if current.is_opposite(direction) {
                debug!("rejected reversal {:?} -> {:?}", current, direction);
                return false;
            }
        }
        self.state.pending_direction = Some(direction);
        true
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickResult {
        let mut result = TickResult::default();

        if self.state.phase != GamePhase::Running {
            debug!("tick ignored while {:?}", self.state.phase);
            return result;
        }

        self.state.ticks += 1;
        self.state.snake.direction = self.state.pending_direction;

        // Motionless until the first turn
        let Some(direction) = self.state.snake.direction else {
            return result;
        };

        let new_head = self.state.snake.head().moved_in_direction(direction);
        let ate_food = new_head == self.state.food.position;

        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            let kind = self.state.food.kind;
            result.ate = Some(kind);
            result.speed_changed = self.award(kind.points());

            match generate_food(
                &mut self.rng,
                &self.spawn_table,
                &self.state.snake,
                self.state.grid_size,
                false,
            ) {
                Some(food) => self.state.food = food,
                None => {
                    result.game_over = Some(self.end(EndReason::BoardFull));
                    return result;
                }
            }
        }

        if let Some(reason) = self.check_collision() {
            result.game_over = Some(self.end(reason));
        }

        result
    }

    /// Add points and apply one speed increase per threshold multiple crossed
    fn award(&mut self, points: u32) -> Option<f64> {
        let threshold = self.config.speed_increase_threshold.max(1);
        let before = self.state.score;
        self.state.score += points;

        let crossed = self.state.score / threshold - before / threshold;
        if crossed == 0 {
            return None;
        }

        self.state.speed += self.config.speed_increase_amount * f64::from(crossed);
        info!(
            "score {} crossed a multiple of {}, speed now {:.1}",
            self.state.score, threshold, self.state.speed
        );
        Some(self.state.speed)
    }

    /// Check if the head sits outside the grid or on the body
    fn check_collision(&self) -> Option<EndReason> {
        let head = self.state.snake.head();

        if !self.state.is_in_bounds(head) {
            return Some(EndReason::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    fn end(&mut self, reason: EndReason) -> GameOver {
        self.state.phase = GamePhase::Over;
        self.state.end_reason = Some(reason);

        let final_score = self.state.score;
        let new_high_score = final_score > self.high_score;
        if new_high_score {
            self.high_score = final_score;
        }

        info!(
            "game over ({:?}) with score {} after {} ticks",
            reason, final_score, self.state.ticks
        );

        GameOver {
            reason,
            final_score,
            new_high_score,
        }
    }

    /// Read-only view of the board for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, self.high_score)
    }
}

/// Pick a free cell by rejection sampling and roll its kind
///
/// Returns `None` when the snake covers the whole board.
pub fn generate_food<R: Rng>(
    rng: &mut R,
    table: &SpawnTable,
    snake: &Snake,
    grid_size: usize,
    force_white: bool,
) -> Option<Food> {
    if grid_size == 0 || snake.len() >= grid_size * grid_size {
        return None;
    }

    let position = loop {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            break pos;
        }
    };

    let kind = if force_white {
        FoodKind::White
    } else {
        table.roll(rng)
    };

    Some(Food::new(position, kind))
}
