use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::food::Food;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the last tick, `None` until the first turn
    pub direction: Option<Direction>,
}

impl Snake {
    /// A single motionless segment, the shape every session starts with
    pub fn at(head: Position) -> Self {
        Self {
            body: vec![head],
            direction: None,
        }
    }

    /// Create a moving snake with body segments trailing behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.opposite().delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(dx, dy));
        }

        Self {
            body,
            direction: Some(direction),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a live snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    Paused,
    Over,
}

impl GamePhase {
    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::Idle => "Ready",
            GamePhase::Running => "Running",
            GamePhase::Paused => "Paused",
            GamePhase::Over => "Game Over",
        }
    }

    /// Idle or Over: configuration may change and no timers are armed
    pub fn is_settled(&self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Over)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake covers every cell, no food can spawn
    BoardFull,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    /// Cells per side of the square grid
    pub grid_size: usize,
    pub score: u32,
    /// Ticks per second
    pub speed: f64,
    pub phase: GamePhase,
    /// Direction queued by input, committed on the next tick
    pub pending_direction: Option<Direction>,
    pub end_reason: Option<EndReason>,
    pub ticks: u64,
}

impl GameState {
    /// Create a new idle game state
    pub fn new(snake: Snake, food: Food, grid_size: usize, speed: f64) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food,
            grid_size,
            score: 0,
            speed,
            phase: GamePhase::Idle,
            end_reason: None,
            ticks: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let n = self.grid_size as i32;
        pos.x >= 0 && pos.x < n && pos.y >= 0 && pos.y < n
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::FoodKind;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
        assert_eq!(snake.direction, Some(Direction::Right));
    }

    #[test]
    fn test_single_segment_is_motionless() {
        let snake = Snake::at(Position::new(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.direction, None);
        assert!(snake.body_segments().is_empty());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(!snake.collides_with_body(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::at(Position::new(5, 5)),
            Food::new(Position::new(10, 10), FoodKind::White),
            20,
            5.0,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
        assert_eq!(state.cell_count(), 400);
    }

    #[test]
    fn test_settled_phases() {
        assert!(GamePhase::Idle.is_settled());
        assert!(GamePhase::Over.is_settled());
        assert!(!GamePhase::Running.is_settled());
        assert!(!GamePhase::Paused.is_settled());
    }
}
