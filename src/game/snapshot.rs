//! Immutable view of a game handed to the renderer.

use super::food::Food;
use super::state::{GamePhase, GameState, Position};

/// Text shown over the board when the game is not in play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub score_text: String,
    pub message: String,
}

impl Overlay {
    pub fn game_over(score: u32) -> Self {
        Self {
            title: "Game Over!".to_string(),
            score_text: format!("Score: {}", score),
            message: encouragement(score).to_string(),
        }
    }

    pub fn paused(score: u32) -> Self {
        Self {
            title: "Paused".to_string(),
            score_text: format!("Score: {}", score),
            message: "Resume to keep going".to_string(),
        }
    }
}

/// Closing line for a finished game, by final score
pub fn encouragement(score: u32) -> &'static str {
    match score {
        0..=9 => "Keep practicing, you can do better!",
        10..=29 => "Nice try, keep at it!",
        30..=49 => "Great run, you're getting the hang of it!",
        50..=99 => "Impressive, you're a snake master!",
        _ => "Legendary! Go push your limits!",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    /// Cells per side
    pub grid_size: usize,
    /// Snake segments, head first
    pub cells: Vec<Position>,
    pub head_index: usize,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub speed: f64,
    pub phase: GamePhase,
    pub overlay: Option<Overlay>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, high_score: u32) -> Self {
        let overlay = match state.phase {
            GamePhase::Over => Some(Overlay::game_over(state.score)),
            GamePhase::Paused => Some(Overlay::paused(state.score)),
            GamePhase::Idle | GamePhase::Running => None,
        };

        Self {
            grid_size: state.grid_size,
            cells: state.snake.body.clone(),
            head_index: 0,
            food: state.food,
            score: state.score,
            high_score,
            speed: state.speed,
            phase: state.phase,
            overlay,
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.cells.get(self.head_index).copied()
    }
}
