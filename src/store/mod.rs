pub mod high_score;

pub use high_score::{data_dir, HighScoreStore, JsonFileStore, MemoryStore};
