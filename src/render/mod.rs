pub mod palette;
pub mod renderer;

pub use palette::Palette;
pub use renderer::{Hud, Renderer};
