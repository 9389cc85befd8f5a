use ratatui::style::Color;

use crate::game::{Background, FoodKind};

/// Colours for one background choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub head: Color,
    pub body: Color,
    white_food: Color,
    yellow_food: Color,
    orange_food: Color,
    red_food: Color,
}

impl Palette {
    /// Dark tinted backgrounds get a brighter food set for contrast
    pub fn for_background(background: Background) -> Self {
        let base = Self {
            background: hex(background.hex()),
            head: hex("#00cc00"),
            body: hex("#00ff00"),
            white_food: hex("#f5f5f5"),
            yellow_food: hex("#ffeb3b"),
            orange_food: hex("#ff9800"),
            red_food: hex("#f44336"),
        };

        if background.is_dark_tint() {
            Self {
                white_food: hex("#ffffff"),
                yellow_food: hex("#ffff00"),
                orange_food: hex("#ffa500"),
                red_food: hex("#ff5252"),
                ..base
            }
        } else {
            base
        }
    }

    pub fn food(&self, kind: FoodKind) -> Color {
        match kind {
            FoodKind::White => self.white_food,
            FoodKind::Yellow => self.yellow_food,
            FoodKind::Orange => self.orange_food,
            FoodKind::Red => self.red_food,
        }
    }
}

fn hex(code: &str) -> Color {
    code.parse().unwrap_or(Color::Reset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex("#1a1a2e"), Color::Rgb(0x1a, 0x1a, 0x2e));
        assert_eq!(hex("nonsense"), Color::Reset);
    }

    #[test]
    fn test_dark_backgrounds_brighten_food() {
        let classic = Palette::for_background(Background::Classic);
        let midnight = Palette::for_background(Background::Midnight);

        assert_eq!(classic.food(FoodKind::Red), Color::Rgb(0xf4, 0x43, 0x36));
        assert_eq!(midnight.food(FoodKind::Red), Color::Rgb(0xff, 0x52, 0x52));
        assert_eq!(classic.head, midnight.head);
        assert_ne!(classic.background, midnight.background);
    }

    #[test]
    fn test_every_food_kind_is_distinct() {
        let palette = Palette::for_background(Background::Forest);
        for (i, a) in FoodKind::ALL.iter().enumerate() {
            for b in &FoodKind::ALL[i + 1..] {
                assert_ne!(palette.food(*a), palette.food(*b));
            }
        }
    }
}
