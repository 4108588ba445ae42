//! Neon palette

use crate::sim::Hue;

/// Canvas background
pub const BACKGROUND: &str = "#050505";

/// CSS color for a hue
pub fn css_color(hue: Hue) -> &'static str {
    match hue {
        Hue::Cyan => "#00f0ff",
        Hue::Pink => "#ff006e",
        Hue::Green => "#39ff14",
        Hue::Purple => "#bf00ff",
        Hue::Orange => "#ff8c00",
        Hue::Blue => "#0066ff",
        Hue::White => "#ffffff",
        Hue::Black => "#000000",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_are_hex() {
        for hue in [
            Hue::Cyan,
            Hue::Pink,
            Hue::Green,
            Hue::Purple,
            Hue::Orange,
            Hue::Blue,
            Hue::White,
            Hue::Black,
        ] {
            let css = css_color(hue);
            assert_eq!(css.len(), 7, "{hue:?}");
            assert!(css.starts_with('#'));
        }
    }
}
