//! Theme registry and loader
//!
//! A few built-in palettes with user color overrides.

use ratatui::style::Color;
use slot_text_core::config::{ThemeColorOverrides, ThemeConfig};

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn nord() -> Theme {
    Theme {
        bg: Color::Rgb(0x2e, 0x34, 0x40),
        fg: Color::Rgb(0xec, 0xef, 0xf4),
        dim: Color::Rgb(0x4c, 0x56, 0x6a),
        accent: Color::Rgb(0x88, 0xc0, 0xd0),
        status: Color::Rgb(0x3b, 0x42, 0x52),
    }
}

fn dracula() -> Theme {
    Theme {
        bg: Color::Rgb(0x28, 0x2a, 0x36),
        fg: Color::Rgb(0xf8, 0xf8, 0xf2),
        dim: Color::Rgb(0x62, 0x72, 0xa4),
        accent: Color::Rgb(0xff, 0x79, 0xc6),
        status: Color::Rgb(0x44, 0x47, 0x5a),
    }
}

fn terminal() -> Theme {
    Theme {
        bg: Color::Reset,
        fg: Color::White,
        dim: Color::DarkGray,
        accent: Color::Yellow,
        status: Color::Reset,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "gruvbox-dark" => Theme::default(),
        "nord" => nord(),
        "dracula" => dracula(),
        "terminal" => terminal(),
        other => {
            tracing::warn!(theme = other, "Unknown theme, using gruvbox-dark");
            Theme::default()
        }
    };
    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots = [
        (&overrides.bg, &mut theme.bg),
        (&overrides.fg, &mut theme.fg),
        (&overrides.dim, &mut theme.dim),
        (&overrides.accent, &mut theme.accent),
        (&overrides.status, &mut theme.status),
    ];
    for (hex, slot) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord", "dracula", "terminal"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("#f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_load_theme_unknown_name() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            ..Default::default()
        };
        assert_eq!(load_theme(&config), Theme::default());
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(255, 0, 0)));
        assert_eq!(theme.bg, nord().bg);
    }
}
