//! Theme colors loaded from the system terminal theme
//! Reads colors from ~/.config/omarchy/current/theme/kitty.conf when present

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,        // Focused borders, key hints, slider fill
    pub danger: Color,        // Status warnings
    pub text: Color,          // Primary text
    pub text_dim: Color,      // Labels, hints, empty slider track
    pub inactive: Color,      // Unfocused borders
    pub panel: Color,         // Total-per-person header background
    pub panel_text: Color,    // Text on the header panel
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(203, 166, 247),
            danger: Color::Rgb(243, 139, 168),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            panel: Color::Rgb(229, 210, 246), // #E5D2F6
            panel_text: Color::Rgb(30, 30, 46),
        }
    }
}

impl Theme {
    /// Load theme from the system, falling back to defaults
    pub fn load() -> Self {
        Self::load_kitty_theme().unwrap_or_default()
    }

    fn load_kitty_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        let theme_path = home.join(".config/omarchy/current/theme/kitty.conf");

        let content = fs::read_to_string(&theme_path).ok()?;
        let theme = Self::from_kitty_conf(&content);
        if theme.is_some() {
            tracing::debug!("Loaded theme from {}", theme_path.display());
        }
        theme
    }

    /// Map a kitty color file onto our palette. None if it has no colors.
    fn from_kitty_conf(content: &str) -> Option<Self> {
        let colors = Self::parse_kitty_conf(content);
        if colors.is_empty() {
            return None;
        }

        let fallback = Self::default();

        Some(Self {
            accent: Self::pick(&colors, &["color5", "color13"], fallback.accent),
            danger: Self::pick(&colors, &["color1", "color9"], fallback.danger),
            text: Self::pick(&colors, &["foreground"], fallback.text),
            text_dim: Self::pick(&colors, &["color8"], fallback.text_dim),
            inactive: Self::pick(&colors, &["inactive_border_color", "color8"], fallback.inactive),
            panel: Self::pick(&colors, &["selection_background", "color0"], fallback.panel),
            panel_text: Self::pick(&colors, &["selection_foreground", "foreground"], fallback.panel_text),
        })
    }

    /// First of `keys` present in the file, else `default`
    fn pick(colors: &HashMap<String, Color>, keys: &[&str], default: Color) -> Color {
        keys.iter()
            .find_map(|k| colors.get(*k).copied())
            .unwrap_or(default)
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        match s.len() {
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16).ok()?;
                let g = u8::from_str_radix(&s[2..4], 16).ok()?;
                let b = u8::from_str_radix(&s[4..6], 16).ok()?;
                Some(Color::Rgb(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
                Some(Color::Rgb(r, g, b))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#E5D2F6"), Some(Color::Rgb(229, 210, 246)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
        assert_eq!(Theme::parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_kitty_conf_mapping() {
        let conf = "\
# comment
foreground #bebebe
color5     #ff00ff
color8 #8a8a8d
font_family JetBrains Mono
";
        let theme = Theme::from_kitty_conf(conf).unwrap();
        assert_eq!(theme.accent, Color::Rgb(255, 0, 255));
        assert_eq!(theme.text, Color::Rgb(190, 190, 190));
        assert_eq!(theme.inactive, Color::Rgb(138, 138, 141));
        // Missing keys keep defaults
        assert_eq!(theme.panel, Theme::default().panel);
    }

    #[test]
    fn test_empty_conf_has_no_theme() {
        assert!(Theme::from_kitty_conf("# nothing here\n\n").is_none());
    }
}
