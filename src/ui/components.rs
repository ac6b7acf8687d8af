//! Small widgets drawn from spans: round buttons and the tip slider.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// `( − )` / `( + )` style button; dimmed when it can't be pressed
pub fn round_button(symbol: &'static str, enabled: bool, color: Color, disabled: Color) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(disabled)
    };
    Span::styled(format!("( {} )", symbol), style)
}

/// Number of filled cells for a slider position across `width` cells
pub fn slider_fill(position: f32, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let filled = (position.clamp(0.0, 1.0) * f32::from(width)).round() as u16;
    filled.min(width)
}

/// Horizontal slider track with a thumb at the current position
pub fn slider_line(position: f32, width: u16, fill: Color, track: Color) -> Line<'static> {
    if width < 2 {
        return Line::from("");
    }
    // One cell is reserved for the thumb
    let track_width = width - 1;
    let filled = slider_fill(position, track_width);
    let empty = track_width - filled;

    Line::from(vec![
        Span::styled("━".repeat(filled as usize), Style::default().fg(fill)),
        Span::styled("●", Style::default().fg(fill).add_modifier(Modifier::BOLD)),
        Span::styled("─".repeat(empty as usize), Style::default().fg(track)),
    ])
}
