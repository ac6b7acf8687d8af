mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup};
use crate::calc::inputs::SplitCount;
use crate::theme::Theme;

// Load theme colors once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

fn accent() -> Color { theme().accent }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn inactive() -> Color { theme().inactive }
fn panel() -> Color { theme().panel }
fn panel_text() -> Color { theme().panel_text }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // Header grows a little on tall terminals
    let header_height = if area.height < 24 { 5 } else { 7 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Info line
            Constraint::Length(header_height), // Total per person
            Constraint::Min(5),                // Bill form
            Constraint::Length(1),             // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_header(f, app, chunks[1]);
    draw_form(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(danger())))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(text_dim())))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let total = app.summary().map(|s| s.total_per_person).unwrap_or(0.0);
    let panel_style = Style::default().bg(panel()).fg(panel_text());

    // Blank lines above the text keep it vertically centered
    let padding = area.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled("Total per person", panel_style)));
    lines.push(Line::from(Span::styled(
        app.format_amount(total),
        panel_style.add_modifier(Modifier::BOLD),
    )));

    let header = Paragraph::new(lines)
        .style(panel_style)
        .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Bill input
            Constraint::Length(1), // Split
            Constraint::Length(1), // spacer
            Constraint::Length(1), // Tip
            Constraint::Length(1), // spacer
            Constraint::Length(1), // Percentage label
            Constraint::Length(1), // Slider
            Constraint::Min(0),
        ])
        .split(inner);

    draw_bill_input(f, app, rows[0]);

    // Everything below the input only shows for a valid bill
    let Some(summary) = app.summary() else {
        return;
    };

    draw_split_row(f, app, rows[1]);

    let tip_row = Line::from(vec![
        Span::styled(" Tip", label_style(app.focus == Focus::Tip)),
        Span::raw("  "),
        Span::styled(app.format_amount(summary.tip_amount), Style::default().fg(text())),
    ]);
    f.render_widget(Paragraph::new(tip_row), rows[3]);

    let pct = Paragraph::new(Line::from(Span::styled(
        format!("{}%", summary.tip_percentage),
        Style::default().fg(text()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(pct, rows[5]);

    let slider_area = Rect {
        x: rows[6].x + 2,
        width: rows[6].width.saturating_sub(4),
        ..rows[6]
    };
    let track = if app.focus == Focus::Tip { accent() } else { text_dim() };
    let slider = components::slider_line(app.form.slider.get(), slider_area.width, track, inactive());
    f.render_widget(Paragraph::new(slider), slider_area);
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(text())
    }
}

fn draw_bill_input(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.focus == Focus::Bill;
    let border_color = if is_active { accent() } else { inactive() };

    let block = Block::default()
        .title(Span::styled(" Enter Bill ", label_style(is_active)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let symbol = &app.config.currency_symbol;
    let content = Line::from(vec![
        Span::styled(format!("{} ", symbol), Style::default().fg(text_dim())),
        Span::styled(app.form.bill_text.as_str(), Style::default().fg(text())),
    ]);

    f.render_widget(Paragraph::new(content).block(block), area);

    if is_active && app.popup == Popup::None {
        // Cursor sits after the typed text, inside the border
        let offset = (symbol.chars().count() + 1 + app.form.bill_text.len()) as u16;
        let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_split_row(f: &mut Frame, app: &App, area: Rect) {
    let split = app.form.split.get();
    let is_active = app.focus == Focus::Split;

    let line = Line::from(vec![
        Span::styled(" Split", label_style(is_active)),
        Span::raw("  "),
        components::round_button("−", split > SplitCount::MIN, accent(), inactive()),
        Span::styled(format!(" {:>2} ", split), Style::default().fg(text()).add_modifier(Modifier::BOLD)),
        components::round_button("+", split < SplitCount::MAX, accent(), inactive()),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.focus {
        Focus::Bill => vec![
            ("0-9 .", "Type"),
            ("Enter", "Next"),
            ("Ctrl+C", "Quit"),
            ("Esc", "Clear"),
            ("?", "Help"),
        ],
        Focus::Split => vec![
            ("←→ +-", "Split"),
            ("[ ]", "Tip"),
            ("Tab", "Next"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        Focus::Tip => vec![
            ("←→", "Tip"),
            ("Home/End", "0/100%"),
            ("+-", "Split"),
            ("Tab", "Next"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("═══ {} ═══", title),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(accent())),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("Bill"),
        entry("0-9 .", "Type the bill amount"),
        entry("Backspace", "Delete last character"),
        entry("Esc", "Clear the bill"),
        entry("Enter", "Move to split"),
        Line::from(""),
        section("Split & Tip"),
        entry("Tab/S-Tab", "Switch field"),
        entry("+ / -", "More / fewer people (1-10)"),
        entry("← / →", "Change focused value"),
        entry("[ / ]", "Tip down / up"),
        entry("Home/End", "Tip to 0% / 100%"),
        entry("q", "Quit (outside the bill field)"),
        entry("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        section("Command line"),
        entry("tipcalc --bill 50 --split 2 --tip 10", ""),
        entry("tipcalc --bill 50 --json", ""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" tipcalc Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_empty_form_hides_controls() {
        let app = App::new(AppConfig::default());
        let screen = render(&app);
        assert!(screen.contains("Total per person"));
        assert!(screen.contains("$0.00"));
        assert!(screen.contains("Enter Bill"));
        assert!(!screen.contains("Split"));
        // Ctrl+C is the only way out while typing a bill
        assert!(screen.contains("Ctrl+C Quit"));
    }

    #[test]
    fn test_filled_form_shows_outputs() {
        let mut app = App::new(AppConfig {
            default_split: 2,
            default_tip_percent: 10,
            ..AppConfig::default()
        });
        for c in "50".chars() {
            app.form.accept_char(c);
        }
        let screen = render(&app);
        assert!(screen.contains("$27.50"));
        assert!(screen.contains("$5.00"));
        assert!(screen.contains("10%"));
        assert!(screen.contains("Split"));
    }

    #[test]
    fn test_help_popup_renders() {
        let mut app = App::new(AppConfig::default());
        app.popup = Popup::Help;
        let screen = render(&app);
        assert!(screen.contains("tipcalc Help"));
        assert!(screen.contains("Quit from anywhere"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 60);
    }
}
