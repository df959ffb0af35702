//! Frame composition: rain backdrop first, then the terminal panels on top.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::theme::blend;

/// How strongly a pulse flash tints the background.
const OVERLAY_STRENGTH: f32 = 0.3;

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let theme = app.display.theme();
    let mut background = theme.bg_color();
    if let Some(tint) = app.display.overlay {
        background = blend(background, tint, OVERLAY_STRENGTH);
    }

    fill_background(frame, area, background);
    app.rain.render(
        area,
        frame.buffer_mut(),
        app.display.accent,
        app.display.shake,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    draw_output_panel(frame, chunks[0], app, background);
    draw_prompt_panel(frame, chunks[1], app, background);
}

fn fill_background(frame: &mut Frame, area: Rect, background: ratatui::style::Color) {
    let buf = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf.get_mut(x, y).set_bg(background);
        }
    }
}

fn draw_output_panel(frame: &mut Frame, area: Rect, app: &App, background: ratatui::style::Color) {
    let theme = app.display.theme();
    let inner_rows = area.height.saturating_sub(2);
    let paragraph = Paragraph::new(Text::from(app.output.lines().to_vec()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.display.accent))
                .title(" neonterm "),
        )
        .style(Style::default().fg(theme.fg_color()).bg(background))
        .scroll((app.output.scroll_offset(inner_rows), 0));
    frame.render_widget(paragraph, area);
}

fn draw_prompt_panel(frame: &mut Frame, area: Rect, app: &App, background: ratatui::style::Color) {
    let theme = app.display.theme();
    let line = Line::from(vec![
        Span::styled(
            "$ ",
            Style::default()
                .fg(app.display.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(app.prompt.as_str().to_string()),
    ]);
    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.display.accent)),
        )
        .style(Style::default().fg(theme.fg_color()).bg(background));
    frame.render_widget(paragraph, area);

    // Caret sits after the "$ " prefix inside the border.
    let cursor_x = area.x.saturating_add(1 + 2 + app.prompt.width());
    let cursor_y = area.y.saturating_add(1);
    if cursor_x < area.right() {
        frame.set_cursor(cursor_x, cursor_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TermConfig;
    use clap::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut content = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                content.push_str(buffer.get(x, y).symbol());
            }
        }
        content
    }

    #[test]
    fn frame_renders_title_and_prompt_sigil() {
        let config = TermConfig::parse_from(["neonterm"]);
        let mut rng = StdRng::seed_from_u64(1);
        let app = App::new(&config, 60, 20, &mut rng);
        let content = render_to_text(&app);
        assert!(content.contains("neonterm"));
        assert!(content.contains('$'));
    }

    #[test]
    fn typed_text_appears_in_the_prompt_panel() {
        let config = TermConfig::parse_from(["neonterm"]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut app = App::new(&config, 60, 20, &mut rng);
        for ch in "theme 3".chars() {
            app.handle_event(
                crate::input::InputEvent::Char(ch),
                std::time::Instant::now(),
                &mut rng,
            );
        }
        let content = render_to_text(&app);
        assert!(content.contains("theme 3"));
    }
}
