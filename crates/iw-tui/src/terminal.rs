//! Terminal setup, teardown, main event loop, and drawing.

use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use iw_runner::TextBlock;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::TuiApp;

/// Launch the TUI application and boot its story.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<(), String> {
    // Show the loading status before the fetch blocks.
    terminal
        .draw(|frame| draw(frame, app))
        .map_err(|e| format!("draw error: {e}"))?;
    app.boot();

    loop {
        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        match event::read().map_err(|e| format!("event error: {e}"))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            _ => {}
        }
    }
}

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let surface = app.surface();
    let banner_height = if surface.error_banner().is_some() { 3 } else { 0 };
    let choices_height = choice_list_height(surface.choices().len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Engine version
            Constraint::Length(banner_height),  // Error banner
            Constraint::Min(3),                 // Story text
            Constraint::Length(choices_height), // Choices
            Constraint::Length(1),              // Status bar
        ])
        .split(frame.area());

    let version = if surface.version().is_empty() {
        "Inkwell".to_string()
    } else {
        format!("Inkwell | {}", surface.version())
    };
    frame.render_widget(
        Paragraph::new(version).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    if let Some(message) = surface.error_banner() {
        let banner = Paragraph::new(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(banner, chunks[1]);
    }

    draw_story(frame, app, chunks[2]);

    if !surface.choices().is_empty() {
        let items: Vec<ListItem> = surface
            .choices()
            .iter()
            .map(|choice| ListItem::new(choice.to_string()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Choices ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(app.selected));
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let status = format!(" {}  |  {}", surface.status(), app.key_hint());
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Black).bg(Color::White)),
        chunks[4],
    );
}

/// Rows for the choice list: one per choice plus borders, at most nine shown.
fn choice_list_height(count: usize) -> u16 {
    if count == 0 {
        return 0;
    }
    u16::try_from(count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(11)
}

/// Draw the story text region, pinned to the bottom unless scrolled.
fn draw_story(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let lines = story_lines(app.surface().text());

    let inner_width = area.width.saturating_sub(2) as usize;
    let total_wrapped: u16 = lines
        .iter()
        .map(|l| {
            if inner_width == 0 {
                1
            } else {
                l.width().max(1).div_ceil(inner_width) as u16
            }
        })
        .sum();
    let visible_height = area.height.saturating_sub(2);
    let max_scroll = total_wrapped.saturating_sub(visible_height);
    let scroll = max_scroll.saturating_sub(app.scroll);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Story ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Styled lines for the text region, a blank line between blocks.
fn story_lines(blocks: &[TextBlock]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for block in blocks {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        match block {
            TextBlock::Paragraph(text) => lines.push(Line::from(text.as_str())),
            TextBlock::Warning(text) => lines.push(Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ))),
            TextBlock::EndMarker(text) => lines.push(
                Line::from(Span::styled(
                    format!("~ {text} ~"),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            ),
            TextBlock::Error(text) => lines.push(Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(Color::Red),
            ))),
            TextBlock::Help(help) => {
                lines.push(Line::from(help.heading.as_str()).style(Style::default().bold()));
                for (i, step) in help.steps.iter().enumerate() {
                    lines.push(Line::from(format!("  {}. {step}", i + 1)));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("[{}] press r", help.reload_label),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use iw_core::StorySource;
    use iw_core::testing::{Script, ScriptedEngine};
    use iw_runner::PageConfig;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    use super::*;

    fn screen(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_for(dir: &TempDir, script: Option<&Script>) -> TuiApp {
        let file = dir.path().join("test1.json");
        if let Some(script) = script {
            std::fs::write(&file, script.to_document().to_json_string()).unwrap();
        }
        let config = PageConfig::default().with_story(StorySource::Path(file));
        let mut app = TuiApp::new(config, Some(Box::new(ScriptedEngine::new()))).unwrap();
        app.boot();
        app
    }

    #[test]
    fn draws_text_and_choices() {
        let dir = TempDir::new().unwrap();
        let script = Script::new().beat(["The gate is shut."], [("Knock", None), ("Leave", None)]);
        let app = app_for(&dir, Some(&script));

        let out = screen(&app);
        assert!(out.contains("The gate is shut."));
        assert!(out.contains("> [1] Knock"));
        assert!(out.contains("[2] Leave"));
        assert!(out.contains("scripted 1.0"));
    }

    #[test]
    fn draws_end_marker() {
        let dir = TempDir::new().unwrap();
        let script = Script::new().beat(["Fin."], []);
        let app = app_for(&dir, Some(&script));

        assert!(screen(&app).contains("~ The End ~"));
    }

    #[test]
    fn draws_error_banner_and_checklist() {
        let dir = TempDir::new().unwrap();
        let app = app_for(&dir, None);

        let out = screen(&app);
        assert!(out.contains("file not found"));
        assert!(out.contains("Troubleshooting:"));
        assert!(out.contains("[Reload] press r"));
    }

    #[test]
    fn choice_list_height_is_clamped() {
        assert_eq!(choice_list_height(0), 0);
        assert_eq!(choice_list_height(2), 4);
        assert_eq!(choice_list_height(9), 11);
        assert_eq!(choice_list_height(70_000), 11);
    }

    #[test]
    fn long_choice_list_keeps_status_bar() {
        let dir = TempDir::new().unwrap();
        let labels = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"];
        let script = Script::new().beat(["Pick."], labels.iter().map(|l| (*l, None)));
        let app = app_for(&dir, Some(&script));

        let out = screen(&app);
        let last = out.lines().last().unwrap();
        assert!(last.contains("showing 12 choices"));
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let blocks = vec![
            TextBlock::Paragraph("one".into()),
            TextBlock::Paragraph("two".into()),
        ];
        let lines = story_lines(&blocks);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].width(), 0);
    }
}
