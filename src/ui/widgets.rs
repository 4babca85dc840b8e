use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, OutputRegion};

pub fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(app.markup.title)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(app.markup.title_color)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(title, area);
}

pub fn render_prompt_field(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Prompt;
    let border_color = if focused { Color::Cyan } else { app.markup.border_color };

    let (text, style) = if app.prompt.is_empty() {
        (app.markup.placeholder.to_string(), Style::default().fg(Color::Gray))
    } else {
        (app.prompt.clone(), Style::default().fg(Color::White))
    };

    let prompt = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false });

    // Keep the end of a long prompt in view, counting wrapped rows
    let inner_height = area.height.saturating_sub(2) as usize;
    let line_count = prompt.line_count(area.width.saturating_sub(2));
    let scroll = u16::try_from(line_count.saturating_sub(inner_height)).unwrap_or(u16::MAX);

    let prompt = prompt
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Prompt ")
                .border_style(Style::default().fg(border_color)),
        )
        .scroll((scroll, 0));

    frame.render_widget(prompt, area);
}

pub fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.markup.buttons.len().max(1);
    #[allow(clippy::cast_possible_truncation)]
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (index, (button, cell)) in app.markup.buttons.iter().zip(cells.iter()).enumerate() {
        let focused = app.focus == Focus::Button(index);
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(button.color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(button.color).add_modifier(Modifier::BOLD)
        };

        let widget = Paragraph::new(button.label)
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(button.color)),
            );

        frame.render_widget(widget, *cell);
    }
}

pub fn render_output(frame: &mut Frame, app: &mut App, area: Rect) {
    let lines = match &app.output {
        OutputRegion::Empty => vec![Line::from(Span::styled(
            "Responses appear here.",
            Style::default().fg(Color::DarkGray),
        ))],
        OutputRegion::Markup(html) => super::markup::render_html_to_lines(html),
        OutputRegion::Text(text) => super::markup::render_plain_text(text),
    };

    let output = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Clamp the scroll position against the word-wrapped row count
    let total_visual_lines = output.line_count(area.width.saturating_sub(2));
    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    let actual_scroll = app.scroll_offset.min(max_scroll);
    app.scroll_offset = actual_scroll;

    let output = output
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Response ")
                .border_style(Style::default().fg(app.markup.border_color)),
        )
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(output, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (service, color) = match app.service_online {
        Some(true) => ("service online", Color::Green),
        Some(false) => ("service unreachable", Color::Red),
        None => ("checking service...", Color::DarkGray),
    };

    let mut spans = vec![Span::styled(
        service,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(action) = app.last_action {
        spans.push(Span::styled(
            format!("  last: {}", action.label()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    frame.render_widget(status, area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Ctrl+E/G/D/R: Explain/Generate/Debug/Run | Tab: Focus | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_notifications(frame: &mut Frame, app: &App, area: Rect) {
    let width = 50.min(area.width);
    let mut y = area.y + 1;

    for notification in app.notifications.iter().rev() {
        #[allow(clippy::cast_possible_truncation)]
        let text_lines = notification
            .message
            .chars()
            .count()
            .div_ceil(width.saturating_sub(2).max(1) as usize) as u16;
        let height = text_lines.max(1) + 2;
        if y + height > area.y + area.height {
            break;
        }

        let popup_area = Rect {
            x: area.x + area.width.saturating_sub(width),
            y,
            width,
            height,
        };

        let toast = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error ")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(Clear, popup_area);
        frame.render_widget(toast, popup_area);
        y += height;
    }
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Planto.AI - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Actions:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+E        - Explain Code"),
        Line::from("  Ctrl+G        - Generate Code"),
        Line::from("  Ctrl+D        - Debug Code"),
        Line::from("  Ctrl+R        - Run Code"),
        Line::from("  Tab/Shift+Tab - Move focus between prompt and buttons"),
        Line::from("  Enter         - Press focused button / new line"),
        Line::from(""),
        Line::from(Span::styled("Response:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down       - Scroll response"),
        Line::from("  PgUp/PgDn     - Scroll response"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from(""),
        Line::from(Span::styled("General:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Esc           - Dismiss notifications"),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C (x2)   - Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    // Calculate centered position
    let popup_width = 64;
    let popup_height = 25;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}
