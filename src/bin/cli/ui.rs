use crate::app::{App, AppState, PANES, Pane};
use crate::constants::VERSION;
use minipen::snapshot::Layout as PaneLayout;
use once_cell::sync::Lazy;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::collections::HashSet;

const GUTTER_WIDTH: u16 = 4;

static HTML_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "html", "head", "body", "div", "span", "p", "a", "h1", "h2", "h3", "ul", "ol", "li",
        "img", "script", "style", "button", "input", "form", "table", "tr", "td",
    ]
    .into_iter()
    .collect()
});

static CSS_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "color", "background", "margin", "padding", "border", "font", "display", "width",
        "height", "position", "top", "left", "right", "bottom", "flex", "grid", "content",
    ]
    .into_iter()
    .collect()
});

static JS_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "function", "const", "let", "var", "import", "from", "export", "return", "if", "else",
        "for", "while", "async", "await", "class", "extends", "new", "try", "catch", "throw",
    ]
    .into_iter()
    .collect()
});

fn keyword_set(lang: &str) -> &'static HashSet<&'static str> {
    match lang {
        "html" => &HTML_KEYWORDS,
        "css" => &CSS_KEYWORDS,
        _ => &JS_KEYWORDS,
    }
}

fn style_token(token: &str, lang: &str, accent: Color, bg: Color, text: Color) -> Span<'static> {
    let clean = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '_');
    let base_style = Style::default().bg(bg).fg(text);

    if token.trim_start().starts_with("//") || token.trim_start().starts_with("/*") {
        Span::styled(token.to_string(), base_style.fg(Color::Gray))
    } else if token.starts_with('"') || token.starts_with('\'') {
        Span::styled(token.to_string(), base_style.fg(Color::LightGreen))
    } else if keyword_set(lang).contains(clean) {
        Span::styled(
            token.to_string(),
            base_style.fg(accent).add_modifier(Modifier::BOLD),
        )
    } else if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
        Span::styled(token.to_string(), base_style.fg(Color::Cyan))
    } else {
        Span::styled(token.to_string(), base_style)
    }
}

fn highlight_code_line(line: &str, lang: &str, accent: Color, bg: Color, text: Color) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    let mut current = String::new();
    for ch in line.chars() {
        if ch.is_whitespace() || "<>{}();:=,".contains(ch) {
            if !current.is_empty() {
                spans.push(style_token(&current, lang, accent, bg, text));
                current.clear();
            }
            spans.push(Span::styled(
                ch.to_string(),
                Style::default().bg(bg).fg(Color::Gray),
            ));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        spans.push(style_token(&current, lang, accent, bg, text));
    }
    Line::from(spans)
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.current_theme();
    let background = Block::default().style(Style::default().bg(theme.bg));
    f.render_widget(background, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_panes(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    match app.state {
        AppState::Help => render_help(f, app),
        AppState::ConfirmReset => render_confirm_reset(f, app),
        AppState::Alert => render_alert(f, app),
        AppState::Edit => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.current_theme();
    let layout_label = match app.layout {
        PaneLayout::SideBySide => "side-by-side",
        PaneLayout::Stacked => "stacked",
    };
    let autorun_label = if app.autorun { "on" } else { "off" };
    let header = Line::from(vec![
        Span::styled(
            format!(" minipen {} ", VERSION),
            Style::default()
                .fg(theme.text)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" layout: {}  autorun: {}  theme: {} ", layout_label, autorun_label, theme.name),
            Style::default().fg(theme.text).bg(theme.header_bg),
        ),
    ]);
    f.render_widget(
        Paragraph::new(header).style(Style::default().bg(theme.header_bg)),
        area,
    );
}

fn render_panes(f: &mut Frame, app: &mut App, area: Rect) {
    let direction = match app.layout {
        PaneLayout::SideBySide => Direction::Horizontal,
        PaneLayout::Stacked => Direction::Vertical,
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for pane in PANES {
        render_pane(f, app, pane, chunks[pane.index()]);
    }
}

fn render_pane(f: &mut Frame, app: &mut App, pane: Pane, area: Rect) {
    let theme = app.current_theme();
    let focused = app.focus == pane;
    let border_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(90, 90, 90))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", pane.title()))
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width <= GUTTER_WIDTH || inner.height == 0 {
        return;
    }
    let content_width = (inner.width - GUTTER_WIDTH - 1) as usize;
    let height = inner.height as usize;

    let editing = app.state == AppState::Edit;
    let buffer = &mut app.panes[pane.index()];
    buffer.ensure_cursor_visible(content_width, height);

    let visible_start = buffer.scroll_offset;
    let visible_end = (visible_start + height).min(buffer.lines.len());

    let mut gutter_lines = Vec::new();
    let mut code_lines = Vec::new();
    for i in visible_start..visible_end {
        let num_style = if focused && i == buffer.cursor_row {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(100, 100, 100))
        };
        gutter_lines.push(Line::from(Span::styled(
            format!("{:>width$}", i + 1, width = GUTTER_WIDTH as usize),
            num_style,
        )));

        let visible = buffer.visible_slice(&buffer.lines[i], content_width).to_string();
        code_lines.push(highlight_code_line(
            &visible,
            pane.lang(),
            theme.accent,
            theme.bg,
            theme.text,
        ));
    }

    let gutter_area = Rect::new(inner.x, inner.y, GUTTER_WIDTH, inner.height);
    let code_area = Rect::new(
        inner.x + GUTTER_WIDTH + 1,
        inner.y,
        inner.width - GUTTER_WIDTH - 1,
        inner.height,
    );
    f.render_widget(Paragraph::new(gutter_lines).alignment(Alignment::Right), gutter_area);
    f.render_widget(Paragraph::new(code_lines), code_area);

    if focused && editing {
        let cursor_x = buffer
            .cursor_display_col()
            .saturating_sub(buffer.horizontal_scroll) as u16;
        let cursor_y = (buffer.cursor_row - buffer.scroll_offset) as u16;
        if cursor_x < code_area.width && cursor_y < code_area.height {
            f.set_cursor_position(Position::new(code_area.x + cursor_x, code_area.y + cursor_y));
        }
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.current_theme();
    let mut spans: Vec<Span> = Vec::new();

    if app.updating_until.is_some() {
        spans.push(Span::styled(
            " updating… ",
            Style::default().fg(Color::Yellow).bg(theme.status_bg),
        ));
    }
    if app.saved_until.is_some() {
        spans.push(Span::styled(
            " ✓ saved ",
            Style::default().fg(Color::LightGreen).bg(theme.status_bg),
        ));
    }
    if app.export_in_flight {
        spans.push(Span::styled(
            " exporting… ",
            Style::default().fg(Color::Yellow).bg(theme.status_bg),
        ));
    }
    if let Some(ref message) = app.status {
        spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(theme.text).bg(theme.status_bg),
        ));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            " F1 help | Tab switch pane | Ctrl+R run | Esc quit ",
            Style::default().fg(Color::Rgb(130, 130, 130)).bg(theme.status_bg),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.status_bg)),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let area = centered_rect(52, 16, f.area());
    f.render_widget(Clear, area);

    let bindings = [
        ("Tab / Shift+Tab", "switch pane"),
        ("Ctrl+R", "run preview now"),
        ("Ctrl+S", "save snapshot"),
        ("Ctrl+A", "toggle auto-run"),
        ("Ctrl+L", "toggle layout"),
        ("Ctrl+O", "open preview in browser"),
        ("Ctrl+E", "export bundle (zip)"),
        ("Ctrl+K", "reset panes to starter code"),
        ("F2", "cycle theme"),
        ("Esc", "quit"),
    ];
    let mut lines = vec![Line::from("")];
    for (keys, what) in bindings {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<16}", keys),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(what.to_string(), Style::default().fg(theme.text)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  press Esc to close",
        Style::default().fg(Color::Gray),
    )));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );
    f.render_widget(help, area);
}

fn render_confirm_reset(f: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let area = centered_rect(46, 5, f.area());
    f.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Reset panes to starter code?  (y/n)",
            Style::default().fg(theme.text),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(theme.bg)),
    );
    f.render_widget(body, area);
}

fn render_alert(f: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let area = centered_rect(56, 6, f.area());
    f.render_widget(Clear, area);
    let message = app.alert.clone().unwrap_or_default();
    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  press Enter to dismiss",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(theme.bg)),
    );
    f.render_widget(body, area);
}
