use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup};

// Fixed palette
const ACCENT: Color = Color::Rgb(250, 179, 135);
const INACTIVE: Color = Color::Rgb(88, 91, 112);
const SUCCESS: Color = Color::Rgb(166, 218, 149);
const WARNING: Color = Color::Rgb(250, 179, 135);
const DANGER: Color = Color::Rgb(243, 139, 168);
const TEXT: Color = Color::Rgb(205, 214, 244);
const TEXT_DIM: Color = Color::Rgb(147, 153, 178);
const BG_SELECTED: Color = Color::Rgb(69, 71, 90);
const HEADER: Color = Color::Rgb(243, 139, 168);

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(3),    // Menu items
            Constraint::Length(3), // Add input
            Constraint::Length(3), // Add Item button
            Constraint::Length(3), // Filter input
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_items_box(f, app, chunks[1]);
    draw_text_input(
        f,
        " Add new menu item ",
        app.menu.draft_item(),
        app.focus == Focus::AddInput,
        chunks[2],
    );
    draw_add_button(f, app, chunks[3]);
    draw_text_input(
        f,
        " Filter by... ",
        app.menu.filter_text(),
        app.focus == Focus::FilterInput,
        chunks[4],
    );
    draw_footer(f, app, chunks[5]);

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
    }
}

fn border_styles(is_active: bool) -> (Style, Style) {
    let border = Style::default().fg(if is_active { ACCENT } else { INACTIVE });
    let title = if is_active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(INACTIVE)
    };
    (border, title)
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > item counts
    let line = if let Some(ref status) = app.status_message {
        Line::from(vec![Span::styled(status, Style::default().fg(WARNING))])
    } else {
        let shown = app.menu.visible_items().len();
        Line::from(vec![Span::styled(
            format!("{} of {} items", shown, app.menu.items().len()),
            Style::default().fg(TEXT_DIM),
        )])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_items_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.focus == Focus::List;
    let (border_style, title_style) = border_styles(is_active);

    let block = Block::default()
        .title(Span::styled(" Menu ", title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible = app.menu.visible_items();

    if visible.is_empty() {
        let hint = if app.menu.is_empty() {
            "No menu items"
        } else {
            "No matching items"
        };
        let empty = Paragraph::new(format!("  {}", hint))
            .style(Style::default().fg(TEXT_DIM))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if i == app.selected && is_active { "▸" } else { "" };
            Row::new(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(*item, Style::default().fg(TEXT)),
            ])
        })
        .collect();

    let widths = vec![Constraint::Length(2), Constraint::Min(1)];

    let highlight = if is_active {
        Style::default().bg(BG_SELECTED).fg(TEXT)
    } else {
        Style::default()
    };
    let table = Table::new(rows, widths)
        .block(block)
        .row_highlight_style(highlight);

    // Selection drives the scroll offset so the selected row stays in view
    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_text_input(f: &mut Frame, title: &str, value: &str, is_active: bool, area: Rect) {
    let (border_style, title_style) = border_styles(is_active);
    let cursor = if is_active { "_" } else { "" };

    let input = Paragraph::new(format!("{}{}", value, cursor))
        .style(Style::default().fg(TEXT))
        .block(
            Block::default()
                .title(Span::styled(title, title_style))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    f.render_widget(input, area);
}

fn draw_add_button(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.focus == Focus::AddButton;
    let (border_style, _) = border_styles(is_active);
    let label_style = if is_active {
        Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT)
    };

    let button = Paragraph::new(Line::from(vec![
        Span::styled("[ ", Style::default().fg(TEXT_DIM)),
        Span::styled("Add Item", label_style),
        Span::styled(" ]", Style::default().fg(TEXT_DIM)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(border_style));

    f.render_widget(button, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.focus {
        Focus::List => vec![
            ("↑↓", "Nav"),
            ("a", "Add"),
            ("/", "Filter"),
            ("Tab", "Next"),
            ("h", "Help"),
            ("q", "Quit"),
        ],
        Focus::AddInput => vec![("Enter", "Add"), ("Esc", "Back"), ("Tab", "Next")],
        Focus::AddButton => vec![("Space", "Add"), ("Esc", "Back"), ("Tab", "Next")],
        Focus::FilterInput => vec![("Enter", "Done"), ("Esc", "Back"), ("Tab", "Next")],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 40 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(ACCENT)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(TEXT_DIM)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(HEADER).add_modifier(Modifier::BOLD)))
    };
    let binding = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(key, Style::default().fg(ACCENT)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        binding("  Tab       ", "Move focus (Menu → Add → Add Item → Filter)"),
        binding("  ↑/↓ j/k   ", "Move up/down in the menu"),
        binding("  Esc       ", "Leave an input"),
        Line::from(""),
        section("═══ Adding ═══"),
        binding("  a         ", "Type a new item"),
        binding("  Enter     ", "Add the typed item (blank input is ignored)"),
        Line::from(""),
        section("═══ Filtering ═══"),
        binding("  /         ", "Type a filter pattern"),
        Line::from(vec![Span::raw("            Case-insensitive regex, matched anywhere")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(TEXT_DIM)),
            Span::styled("h", Style::default().fg(ACCENT)),
            Span::styled("/", Style::default().fg(TEXT_DIM)),
            Span::styled("?", Style::default().fg(ACCENT)),
            Span::styled("/", Style::default().fg(TEXT_DIM)),
            Span::styled("Esc", Style::default().fg(ACCENT)),
            Span::styled(" to close", Style::default().fg(TEXT_DIM)),
        ]),
        Line::from(vec![
            Span::styled("  q", Style::default().fg(DANGER)),
            Span::styled(" quits from the menu", Style::default().fg(TEXT_DIM)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" sidemenu Help ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
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
