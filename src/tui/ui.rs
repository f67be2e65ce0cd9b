use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use crate::api::TaskApi;
use crate::models::{parse_hex, TASK_COLORS};
use crate::ordering::completed_label;
use super::app::{App, View};
use super::form::{FormField, TaskForm};

const BLUE: Color = Color::Rgb(96, 165, 250);
const PURPLE: Color = Color::Rgb(192, 132, 252);

pub fn ui<A: TaskApi>(f: &mut Frame, app: &mut App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    render_header(f, chunks[0]);

    let help_text = match &app.view {
        View::List if app.list.delete_task_id.is_some() => "y/Enter: Delete | n/Esc: Cancel",
        View::List => "q: Quit | a: Create Task | Space: Toggle Done | e/Enter: Edit | d: Delete | r: Refresh | x: Dismiss",
        View::Edit { form: None, .. } => "Esc: Back",
        View::Create(_) | View::Edit { .. } => "Enter: Submit | Tab: Next Field | ←/→: Color | Esc: Back",
    };

    match &app.view {
        View::List => {}
        View::Create(form) => render_form(f, chunks[1], form),
        View::Edit { form: Some(form), .. } => render_form(f, chunks[1], form),
        View::Edit { form: None, .. } => {
            let loading = Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(BLUE));
            f.render_widget(loading, centered_rect(60, 1, chunks[1]));
        }
    }

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    if let View::List = app.view {
        render_list(f, chunks[1], app);
        if app.list.delete_task_id.is_some() {
            render_delete_dialog(f, app.list.is_deleting);
        }
    }

    render_toast(f, app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("🚀 ", Style::default().fg(BLUE)),
        Span::styled("Todo", Style::default().fg(BLUE).add_modifier(Modifier::BOLD)),
        Span::styled("App", Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_list<A: TaskApi>(f: &mut Frame, area: Rect, app: &mut App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Create button
            Constraint::Length(1),
            Constraint::Length(1), // Counters
            Constraint::Length(1),
            Constraint::Min(0),    // Tasks
        ].as_ref())
        .split(area);

    let button = Paragraph::new("Create Task [+]  (a)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD));
    f.render_widget(button, chunks[0]);

    let list = &mut app.list;
    let (total, completed) = if list.is_loading {
        ("-".to_string(), "-".to_string())
    } else {
        (list.tasks.len().to_string(), completed_label(&list.tasks))
    };
    let counters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[2]);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Tasks ", Style::default().fg(BLUE)),
            Span::styled(total, Style::default().fg(Color::Gray).bg(Color::Black)),
        ])),
        counters[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Completed ", Style::default().fg(PURPLE)),
            Span::styled(completed, Style::default().fg(Color::Gray).bg(Color::Black)),
        ]))
        .alignment(Alignment::Right),
        counters[1],
    );

    if list.is_loading {
        let loading = Paragraph::new("Loading tasks...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(loading, centered_rect(60, 1, chunks[4]));
        return;
    }

    if list.tasks.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled("You don't have any tasks registered yet.", Style::default().fg(Color::Gray))),
            Line::from(Span::styled("Create tasks and organize your to-do items.", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, centered_rect(80, 2, chunks[4]));
        return;
    }

    // One card per task: checkbox, title, color swatch, delete trigger.
    let rows: Vec<Row> = list
        .tasks
        .iter()
        .map(|t| {
            let (checkbox, title_style) = if t.completed {
                ("(●)", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("( )", Style::default().fg(Color::White))
            };
            Row::new(vec![
                Cell::from(checkbox).style(Style::default().fg(if t.completed { Color::Blue } else { Color::Gray })),
                Cell::from(t.title.clone()).style(title_style),
                Cell::from("●").style(Style::default().fg(swatch(&t.color))),
                Cell::from("🗑").style(Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(2),
        Constraint::Length(3),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[4], &mut list.state);
}

fn render_form(f: &mut Frame, area: Rect, form: &TaskForm) {
    let area = centered_columns(70, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Back
            Constraint::Length(1),
            Constraint::Length(3), // Title
            Constraint::Length(1), // Title error
            Constraint::Length(3), // Color
            Constraint::Length(1),
            Constraint::Length(1), // Submit
            Constraint::Min(0),
        ].as_ref())
        .split(area);

    f.render_widget(
        Paragraph::new("‹ Back (Esc)").style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let focused = |field: FormField| {
        if form.focus == field {
            Style::default().fg(BLUE)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let title = Paragraph::new(form.title.as_str())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Title").border_style(focused(FormField::Title)));
    f.render_widget(title, chunks[2]);
    if form.focus == FormField::Title {
        let typed = u16::try_from(form.title.chars().count()).unwrap_or(u16::MAX);
        let x = chunks[2].x.saturating_add(1).saturating_add(typed);
        f.set_cursor_position((x.min(chunks[2].right().saturating_sub(2)), chunks[2].y + 1));
    }

    if let Some(err) = form.title_error() {
        f.render_widget(
            Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red)),
            chunks[3],
        );
    }

    let mut swatches = Vec::new();
    for (i, hex) in TASK_COLORS.iter().enumerate() {
        let symbol = if i == form.color_index { "◉ " } else { "● " };
        swatches.push(Span::styled(symbol, Style::default().fg(swatch(hex))));
    }
    let colors = Paragraph::new(Line::from(swatches))
        .block(Block::default().borders(Borders::ALL).title("Color").border_style(focused(FormField::Color)));
    f.render_widget(colors, chunks[4]);

    let label = if form.is_loading { "Saving..." } else { form.button_label };
    let button = Paragraph::new(format!("{}  (Enter)", label))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(if form.is_loading { Color::DarkGray } else { Color::Blue }));
    f.render_widget(button, chunks[6]);
}

fn render_delete_dialog(f: &mut Frame, is_deleting: bool) {
    let area = centered_rect(50, 8, f.area());
    f.render_widget(Clear, area);

    let buttons = if is_deleting {
        Line::from(vec![
            Span::styled(" Cancel ", Style::default().fg(Color::DarkGray).bg(Color::Gray)),
            Span::raw("  "),
            Span::styled(" Deleting... ", Style::default().fg(Color::White).bg(Color::Red)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" Cancel (n) ", Style::default().fg(Color::White).bg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(" Delete (y) ", Style::default().fg(Color::White).bg(Color::Red)),
        ])
    };

    let dialog = Paragraph::new(vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this task? This action cannot be undone.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        buttons.alignment(Alignment::Right),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Confirm Deletion"));
    f.render_widget(dialog, area);
}

fn render_toast<A: TaskApi>(f: &mut Frame, app: &App<A>) {
    let Some(toast) = app.toaster.latest() else { return; };
    let full = f.area();
    let width = full.width.min(50);
    let area = Rect {
        x: full.right().saturating_sub(width),
        y: full.bottom().saturating_sub(7),
        width,
        height: 4.min(full.height),
    };
    f.render_widget(Clear, area);

    let body = Paragraph::new(toast.description.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(toast.title.as_str()));
    f.render_widget(body, area);
}

fn swatch(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}

fn centered_columns(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(r)[1]
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ].as_ref())
        .split(r);

    centered_columns(percent_x, popup_layout[1])
}
