pub mod app;
pub mod form;
pub mod route;
pub mod toast;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use crate::api::TaskApi;
use app::{App, View};
use form::FormField;
use route::Route;
use ui::ui;

pub fn run_tui<A: TaskApi>(api: A, start: Route, toast_duration: Duration) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, start, toast_duration);
    tracing::info!(%start, "tui started");

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "tui exited with an error");
    }
    Ok(res?)
}

fn run_app<B: Backend, A: TaskApi>(terminal: &mut Terminal<B>, app: &mut App<A>) -> io::Result<()> {
    loop {
        app.toaster.prune(Instant::now());
        terminal.draw(|f| ui(f, app))?;

        // One request per frame so its local effects are drawn before the next call.
        if app.process_next() {
            continue;
        }

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(());
            }
            if handle_key(app, key) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

#[derive(PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key<A: TaskApi>(app: &mut App<A>, key: KeyEvent) -> Flow {
    match app.view {
        View::List if app.list.delete_task_id.is_some() => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        },
        View::List => match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
            KeyCode::Char('a') | KeyCode::Char('c') => app.navigate(Route::Create),
            KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
            KeyCode::Char('r') => app.refresh(),
            KeyCode::Char('x') => app.toaster.dismiss_all(),
            _ => {}
        },
        View::Edit { form: None, .. } => {
            if key.code == KeyCode::Esc {
                app.back();
            }
        }
        View::Create(_) | View::Edit { .. } => match key.code {
            KeyCode::Esc => app.back(),
            KeyCode::Enter => app.submit_form(),
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(form) = app.form_mut() { form.next_field(); }
            }
            KeyCode::Left => {
                if let Some(form) = app.form_mut() { form.previous_color(); }
            }
            KeyCode::Right => {
                if let Some(form) = app.form_mut() { form.next_color(); }
            }
            KeyCode::Char(c) => {
                if let Some(form) = app.form_mut() {
                    match (form.focus, c) {
                        (FormField::Color, 'h') => form.previous_color(),
                        (FormField::Color, 'l') => form.next_color(),
                        _ => form.push_char(c),
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = app.form_mut() { form.pop_char(); }
            }
            _ => {}
        },
    }
    Flow::Continue
}
