mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use app_logic::TuiApp;

use crate::api::{ApiClient, Carpeta};
use crate::controller::FetchTicket;
use anyhow::Result;
use std::sync::Arc;
use std::sync::mpsc;

/// What the user walked away with.
pub enum TuiOutcome {
    Cancelled,
    Confirmed(Option<Carpeta>),
}

/// A resolved fetch, stamped with the ticket it answers. The controller
/// decides whether it is still current.
struct FetchDone {
    ticket: FetchTicket,
    result: Result<Vec<Carpeta>, String>,
}

// This module contains the main TUI loop and terminal setup/teardown
mod run_tui {
    use super::app_logic::TuiApp;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use super::{ApiClient, Arc, FetchDone, TuiOutcome, mpsc};
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    pub fn run_tui(mut app: TuiApp, client: Arc<ApiClient>) -> Result<TuiOutcome> {
        let (tx, rx) = mpsc::channel::<FetchDone>();

        let mut terminal = init_terminal()?;

        while !app.quit {
            // Hand freshly issued tickets to workers. One thread per fetch;
            // superseded results are discarded by generation, not cancelled.
            for ticket in app.take_pending_tickets() {
                let client = Arc::clone(&client);
                let tx = tx.clone();
                std::thread::spawn(move || {
                    let result = client
                        .carpetas_por_numeral(ticket.numeral_id)
                        .map_err(|e| e.to_string());
                    // Receiver gone means the TUI already exited.
                    let _ = tx.send(FetchDone { ticket, result });
                });
            }

            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            handle_events(&mut app)?;

            while let Ok(done) = rx.try_recv() {
                app.apply_fetch_outcome(done.ticket, done.result);
            }
        }

        restore_terminal(terminal)?;

        if app.confirmed {
            Ok(TuiOutcome::Confirmed(app.confirmed_selection()))
        } else {
            Ok(TuiOutcome::Cancelled)
        }
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}

pub use self::run_tui::run_tui;
