//! Main TUI runner - entry point and event loop

use tokio::sync::mpsc;

use cform_app::message::Message;
use cform_app::process::process_message;
use cform_app::signals;
use cform_app::state::AppState;
use cform_core::prelude::*;

use super::{event, render, terminal};

/// Run the form until it is submitted or abandoned.
///
/// Returns the final state; `state.phase` tells the caller which of the two
/// happened.
pub async fn run(mut state: AppState) -> Result<AppState> {
    terminal::install_panic_hook();

    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(16);
    signals::spawn_signal_handler(msg_tx);

    let result = match term.size() {
        Ok(size) => {
            state.apply_size(size.width, size.height);
            info!(
                "Form started at {}x{} ({} px wide)",
                size.width, size.height, state.viewport.width
            );
            run_loop(&mut term, &mut state, msg_rx)
        }
        Err(e) => Err(Error::terminal(format!("Failed to read terminal size: {e}"))),
    };

    ratatui::restore();

    result.map(|()| state)
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
) -> Result<()> {
    while !state.should_quit() {
        // Process external messages (from signal handler)
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg);
        }

        terminal
            .draw(|frame| render::view(frame, state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            process_message(state, message);
        }
    }

    debug!("Event loop finished in phase {:?}", state.phase);
    Ok(())
}
