use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};

use slot_text_core::{AppConfig, SystemClock};
use slot_text_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme, Animator, App,
};

/// Run the animation full screen until the user quits
pub fn run(animator: Animator, config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("slot-text")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(animator, SystemClock::new(), theme);
    let event_handler = EventHandler::with_tick(config.ui.tick_duration());

    tracing::info!(text = %app.animator.text(), fps = config.ui.fps, "Starting animation");
    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    app.start();

    loop {
        app.tick();

        // Draw UI
        terminal.draw(|frame| app.render(frame))?;

        // Sleep until the next scheduled frame or the redraw tick, whichever is first
        let timeout = app.until_next_event(event_handler.tick_rate());
        if let Some(event) = event_handler.next_within(timeout)? {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::Mouse(mouse) => app.pointer_moved(mouse.column, mouse.row),
                AppEvent::FocusLost => app.pointer_left(),
                // Redrawn at the top of the loop
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
