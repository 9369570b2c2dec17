//! Event handling for the TUI.
//!
//! All state mutation funnels through [`update`]: one message in, state
//! transitioned, at most one [`Action`] out for the caller to execute.
//! The async work (fetching, submitting) happens outside and re-enters
//! as messages, so no two transitions ever interleave.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::form::{FormCommand, FormEvent, FormField, SubmitOrigin};
use crate::models::Asset;
use crate::models::orderbook::OrderbookViewModel;
use crate::models::trade::{TradeRequest, TradeResponse};

use super::app::{App, BookColumn, Focus};

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Refresh tick; triggers a book re-fetch.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from the terminal.
    Input(Event),

    /// A book fetch resolved. `generation` identifies the asset epoch
    /// the fetch was issued for; stale resolutions are dropped.
    BookFetched {
        generation: u64,
        result: Result<OrderbookViewModel, String>,
    },

    /// An order submission attempt resolved.
    SubmissionResolved {
        origin: SubmitOrigin,
        token: Option<u64>,
        result: Result<TradeResponse, String>,
    },
}

/// Async work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch a fresh snapshot for the asset.
    FetchBook { asset: Asset, generation: u64 },
    /// Run an order submission.
    Submit {
        request: TradeRequest,
        origin: SubmitOrigin,
        token: Option<u64>,
    },
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends a refresh tick at the polling cadence. The
/// task ends when the receiving side is dropped (teardown cancels the
/// interval).
pub fn spawn_refresh_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        // The first tick fires immediately; the bootstrap fetch already
        // covered it.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::BookFetched { generation, result } => {
            if generation != app.book_generation {
                // Resolution for a previously selected asset.
                return None;
            }
            app.book_loading = false;
            match result {
                Ok(book) => {
                    app.orderbook = Some(book);
                    app.book_error = None;
                    app.clamp_selection();
                }
                Err(message) => {
                    app.book_error = Some(message);
                }
            }
            None
        }
        Message::SubmissionResolved {
            origin,
            token,
            result,
        } => dispatch_form(
            app,
            FormEvent::SubmissionResolved {
                origin,
                token,
                result,
            },
        ),
    }
}

/// Runs a form event through the reconciliation engine, mirrors any
/// rewritten field text into the inputs, and maps the emitted command to
/// an action.
fn dispatch_form(app: &mut App, event: FormEvent) -> Option<Action> {
    let command = app.form.apply(event);
    app.sync_inputs();
    match command {
        Some(FormCommand::Submit {
            request,
            origin,
            token,
        }) => Some(Action::Submit {
            request,
            origin,
            token,
        }),
        None => None,
    }
}

/// Handles input events.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => Some(Action::FetchBook {
            asset: app.asset,
            generation: app.book_generation,
        }),
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.previous();
            return None;
        }
        KeyCode::Esc => {
            // Dismiss banners first, then fall back to the book.
            if app.form.error.is_some() {
                return dispatch_form(app, FormEvent::ErrorDismissed);
            }
            if app.form.success.is_some() {
                return dispatch_form(app, FormEvent::SuccessDismissed);
            }
            if app.book_error.is_some() {
                app.book_error = None;
                return None;
            }
            app.focus = Focus::Book;
            return None;
        }
        _ => {}
    }

    match app.focus {
        Focus::Book => handle_book_keys(app, key),
        Focus::SideSelect => handle_side_keys(app, key),
        Focus::Field(field) => handle_field_keys(app, key, field),
    }
}

/// Keys while the depth table is focused.
fn handle_book_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('a') => {
            app.cycle_asset();
            let _ = dispatch_form(app, FormEvent::AssetChanged(app.asset));
            Some(Action::FetchBook {
                asset: app.asset,
                generation: app.book_generation,
            })
        }
        KeyCode::Char('r') => Some(Action::FetchBook {
            asset: app.asset,
            generation: app.book_generation,
        }),
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_column(BookColumn::Bids);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_column(BookColumn::Asks);
            None
        }
        KeyCode::Enter => activate_selected_price(app),
        _ => None,
    }
}

/// Price activation: prefill side and price, then request an auto-submit
/// with a fresh token. The engine decides whether anything is sent.
fn activate_selected_price(app: &mut App) -> Option<Action> {
    let row = app.selected_row().copied()?;
    if !row.price.is_finite() {
        // Malformed level; nothing sensible to prefill.
        return None;
    }
    let side = app.selection.column.side();

    dispatch_form(
        app,
        FormEvent::Prefill {
            side,
            price: row.price,
        },
    );

    let token = app.next_auto_submit_token();
    dispatch_form(
        app,
        FormEvent::AutoSubmitTriggered {
            token,
            side,
            price: Some(row.price),
        },
    )
}

/// Keys while the side selector is focused.
fn handle_side_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('b') => dispatch_form(app, FormEvent::SideChanged(crate::models::Side::Buy)),
        KeyCode::Char('s') => dispatch_form(app, FormEvent::SideChanged(crate::models::Side::Sell)),
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
            let mut side = app.form.state.side;
            side.toggle();
            dispatch_form(app, FormEvent::SideChanged(side))
        }
        KeyCode::Enter => dispatch_form(app, FormEvent::SubmitRequested),
        _ => None,
    }
}

/// Keys while one of the numeric inputs is focused.
fn handle_field_keys(app: &mut App, key: KeyEvent, field: FormField) -> Option<Action> {
    match key.code {
        KeyCode::Enter => dispatch_form(app, FormEvent::SubmitRequested),
        KeyCode::Char(c) if is_decimal_char(c) => {
            app.inputs.get_mut(field).insert(c);
            edited(app, field)
        }
        KeyCode::Backspace => {
            app.inputs.get_mut(field).backspace();
            edited(app, field)
        }
        KeyCode::Delete => {
            app.inputs.get_mut(field).delete();
            edited(app, field)
        }
        KeyCode::Left => {
            app.inputs.get_mut(field).move_left();
            None
        }
        KeyCode::Right => {
            app.inputs.get_mut(field).move_right();
            None
        }
        KeyCode::Home => {
            app.inputs.get_mut(field).move_home();
            None
        }
        KeyCode::End => {
            app.inputs.get_mut(field).move_end();
            None
        }
        _ => None,
    }
}

/// Characters accepted by the numeric inputs: enough to type any decimal
/// or scientific-notation value; validity is the engine's concern.
fn is_decimal_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Forwards the edited field text to the engine.
fn edited(app: &mut App, field: FormField) -> Option<Action> {
    let text = app.inputs.get(field).as_str().to_string();
    dispatch_form(app, FormEvent::FieldEdited { field, text })
}
