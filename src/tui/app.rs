//! Application state for the TUI.

use crate::form::{FormField, OrderForm};
use crate::models::orderbook::{OrderbookRow, OrderbookViewModel};
use crate::models::{Asset, Side};
use crate::tui::input::TextInput;

/// Which pane owns keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// Depth table; arrows move the row selection.
    #[default]
    Book,
    /// Side selector in the order panel.
    SideSelect,
    /// One of the three numeric inputs.
    Field(FormField),
}

impl Focus {
    /// Cycles focus forward through book, side, price, quantity, notional.
    pub fn next(self) -> Self {
        match self {
            Focus::Book => Focus::SideSelect,
            Focus::SideSelect => Focus::Field(FormField::Price),
            Focus::Field(FormField::Price) => Focus::Field(FormField::Quantity),
            Focus::Field(FormField::Quantity) => Focus::Field(FormField::Notional),
            Focus::Field(FormField::Notional) => Focus::Book,
        }
    }

    /// Cycles focus backward.
    pub fn previous(self) -> Self {
        match self {
            Focus::Book => Focus::Field(FormField::Notional),
            Focus::SideSelect => Focus::Book,
            Focus::Field(FormField::Price) => Focus::SideSelect,
            Focus::Field(FormField::Quantity) => Focus::Field(FormField::Price),
            Focus::Field(FormField::Notional) => Focus::Field(FormField::Quantity),
        }
    }
}

/// Which half of the depth table the row selection is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BookColumn {
    #[default]
    Bids,
    Asks,
}

impl BookColumn {
    /// Side implied by activating a price in this column: hitting a bid
    /// price preps a BUY, an ask price preps a SELL.
    pub fn side(self) -> Side {
        match self {
            BookColumn::Bids => Side::Buy,
            BookColumn::Asks => Side::Sell,
        }
    }
}

/// Row selection inside the depth table, indexed in display order
/// (best row first for both columns).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BookSelection {
    pub column: BookColumn,
    pub index: usize,
}

/// Editable text mirrors of the form's numeric fields.
#[derive(Clone, Debug, Default)]
pub struct FieldInputs {
    pub price: TextInput,
    pub quantity: TextInput,
    pub notional: TextInput,
}

impl FieldInputs {
    /// Returns the input backing a form field.
    pub fn get_mut(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::Price => &mut self.price,
            FormField::Quantity => &mut self.quantity,
            FormField::Notional => &mut self.notional,
        }
    }

    /// Immutable access, used by rendering.
    pub fn get(&self, field: FormField) -> &TextInput {
        match field {
            FormField::Price => &self.price,
            FormField::Quantity => &self.quantity,
            FormField::Notional => &self.notional,
        }
    }
}

/// Central application state container.
pub struct App {
    /// Asset whose book is displayed.
    pub asset: Asset,
    /// Latest built view model, kept through a refresh until replaced.
    pub orderbook: Option<OrderbookViewModel>,
    /// True from an asset change until its first snapshot lands.
    pub book_loading: bool,
    /// Book fetch failure banner, independent of the form's messages.
    pub book_error: Option<String>,
    /// Bumped on every asset change; fetch resolutions carrying an older
    /// generation are stale and dropped.
    pub book_generation: u64,

    /// The order-entry reconciliation engine.
    pub form: OrderForm,
    /// Text inputs mirroring the engine's field state.
    pub inputs: FieldInputs,

    /// Keyboard focus.
    pub focus: Focus,
    /// Row selection in the depth table.
    pub selection: BookSelection,
    /// Source of auto-submit idempotency tokens.
    auto_submit_seq: u64,

    /// Flag to signal that the application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App showing the given asset.
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            orderbook: None,
            book_loading: true,
            book_error: None,
            book_generation: 0,
            form: OrderForm::new(asset),
            inputs: FieldInputs::default(),
            focus: Focus::default(),
            selection: BookSelection::default(),
            auto_submit_seq: 0,
            should_quit: false,
        }
    }

    /// Switches to the next asset. The form engine is deliberately not
    /// reset; only its stamped asset changes.
    pub fn cycle_asset(&mut self) {
        self.asset.toggle();
        self.book_generation += 1;
        self.book_loading = true;
        self.book_error = None;
        self.selection = BookSelection::default();
    }

    /// Issues the next auto-submit token. Tokens start at 1 so the
    /// engine's initial consumed marker (0) never matches a real one.
    pub fn next_auto_submit_token(&mut self) -> u64 {
        self.auto_submit_seq += 1;
        self.auto_submit_seq
    }

    /// Rows of the selected column in display order (best first).
    fn selected_column_len(&self) -> usize {
        let Some(book) = &self.orderbook else {
            return 0;
        };
        match self.selection.column {
            BookColumn::Bids => book.bids.rows.len(),
            BookColumn::Asks => book.asks.rows.len(),
        }
    }

    /// The row under the selection cursor, if any.
    ///
    /// Both sides are stored ascending; bids display best-to-worst, so
    /// their display index counts down from the end of the rows.
    pub fn selected_row(&self) -> Option<&OrderbookRow> {
        let book = self.orderbook.as_ref()?;
        match self.selection.column {
            BookColumn::Bids => {
                let rows = &book.bids.rows;
                rows.get(rows.len().checked_sub(1 + self.selection.index)?)
            }
            BookColumn::Asks => book.asks.rows.get(self.selection.index),
        }
    }

    /// Moves the selection down one row.
    pub fn select_next(&mut self) {
        let len = self.selected_column_len();
        if self.selection.index + 1 < len {
            self.selection.index += 1;
        }
    }

    /// Moves the selection up one row.
    pub fn select_previous(&mut self) {
        self.selection.index = self.selection.index.saturating_sub(1);
    }

    /// Moves the selection to the other column, keeping the row index.
    pub fn select_column(&mut self, column: BookColumn) {
        if self.selection.column != column {
            self.selection.column = column;
            self.clamp_selection();
        }
    }

    /// Keeps the selection inside the freshly rebuilt rows.
    pub fn clamp_selection(&mut self) {
        let len = self.selected_column_len();
        if len == 0 {
            self.selection.index = 0;
        } else if self.selection.index >= len {
            self.selection.index = len - 1;
        }
    }

    /// Mirrors the engine's field text into the editable inputs after a
    /// transition rewrote any of them (derived recomputation, prefill,
    /// auto-submit normalization, post-success clearing).
    pub fn sync_inputs(&mut self) {
        if self.inputs.price.as_str() != self.form.state.price {
            let text = self.form.state.price.clone();
            self.inputs.price.set(&text);
        }
        if self.inputs.quantity.as_str() != self.form.state.quantity {
            let text = self.form.state.quantity.clone();
            self.inputs.quantity.set(&text);
        }
        if self.inputs.notional.as_str() != self.form.state.notional {
            let text = self.form.state.notional.clone();
            self.inputs.notional.set(&text);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Asset::Btc)
    }
}
