//! Order-entry reconciliation engine.
//!
//! The form is modeled as an explicit reducer: every interaction is a
//! [`FormEvent`] applied through [`OrderForm::apply`], which updates the
//! state and may emit a [`FormCommand`] for the caller to execute. The
//! derived-field rule (quantity and notional reconciled through price)
//! runs as a step inside the transition, never as an ambient side effect,
//! so no two recomputations can interleave.
//!
//! Submission is asynchronous: `apply` never performs I/O. A returned
//! [`FormCommand::Submit`] is run by the orchestration layer, which feeds
//! the outcome back in as [`FormEvent::SubmissionResolved`].

use crate::models::trade::{TradeRequest, TradeResponse};
use crate::models::{Asset, OrderType, Side};
use crate::numeric::{round, to_display_string};

/// Fractional digits carried by every submitted numeric field.
const SUBMIT_DECIMALS: u32 = 6;

/// Editable numeric fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Price,
    Quantity,
    Notional,
}

impl FormField {
    /// Lowercase name used in per-field validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Price => "price",
            FormField::Quantity => "quantity",
            FormField::Notional => "notional",
        }
    }
}

/// Which of quantity/notional the user edited last. The other field is
/// derived from it whenever the price allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrivingField {
    #[default]
    None,
    Quantity,
    Notional,
}

/// Free-text field contents plus the selected side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub side: Side,
    pub price: String,
    pub quantity: String,
    pub notional: String,
}

/// Last-known validity per numeric field, tracked independently of the
/// field text. Empty text is provisionally valid; the submit-time check
/// enforces non-empty and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidity {
    pub price: bool,
    pub quantity: bool,
    pub notional: bool,
}

impl FieldValidity {
    fn all(&self) -> bool {
        self.price && self.quantity && self.notional
    }
}

impl Default for FieldValidity {
    fn default() -> Self {
        Self {
            price: true,
            quantity: true,
            notional: true,
        }
    }
}

/// Where a submission came from; success/error wording differs per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOrigin {
    /// The user pressed submit on the form.
    Manual,
    /// A price in the depth table was activated.
    Orderbook,
}

/// Events consumed by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A keystroke changed one of the numeric fields.
    FieldEdited { field: FormField, text: String },
    /// The side selector changed. No recomputation.
    SideChanged(Side),
    /// The displayed asset changed. The engine is not reset.
    AssetChanged(Asset),
    /// The user asked to place the order as entered.
    SubmitRequested,
    /// A price in the depth table was activated; fills side and price
    /// immediately without submitting.
    Prefill { side: Side, price: f64 },
    /// An auto-submit request carrying a fresh idempotency token.
    AutoSubmitTriggered {
        token: u64,
        side: Side,
        price: Option<f64>,
    },
    /// The async submission attempt resolved.
    SubmissionResolved {
        origin: SubmitOrigin,
        token: Option<u64>,
        result: Result<TradeResponse, String>,
    },
    /// The success banner was dismissed.
    SuccessDismissed,
    /// The error banner was dismissed.
    ErrorDismissed,
}

/// Commands emitted by the reducer for the caller to run.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    /// Run the async submission and feed the outcome back as
    /// [`FormEvent::SubmissionResolved`] with the same origin and token.
    Submit {
        request: TradeRequest,
        origin: SubmitOrigin,
        token: Option<u64>,
    },
}

/// The order-entry engine: state machine owning side, price, quantity,
/// and notional.
#[derive(Debug, Clone)]
pub struct OrderForm {
    /// Asset stamped onto outgoing requests.
    pub asset: Asset,
    pub state: FormState,
    pub validity: FieldValidity,
    pub driving: DrivingField,
    /// True while a submission is in flight; overlapping submissions are
    /// rejected on both paths.
    pub submitting: bool,
    /// Last consumed auto-submit token. Tokens are consumed when the
    /// attempt resolves, or immediately when the trigger no-ops.
    last_auto_submit_token: u64,
    /// Transient success banner.
    pub success: Option<String>,
    /// Transient error banner.
    pub error: Option<String>,
}

impl OrderForm {
    /// Creates a fresh form: empty numeric fields, side BUY.
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            state: FormState::default(),
            validity: FieldValidity::default(),
            driving: DrivingField::None,
            submitting: false,
            last_auto_submit_token: 0,
            success: None,
            error: None,
        }
    }

    /// Applies one event to the form, returning a command when a
    /// submission must run.
    pub fn apply(&mut self, event: FormEvent) -> Option<FormCommand> {
        match event {
            FormEvent::FieldEdited { field, text } => {
                self.edit_field(field, text);
                None
            }
            FormEvent::SideChanged(side) => {
                self.state.side = side;
                None
            }
            FormEvent::AssetChanged(asset) => {
                self.asset = asset;
                None
            }
            FormEvent::SubmitRequested => self.submit(),
            FormEvent::Prefill { side, price } => {
                self.prefill(side, price);
                None
            }
            FormEvent::AutoSubmitTriggered { token, side, price } => {
                self.auto_submit(token, side, price)
            }
            FormEvent::SubmissionResolved {
                origin,
                token,
                result,
            } => {
                self.resolve(origin, token, result);
                None
            }
            FormEvent::SuccessDismissed => {
                self.success = None;
                None
            }
            FormEvent::ErrorDismissed => {
                self.error = None;
                None
            }
        }
    }

    /// Per-field validation message for rendering under the input, or
    /// `None` when the field's last edit was valid.
    pub fn field_error(&self, field: FormField) -> Option<String> {
        let valid = match field {
            FormField::Price => self.validity.price,
            FormField::Quantity => self.validity.quantity,
            FormField::Notional => self.validity.notional,
        };
        if valid {
            None
        } else {
            Some(format!("{} must be > 0", field.label()))
        }
    }

    fn edit_field(&mut self, field: FormField, text: String) {
        let valid = field_is_valid(&text);
        match field {
            FormField::Price => {
                self.state.price = text;
                self.validity.price = valid;
            }
            FormField::Quantity => {
                self.state.quantity = text;
                self.validity.quantity = valid;
                self.driving = DrivingField::Quantity;
            }
            FormField::Notional => {
                self.state.notional = text;
                self.validity.notional = valid;
                self.driving = DrivingField::Notional;
            }
        }
        self.reconcile();
    }

    /// Recomputes the derived field from the driving one.
    ///
    /// Runs only when price and the driving value are both positive;
    /// otherwise fields are left as typed. The price > 0 guard also
    /// keeps the notional/price division from ever executing on a
    /// non-positive price.
    fn reconcile(&mut self) {
        let price = parse_or_zero(&self.state.price);
        if price <= 0.0 {
            return;
        }
        match self.driving {
            DrivingField::Quantity => {
                let quantity = parse_or_zero(&self.state.quantity);
                if quantity > 0.0 {
                    self.state.notional = to_display_string(quantity * price, SUBMIT_DECIMALS);
                }
            }
            DrivingField::Notional => {
                let notional = parse_or_zero(&self.state.notional);
                if notional > 0.0 {
                    self.state.quantity = to_display_string(notional / price, SUBMIT_DECIMALS);
                }
            }
            DrivingField::None => {}
        }
    }

    /// Manual submission. Local checks run in order price, quantity,
    /// notional; a failed check surfaces a message and never reaches the
    /// network.
    fn submit(&mut self) -> Option<FormCommand> {
        self.success = None;
        self.error = None;

        if self.submitting {
            self.error = Some("An order is already being submitted.".to_string());
            return None;
        }
        if !self.validity.all() {
            self.error = Some("Please fix the highlighted fields.".to_string());
            return None;
        }

        let price = parse_or_zero(&self.state.price);
        let quantity = parse_or_zero(&self.state.quantity);
        let notional = parse_or_zero(&self.state.notional);

        if price <= 0.0 {
            self.error = Some("Price must be greater than 0 for a LIMIT order.".to_string());
            return None;
        }
        if quantity <= 0.0 {
            self.error = Some("Quantity must be greater than 0.".to_string());
            return None;
        }
        if notional <= 0.0 {
            self.error = Some("Notional must be greater than 0.".to_string());
            return None;
        }

        self.submitting = true;
        Some(FormCommand::Submit {
            request: self.build_request(self.state.side, price, quantity, notional),
            origin: SubmitOrigin::Manual,
            token: None,
        })
    }

    /// Price-click prefill: side and price are written immediately and
    /// the derived field follows the usual reconciliation rule. Validity
    /// flags are untouched and nothing is submitted.
    fn prefill(&mut self, side: Side, price: f64) {
        self.state.side = side;
        self.state.price = price.to_string();
        self.reconcile();
    }

    /// Auto-submission from the depth table.
    ///
    /// An already-consumed token is a no-op. Missing price or
    /// non-positive quantity/price consume the token and exit silently
    /// so stale UI state never surfaces spurious errors. A fresh token
    /// arriving while a submission is in flight is left unconsumed.
    fn auto_submit(&mut self, token: u64, side: Side, price: Option<f64>) -> Option<FormCommand> {
        if token == self.last_auto_submit_token {
            return None;
        }

        let Some(price) = price else {
            self.last_auto_submit_token = token;
            return None;
        };

        if self.submitting {
            return None;
        }

        let quantity = parse_or_zero(&self.state.quantity);
        if quantity <= 0.0 || price <= 0.0 {
            self.last_auto_submit_token = token;
            return None;
        }

        let notional = quantity * price;

        // Normalize the visible fields to what is actually submitted.
        self.state.side = side;
        self.state.price = to_display_string(price, SUBMIT_DECIMALS);
        self.state.quantity = to_display_string(quantity, SUBMIT_DECIMALS);
        self.state.notional = to_display_string(notional, SUBMIT_DECIMALS);

        self.success = None;
        self.error = None;
        self.submitting = true;
        Some(FormCommand::Submit {
            request: self.build_request(side, price, quantity, notional),
            origin: SubmitOrigin::Orderbook,
            token: Some(token),
        })
    }

    /// Completes a submission attempt. An auto-submit token is consumed
    /// here, after the attempt resolved, so a second distinct trigger
    /// arriving mid-flight was never marked consumed by mistake.
    fn resolve(
        &mut self,
        origin: SubmitOrigin,
        token: Option<u64>,
        result: Result<TradeResponse, String>,
    ) {
        self.submitting = false;
        if let Some(token) = token {
            self.last_auto_submit_token = token;
        }

        match (origin, result) {
            (SubmitOrigin::Manual, Ok(response)) => {
                self.success = Some(format!(
                    "Order placed successfully (id={}, side={}, qty={}).",
                    response.id, response.side, response.quantity
                ));
                // Price and side are retained for rapid re-entry.
                self.state.quantity.clear();
                self.state.notional.clear();
            }
            (SubmitOrigin::Orderbook, Ok(response)) => {
                self.success = Some(format!(
                    "Order placed from orderbook (id={}, side={}, qty={}).",
                    response.id, response.side, response.quantity
                ));
            }
            (_, Err(message)) => {
                self.error = Some(message);
            }
        }
    }

    fn build_request(&self, side: Side, price: f64, quantity: f64, notional: f64) -> TradeRequest {
        TradeRequest {
            asset: self.asset,
            side,
            order_type: OrderType::Limit,
            quantity: round(quantity, SUBMIT_DECIMALS),
            price: Some(round(price, SUBMIT_DECIMALS)),
            notional: round(notional, SUBMIT_DECIMALS),
        }
    }
}

/// Empty text is provisionally valid; anything else must parse to a
/// finite positive number.
fn field_is_valid(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || trimmed
            .parse::<f64>()
            .is_ok_and(|value| value.is_finite() && value > 0.0)
}

/// Numeric reading of field text: empty or malformed text maps to zero,
/// which every positivity guard then rejects.
fn parse_or_zero(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
