//! Reconciliation engine tests: derived-field recomputation, validity,
//! submit preconditions, the async submission lifecycle, and the
//! auto-submit idempotency token.

use bookdesk::form::{
    DrivingField, FormCommand, FormEvent, FormField, OrderForm, SubmitOrigin,
};
use bookdesk::models::trade::{TradeRequest, TradeResponse};
use bookdesk::models::{Asset, OrderType, Side};

fn form() -> OrderForm {
    OrderForm::new(Asset::Btc)
}

fn edit(form: &mut OrderForm, field: FormField, text: &str) -> Option<FormCommand> {
    form.apply(FormEvent::FieldEdited {
        field,
        text: text.to_string(),
    })
}

fn accepted(request: &TradeRequest) -> TradeResponse {
    TradeResponse {
        asset: request.asset,
        side: request.side,
        order_type: request.order_type,
        quantity: request.quantity,
        price: request.price,
        notional: request.notional,
        id: "order-123".to_string(),
        timestamp: 1234567890,
    }
}

fn resolve_ok(form: &mut OrderForm, command: &FormCommand) {
    let FormCommand::Submit {
        request,
        origin,
        token,
    } = command;
    let outcome = form.apply(FormEvent::SubmissionResolved {
        origin: *origin,
        token: *token,
        result: Ok(accepted(request)),
    });
    assert!(outcome.is_none());
}

// -- Derived recomputation --

#[test]
fn editing_quantity_derives_notional() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");
    assert_eq!(f.state.notional, "2000");
    assert_eq!(f.driving, DrivingField::Quantity);
}

#[test]
fn editing_notional_derives_quantity() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");
    edit(&mut f, FormField::Notional, "1000");
    assert_eq!(f.state.quantity, "0.05");
    assert_eq!(f.driving, DrivingField::Notional);
}

#[test]
fn price_edit_recomputes_from_driving_field() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0.5");
    // Nothing derived yet: no price.
    assert_eq!(f.state.notional, "");
    edit(&mut f, FormField::Price, "1000");
    assert_eq!(f.state.notional, "500");
    edit(&mut f, FormField::Price, "2000");
    assert_eq!(f.state.notional, "1000");
}

#[test]
fn non_positive_price_leaves_fields_as_typed() {
    let mut f = form();
    edit(&mut f, FormField::Price, "0");
    edit(&mut f, FormField::Quantity, "0.1");
    assert_eq!(f.state.notional, "");

    edit(&mut f, FormField::Price, "-5");
    assert_eq!(f.state.notional, "");
}

#[test]
fn derived_values_are_rounded_to_six_decimals() {
    let mut f = form();
    edit(&mut f, FormField::Price, "3");
    edit(&mut f, FormField::Notional, "1");
    assert_eq!(f.state.quantity, "0.333333");
}

// -- Field validity --

#[test]
fn validity_tracks_last_edit_per_field() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0");
    assert!(!f.validity.quantity);
    assert_eq!(
        f.field_error(FormField::Quantity).as_deref(),
        Some("quantity must be > 0")
    );

    edit(&mut f, FormField::Quantity, "abc");
    assert!(!f.validity.quantity);

    // Empty text is provisionally valid at the field level.
    edit(&mut f, FormField::Quantity, "");
    assert!(f.validity.quantity);
    assert!(f.field_error(FormField::Quantity).is_none());

    edit(&mut f, FormField::Quantity, "0.25");
    assert!(f.validity.quantity);
}

// -- Manual submission --

#[test]
fn submit_with_zero_fields_stays_local() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0");
    edit(&mut f, FormField::Notional, "0");

    assert_eq!(
        f.field_error(FormField::Quantity).as_deref(),
        Some("quantity must be > 0")
    );

    let command = f.apply(FormEvent::SubmitRequested);
    assert!(command.is_none(), "submission capability must not be invoked");
    assert_eq!(f.error.as_deref(), Some("Please fix the highlighted fields."));
    assert!(!f.submitting);
}

#[test]
fn submit_checks_price_then_quantity_then_notional() {
    // Empty fields are valid at the field level, so the submit-time
    // positivity checks produce the specific messages, price first.
    let mut f = form();
    let command = f.apply(FormEvent::SubmitRequested);
    assert!(command.is_none());
    assert_eq!(
        f.error.as_deref(),
        Some("Price must be greater than 0 for a LIMIT order.")
    );

    edit(&mut f, FormField::Price, "20000");
    let command = f.apply(FormEvent::SubmitRequested);
    assert!(command.is_none());
    assert_eq!(f.error.as_deref(), Some("Quantity must be greater than 0."));
}

#[test]
fn valid_submit_builds_rounded_limit_payload() {
    let mut f = form();
    f.apply(FormEvent::SideChanged(Side::Sell));
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");

    let command = f.apply(FormEvent::SubmitRequested).expect("command expected");
    let FormCommand::Submit {
        ref request,
        origin,
        token,
    } = command;
    assert_eq!(origin, SubmitOrigin::Manual);
    assert_eq!(token, None);
    assert_eq!(request.asset, Asset::Btc);
    assert_eq!(request.side, Side::Sell);
    assert_eq!(request.order_type, OrderType::Limit);
    assert_eq!(request.price, Some(20000.0));
    assert_eq!(request.quantity, 0.1);
    assert_eq!(request.notional, 2000.0);
    assert!(f.submitting);

    resolve_ok(&mut f, &command);
    assert!(!f.submitting);
    // Quantity and notional clear; price and side are retained.
    assert_eq!(f.state.quantity, "");
    assert_eq!(f.state.notional, "");
    assert_eq!(f.state.price, "20000");
    assert_eq!(f.state.side, Side::Sell);
    let success = f.success.expect("success message expected");
    assert!(success.contains("id=order-123"));
    assert!(success.contains("side=SELL"));
}

#[test]
fn rejected_submission_keeps_fields_and_surfaces_message() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");
    let command = f.apply(FormEvent::SubmitRequested).expect("command expected");
    let FormCommand::Submit { origin, token, .. } = command;

    f.apply(FormEvent::SubmissionResolved {
        origin,
        token,
        result: Err("Notional is invalid".to_string()),
    });
    assert!(!f.submitting);
    assert_eq!(f.error.as_deref(), Some("Notional is invalid"));
    assert_eq!(f.state.quantity, "0.1");
    assert_eq!(f.state.notional, "2000");
}

#[test]
fn overlapping_manual_submit_is_rejected() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");
    let first = f.apply(FormEvent::SubmitRequested);
    assert!(first.is_some());

    let second = f.apply(FormEvent::SubmitRequested);
    assert!(second.is_none());
    assert_eq!(
        f.error.as_deref(),
        Some("An order is already being submitted.")
    );
    // The first attempt is still in flight.
    assert!(f.submitting);
}

// -- Prefill --

#[test]
fn prefill_sets_side_and_price_without_submitting() {
    let mut f = form();
    let command = f.apply(FormEvent::Prefill {
        side: Side::Sell,
        price: 20001.0,
    });
    assert!(command.is_none());
    assert_eq!(f.state.side, Side::Sell);
    assert_eq!(f.state.price, "20001");
    assert!(!f.submitting);
}

#[test]
fn prefill_recomputes_derived_field() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0.2");
    f.apply(FormEvent::Prefill {
        side: Side::Buy,
        price: 1000.0,
    });
    assert_eq!(f.state.notional, "200");
}

// -- Auto-submission --

#[test]
fn repeated_token_never_double_submits() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0.1");

    let first = f.apply(FormEvent::AutoSubmitTriggered {
        token: 1,
        side: Side::Buy,
        price: Some(20000.0),
    });
    let command = first.expect("first trigger should submit");
    resolve_ok(&mut f, &command);

    let second = f.apply(FormEvent::AutoSubmitTriggered {
        token: 1,
        side: Side::Buy,
        price: Some(20000.0),
    });
    assert!(second.is_none(), "consumed token must be a no-op");
}

#[test]
fn distinct_tokens_submit_independently() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0.1");

    let first = f
        .apply(FormEvent::AutoSubmitTriggered {
            token: 1,
            side: Side::Buy,
            price: Some(20000.0),
        })
        .expect("first trigger should submit");
    resolve_ok(&mut f, &first);

    let second = f.apply(FormEvent::AutoSubmitTriggered {
        token: 2,
        side: Side::Sell,
        price: Some(19990.0),
    });
    assert!(second.is_some(), "fresh token should submit again");
}

#[test]
fn auto_submit_normalizes_fields_and_rounds_payload() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0.1");

    let command = f
        .apply(FormEvent::AutoSubmitTriggered {
            token: 1,
            side: Side::Sell,
            price: Some(20000.0),
        })
        .expect("command expected");

    assert_eq!(f.state.side, Side::Sell);
    assert_eq!(f.state.price, "20000");
    assert_eq!(f.state.quantity, "0.1");
    assert_eq!(f.state.notional, "2000");

    let FormCommand::Submit {
        ref request,
        origin,
        token,
    } = command;
    assert_eq!(origin, SubmitOrigin::Orderbook);
    assert_eq!(token, Some(1));
    assert_eq!(request.price, Some(20000.0));
    assert_eq!(request.quantity, 0.1);
    assert_eq!(request.notional, 2000.0);

    resolve_ok(&mut f, &command);
    let success = f.success.clone().expect("success message expected");
    assert!(success.contains("placed from orderbook"));
    // The auto path leaves the fields populated.
    assert_eq!(f.state.quantity, "0.1");
    assert_eq!(f.state.notional, "2000");
}

#[test]
fn auto_submit_without_price_consumes_token_silently() {
    let mut f = form();
    edit(&mut f, FormField::Quantity, "0.1");

    let command = f.apply(FormEvent::AutoSubmitTriggered {
        token: 1,
        side: Side::Buy,
        price: None,
    });
    assert!(command.is_none());
    assert!(f.error.is_none());

    // The token was consumed: re-delivery is a no-op even with a price.
    let retry = f.apply(FormEvent::AutoSubmitTriggered {
        token: 1,
        side: Side::Buy,
        price: Some(20000.0),
    });
    assert!(retry.is_none());
}

#[test]
fn auto_submit_with_unusable_quantity_is_silent() {
    let mut f = form();
    // Quantity never entered.
    let command = f.apply(FormEvent::AutoSubmitTriggered {
        token: 1,
        side: Side::Buy,
        price: Some(20000.0),
    });
    assert!(command.is_none());
    assert!(f.error.is_none(), "auto path must not surface an error");
    assert!(!f.submitting);
}

#[test]
fn token_stays_unconsumed_while_submission_in_flight() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");
    let manual = f.apply(FormEvent::SubmitRequested).expect("command expected");

    // A trigger lands mid-flight: rejected, but not marked consumed.
    let blocked = f.apply(FormEvent::AutoSubmitTriggered {
        token: 7,
        side: Side::Buy,
        price: Some(19995.0),
    });
    assert!(blocked.is_none());

    resolve_ok(&mut f, &manual);
    edit(&mut f, FormField::Quantity, "0.1");

    // The same token is still processable after the flight resolved.
    let retried = f.apply(FormEvent::AutoSubmitTriggered {
        token: 7,
        side: Side::Buy,
        price: Some(19995.0),
    });
    assert!(retried.is_some());
}

// -- Asset stamping --

#[test]
fn asset_change_does_not_reset_the_form() {
    let mut f = form();
    edit(&mut f, FormField::Price, "20000");
    edit(&mut f, FormField::Quantity, "0.1");
    f.apply(FormEvent::AssetChanged(Asset::Eth));
    assert_eq!(f.state.price, "20000");
    assert_eq!(f.state.quantity, "0.1");

    let command = f.apply(FormEvent::SubmitRequested).expect("command expected");
    let FormCommand::Submit { request, .. } = command;
    assert_eq!(request.asset, Asset::Eth);
}
