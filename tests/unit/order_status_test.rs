use std::str::FromStr;

use distriplast::modules::orders::models::OrderStatus;

#[test]
fn test_happy_path_transitions() {
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
    assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Invoiced));
    assert!(OrderStatus::Invoiced.can_transition_to(OrderStatus::Completed));
}

#[test]
fn test_no_skipping_states() {
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Invoiced));
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
    assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Completed));
}

#[test]
fn test_no_moving_backwards() {
    assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Pending));
    assert!(!OrderStatus::Invoiced.can_transition_to(OrderStatus::Confirmed));
    assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Invoiced));
}

#[test]
fn test_cancel_from_any_non_terminal_state() {
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Canceled));
    assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Canceled));
    assert!(OrderStatus::Invoiced.can_transition_to(OrderStatus::Canceled));
}

#[test]
fn test_terminal_states_stay_terminal() {
    assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Canceled));
    assert!(!OrderStatus::Canceled.can_transition_to(OrderStatus::Pending));
    assert!(!OrderStatus::Canceled.can_transition_to(OrderStatus::Completed));
    assert!(OrderStatus::Completed.is_terminal());
    assert!(OrderStatus::Canceled.is_terminal());
}

#[test]
fn test_same_status_is_a_no_op_transition() {
    for status in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Invoiced,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ] {
        assert!(status.can_transition_to(status));
    }
}

#[test]
fn test_round_trips_through_strings() {
    for status in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Invoiced,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ] {
        assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
    }

    assert!(OrderStatus::from_str("shipped").is_err());
}

#[test]
fn test_default_is_pending() {
    assert_eq!(OrderStatus::default(), OrderStatus::Pending);
}
