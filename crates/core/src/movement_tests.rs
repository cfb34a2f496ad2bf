// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the domain model types.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    godown = { "godown", Destination::Godown },
    big_shop = { "big_shop", Destination::BigShop },
    small_shop = { "small_shop", Destination::SmallShop },
    uppercase = { "BIG_SHOP", Destination::BigShop },
)]
fn test_destination_from_str(input: &str, expected: Destination) {
    assert_eq!(input.parse::<Destination>().unwrap(), expected);
}

#[test]
fn test_destination_invalid() {
    let err = "warehouse".parse::<Destination>().unwrap_err();
    assert!(matches!(err, Error::InvalidDestination(_)));
    assert!(err.to_string().contains("big_shop"));
}

#[parameterized(
    shirt = { "shirt", Item::Shirt },
    pant = { "pant", Item::Pant },
)]
fn test_item_from_str(input: &str, expected: Item) {
    assert_eq!(input.parse::<Item>().unwrap(), expected);
}

#[test]
fn test_item_invalid() {
    assert!(matches!(
        "sock".parse::<Item>(),
        Err(Error::InvalidItem(_))
    ));
}

#[parameterized(
    dispatched = { "dispatched", MovementStatus::Dispatched },
    received = { "received", MovementStatus::Received },
)]
fn test_status_from_str(input: &str, expected: MovementStatus) {
    assert_eq!(input.parse::<MovementStatus>().unwrap(), expected);
}

#[test]
fn test_status_display_roundtrip() {
    for status in [MovementStatus::Dispatched, MovementStatus::Received] {
        assert_eq!(status.to_string().parse::<MovementStatus>().unwrap(), status);
    }
}

#[test]
fn test_destination_serde_snake_case() {
    let json = serde_json::to_string(&Destination::BigShop).unwrap();
    assert_eq!(json, "\"big_shop\"");
}

#[test]
fn test_movement_optional_fields_omitted() {
    let movement = Movement {
        id: "mv-1".to_string(),
        destination: Destination::SmallShop,
        item: Item::Pant,
        bundles_count: 3,
        status: MovementStatus::Dispatched,
        dispatched_at: Utc::now(),
        received_at: None,
        sender_name: "Ravi".to_string(),
        receiver_name: None,
        notes: None,
    };

    let json = serde_json::to_string(&movement).unwrap();
    assert!(!json.contains("received_at"));
    assert!(!json.contains("receiver_name"));
    assert!(!json.contains("notes"));
}

#[test]
fn test_movement_deserializes_without_optionals() {
    let json = r#"{
        "id": "mv-1",
        "destination": "big_shop",
        "item": "shirt",
        "bundles_count": 5,
        "status": "received",
        "dispatched_at": "2026-01-10T08:30:00Z",
        "sender_name": "Ravi"
    }"#;

    let movement: Movement = serde_json::from_str(json).unwrap();
    assert_eq!(movement.status, MovementStatus::Received);
    assert!(movement.received_at.is_none());
}
