// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Translation of locally queued payloads into remote record shapes.
//!
//! Optional fields that were never set locally are omitted from the wire
//! record entirely, not serialized as null.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use gd_core::movement::{QueuedDispatch, QueuedReceive};

/// Remote row shape for a new movement created from a queued dispatch.
#[derive(Debug, Serialize)]
struct MovementInsert<'a> {
    destination: &'a str,
    item: &'a str,
    bundles_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pieces_per_bundle: Option<u32>,
    sender_id: &'a str,
    sender_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fare: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fare_paid_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accompanied_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transport: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    status: &'static str,
    dispatched_at: DateTime<Utc>,
}

/// Remote patch shape marking a movement received.
#[derive(Debug, Serialize)]
struct ReceivePatch<'a> {
    status: &'static str,
    received_at: DateTime<Utc>,
    receiver_id: &'a str,
    receiver_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition_notes: Option<&'a str>,
}

/// Build the remote insert record for a queued dispatch.
///
/// The queue timestamp doubles as the dispatch time: the record describes
/// when the user submitted the dispatch, not when it reached the server.
pub fn dispatch_to_insert(item: &QueuedDispatch) -> serde_json::Result<Value> {
    let payload = &item.payload;
    serde_json::to_value(MovementInsert {
        destination: payload.destination.as_str(),
        item: payload.item.as_str(),
        bundles_count: payload.bundles_count,
        pieces_per_bundle: payload.pieces_per_bundle,
        sender_id: &payload.sender_id,
        sender_name: &payload.sender_name,
        fare: payload.fare,
        fare_paid_by: payload.fare_paid_by.as_deref(),
        accompanied_by: payload.accompanied_by.as_deref(),
        transport: payload.transport.as_deref(),
        notes: payload.notes.as_deref(),
        status: "dispatched",
        dispatched_at: item.queued_at,
    })
}

/// Build the remote status patch for a queued receive.
pub fn receive_to_patch(item: &QueuedReceive) -> serde_json::Result<Value> {
    let payload = &item.payload;
    serde_json::to_value(ReceivePatch {
        status: "received",
        received_at: payload.received_at,
        receiver_id: &payload.receiver_id,
        receiver_name: &payload.receiver_name,
        condition_notes: payload.condition_notes.as_deref(),
    })
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
