// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Domain models for goods movements between the godown and the shops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Where a bundle is headed.
///
/// The godown is the warehouse; the two shops are the retail endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Godown,
    BigShop,
    SmallShop,
}

impl Destination {
    /// Returns the string representation used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Godown => "godown",
            Destination::BigShop => "big_shop",
            Destination::SmallShop => "small_shop",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Destination {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "godown" => Ok(Destination::Godown),
            "big_shop" => Ok(Destination::BigShop),
            "small_shop" => Ok(Destination::SmallShop),
            _ => Err(Error::InvalidDestination(s.to_string())),
        }
    }
}

/// Kind of bundled goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Shirt,
    Pant,
}

impl Item {
    /// Returns the string representation used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Item::Shirt => "shirt",
            Item::Pant => "pant",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Item {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "shirt" => Ok(Item::Shirt),
            "pant" => Ok(Item::Pant),
            _ => Err(Error::InvalidItem(s.to_string())),
        }
    }
}

/// Lifecycle status of a movement.
///
/// Every movement starts `dispatched`; confirming arrival flips it to
/// `received`. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    Dispatched,
    Received,
}

impl MovementStatus {
    /// Returns the string representation used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementStatus::Dispatched => "dispatched",
            MovementStatus::Received => "received",
        }
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MovementStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dispatched" => Ok(MovementStatus::Dispatched),
            "received" => Ok(MovementStatus::Received),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A dispatch as submitted from the form, before the remote has seen it.
///
/// Optional fields that were left blank stay `None` and are omitted (not
/// nulled) when the record is translated for the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchDraft {
    pub destination: Destination,
    pub item: Item,
    pub bundles_count: u32,
    pub pieces_per_bundle: Option<u32>,
    pub sender_id: String,
    pub sender_name: String,
    /// Transport fare in rupees, if agreed up front.
    pub fare: Option<i64>,
    pub fare_paid_by: Option<String>,
    pub accompanied_by: Option<String>,
    pub transport: Option<String>,
    pub notes: Option<String>,
}

/// A receipt confirmation as submitted from the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveDraft {
    pub received_at: DateTime<Utc>,
    pub receiver_id: String,
    pub receiver_name: String,
    pub condition_notes: Option<String>,
}

/// A dispatch persisted in the local queue, awaiting remote replay.
///
/// Immutable intent: after creation only the `synced` flag ever changes, and
/// rows are deleted once synced and cleaned up.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedDispatch {
    /// Store-assigned key, unique within the dispatch queue table.
    pub local_id: i64,
    /// Workspace-wide monotonic sequence; replay order is by `seq`, not by
    /// any storage engine's key-assignment behavior.
    pub seq: i64,
    pub payload: DispatchDraft,
    pub queued_at: DateTime<Utc>,
    pub synced: bool,
}

/// A receipt confirmation persisted in the local queue.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedReceive {
    pub local_id: i64,
    pub seq: i64,
    /// Remote identifier of the movement being marked received.
    pub movement_id: String,
    pub payload: ReceiveDraft,
    pub queued_at: DateTime<Utc>,
    pub synced: bool,
}

/// A movement record as the remote store knows it.
///
/// Cached locally for offline reads; never a source of truth for writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    pub destination: Destination,
    pub item: Item,
    pub bundles_count: u32,
    pub status: MovementStatus,
    pub dispatched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
    pub sender_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A staff member, cached for offline display of sender/receiver pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
#[path = "movement_tests.rs"]
mod tests;
