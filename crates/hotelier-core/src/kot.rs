//! # Kitchen Order Ticket (KOT) Diff
//!
//! When a table's order is edited, the kitchen only needs the delta: what is
//! new, what changed quantity, what was cancelled. This module computes that
//! delta from the previous and the current order snapshot.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  old: Tea×2, Rice×1              new: Tea×3, Dal×1                      │
//! │                                                                         │
//! │  1. Walk NEW in snapshot order                                         │
//! │     Tea  old 2 → new 3   ──► Tea  "+1"  update                         │
//! │     Dal  not in old      ──► Dal  "+1"  new                            │
//! │                                                                         │
//! │  2. Walk OLD in snapshot order, keep what NEW lacks                    │
//! │     Rice not in new      ──► Rice "0"   cancel                         │
//! │                                                                         │
//! │  Unchanged quantities emit nothing.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Order
//! A snapshot is an insertion-ordered name → quantity map. A repeated name
//! keeps the position of its first occurrence and, under
//! [`DuplicatePolicy::LastWriteWins`], the quantity of its last.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};
use ts_rs::TS;

use crate::config::{DuplicatePolicy, KotConfig};
use crate::error::{CoreError, CoreResult};
use crate::types::{ChangeKind, ChangeRecord, OrderLineItem};

// =============================================================================
// Order Snapshot
// =============================================================================

/// Insertion-ordered name → quantity map of one order state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSnapshot {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl OrderSnapshot {
    /// Builds a snapshot where a repeated name takes its last quantity.
    pub fn last_write_wins(items: &[OrderLineItem]) -> Self {
        let mut snapshot = OrderSnapshot::with_capacity(items.len());
        for item in items {
            snapshot.upsert(item);
        }
        snapshot
    }

    /// Builds a snapshot, resolving repeated names with `policy`.
    pub fn from_items(items: &[OrderLineItem], policy: DuplicatePolicy) -> CoreResult<Self> {
        match policy {
            DuplicatePolicy::LastWriteWins => Ok(OrderSnapshot::last_write_wins(items)),
            DuplicatePolicy::Reject => {
                let mut snapshot = OrderSnapshot::with_capacity(items.len());
                for item in items {
                    if snapshot.index.contains_key(&item.name) {
                        return Err(CoreError::DuplicateItem {
                            name: item.name.clone(),
                        });
                    }
                    snapshot.upsert(item);
                }
                Ok(snapshot)
            }
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        OrderSnapshot {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn upsert(&mut self, item: &OrderLineItem) {
        match self.index.get(&item.name) {
            Some(&position) => {
                trace!(name = %item.name, qty = item.qty, "Duplicate order line, last write wins");
                self.entries[position].1 = item.qty;
            }
            None => {
                self.index.insert(item.name.clone(), self.entries.len());
                self.entries.push((item.name.clone(), item.qty));
            }
        }
    }

    /// Quantity recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.index.get(name).map(|&position| self.entries[position].1)
    }

    /// Entries in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Diff
// =============================================================================

/// Computes the KOT delta with the default duplicate policy (last write wins).
///
/// ## Example
/// ```rust
/// use hotelier_core::kot::diff_orders;
/// use hotelier_core::types::{ChangeKind, OrderLineItem};
///
/// let old = [OrderLineItem::new("Tea", 2), OrderLineItem::new("Rice", 1)];
/// let new = [OrderLineItem::new("Tea", 3), OrderLineItem::new("Dal", 1)];
///
/// let changes = diff_orders(&old, &new);
/// let summary: Vec<_> = changes
///     .iter()
///     .map(|c| (c.name.as_str(), c.delta_label.as_str(), c.kind))
///     .collect();
/// assert_eq!(
///     summary,
///     [
///         ("Tea", "+1", ChangeKind::Update),
///         ("Dal", "+1", ChangeKind::New),
///         ("Rice", "0", ChangeKind::Cancel),
///     ]
/// );
/// ```
pub fn diff_orders(old_items: &[OrderLineItem], new_items: &[OrderLineItem]) -> Vec<ChangeRecord> {
    diff_snapshots(
        &OrderSnapshot::last_write_wins(old_items),
        &OrderSnapshot::last_write_wins(new_items),
    )
}

/// Computes the KOT delta, honouring the configured duplicate policy.
pub fn diff_orders_with(
    old_items: &[OrderLineItem],
    new_items: &[OrderLineItem],
    config: &KotConfig,
) -> CoreResult<Vec<ChangeRecord>> {
    let old = OrderSnapshot::from_items(old_items, config.duplicates)?;
    let new = OrderSnapshot::from_items(new_items, config.duplicates)?;
    Ok(diff_snapshots(&old, &new))
}

/// Delta between two snapshots: new/update records in `new` order, then
/// cancel records in `old` order.
pub fn diff_snapshots(old: &OrderSnapshot, new: &OrderSnapshot) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for (name, new_qty) in new.iter() {
        match old.get(name) {
            None => changes.push(ChangeRecord::new(name, format!("+{}", new_qty), ChangeKind::New)),
            Some(old_qty) => {
                // Widened so the difference of any two quantities fits.
                let delta = i64::from(new_qty) - i64::from(old_qty);
                if delta > 0 {
                    changes.push(ChangeRecord::new(name, format!("+{}", delta), ChangeKind::Update));
                } else if delta < 0 {
                    changes.push(ChangeRecord::new(name, delta.to_string(), ChangeKind::Update));
                }
            }
        }
    }

    for (name, _) in old.iter() {
        if new.get(name).is_none() {
            changes.push(ChangeRecord::new(name, "0", ChangeKind::Cancel));
        }
    }

    debug!(
        old_lines = old.len(),
        new_lines = new.len(),
        changes = changes.len(),
        "KOT delta computed"
    );

    changes
}

// =============================================================================
// Summary
// =============================================================================

/// Line counts of a KOT delta, for the ticket header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct KotSummary {
    pub added: usize,
    pub updated: usize,
    pub cancelled: usize,
}

impl KotSummary {
    pub fn from_changes(changes: &[ChangeRecord]) -> Self {
        changes
            .iter()
            .fold(KotSummary::default(), |mut summary, change| {
                match change.kind {
                    ChangeKind::New => summary.added += 1,
                    ChangeKind::Update => summary.updated += 1,
                    ChangeKind::Cancel => summary.cancelled += 1,
                }
                summary
            })
    }

    /// Nothing for the kitchen; the ticket need not be printed.
    pub fn is_empty(&self) -> bool {
        self.added + self.updated + self.cancelled == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
