use std::time::{SystemTime, UNIX_EPOCH};

/// One executed trade. Created at the moment of execution, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub buyer_order_id: u64,
    pub seller_order_id: u64,
    pub price: i64,
    pub quantity: u64,
    /// Nanoseconds, assigned at append time, non-decreasing across the ledger.
    pub timestamp: u64,
}

/// Append-only record of executed trades. Append order is chronological
/// order; there is no mutation or deletion surface.
#[derive(Debug)]
pub struct TradeLedger {
    trades: Vec<Trade>,
    clock: fn() -> u64,
    last_timestamp: u64,
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::with_clock(now_nanos)
    }

    /// A ledger stamping trades from a caller-supplied clock. Timestamps are
    /// clamped so the recorded sequence stays non-decreasing even if the
    /// clock steps backwards.
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            trades: Vec::new(),
            clock,
            last_timestamp: 0,
        }
    }

    pub(crate) fn record(
        &mut self,
        buyer_order_id: u64,
        seller_order_id: u64,
        price: i64,
        quantity: u64,
    ) {
        debug_assert!(quantity > 0);

        let timestamp = (self.clock)().max(self.last_timestamp);
        self.last_timestamp = timestamp;

        self.trades.push(Trade {
            buyer_order_id,
            seller_order_id,
            price,
            quantity,
            timestamp,
        });
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl Default for TradeLedger {
    fn default() -> Self {
        Self::new()
    }
}
