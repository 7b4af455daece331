use std::collections::HashMap;

use crate::arena::{ARENA_NULL, Arena, OrderNode, PriceLevel};
use crate::order::{Order, Side};

/// Resting limit orders for one instrument, split into bid and ask sides.
///
/// Each side keeps a FIFO price level per price, so matching priority is
/// `(price, arrival)`: best price first, earliest insertion first within a
/// price. Orders leave the book exactly when `filled == quantity`; there is
/// no other removal path.
#[derive(Debug)]
pub struct OrderBook {
    bids: HashMap<i64, PriceLevel>,
    asks: HashMap<i64, PriceLevel>,
    best_bid: Option<i64>,
    best_ask: Option<i64>,
    order_index: HashMap<u64, u32>,
    arena: Arena,
    next_seq: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity(Arena::default_capacity())
    }

    pub fn with_capacity(arena_capacity: u32) -> Self {
        Self {
            bids: HashMap::new(),
            asks: HashMap::new(),
            best_bid: None,
            best_ask: None,
            order_index: HashMap::with_capacity(arena_capacity as usize),
            arena: Arena::new(arena_capacity),
            next_seq: 0,
        }
    }

    /// Highest resting bid price, if any.
    pub fn best_bid(&self) -> Option<i64> {
        self.best_bid
    }

    /// Lowest resting ask price, if any.
    pub fn best_ask(&self) -> Option<i64> {
        self.best_ask
    }

    pub fn order_count(&self) -> usize {
        self.order_index.len()
    }

    pub fn is_empty(&self, side: Side) -> bool {
        match side {
            Side::Buy => self.bids.is_empty(),
            Side::Sell => self.asks.is_empty(),
        }
    }

    /// Current state of a resting order. `None` once the order has been
    /// fully filled and removed (or was never inserted).
    pub fn get(&self, order_id: u64) -> Option<Order> {
        let index = *self.order_index.get(&order_id)?;
        Some(self.arena.get(index).to_order())
    }

    /// Inserts a limit order at the back of its price level. The caller
    /// guarantees a well-formed limit order; no validation happens here.
    pub(crate) fn insert_order(&mut self, order: &Order) {
        debug_assert!(
            !self.order_index.contains_key(&order.id),
            "duplicate order id {}",
            order.id,
        );

        let seq = self.next_seq;
        self.next_seq += 1;

        let Self {
            bids,
            asks,
            arena,
            order_index,
            ..
        } = self;

        let index = arena.alloc(order, seq);

        let levels = match order.side {
            Side::Buy => bids,
            Side::Sell => asks,
        };
        let level = levels.entry(order.price).or_insert_with(PriceLevel::new);
        arena.push_back(level, index);

        order_index.insert(order.id, index);

        self.update_best_after_insert(order.side, order.price);

        debug_assert_eq!(self.arena.count() as usize, self.order_index.len());
    }

    /// Highest-priority resting order on `side`: best price, earliest arrival.
    pub(crate) fn peek_best(&self, side: Side) -> Option<&OrderNode> {
        let (levels, best) = match side {
            Side::Buy => (&self.bids, self.best_bid),
            Side::Sell => (&self.asks, self.best_ask),
        };
        let level = levels.get(&best?)?;
        if level.head == ARENA_NULL {
            return None;
        }
        Some(self.arena.get(level.head))
    }

    /// Applies `fill_qty` to the highest-priority order on `side` and returns
    /// its remaining quantity. A fully filled order is removed immediately;
    /// emptied price levels are dropped and the best price recomputed.
    ///
    /// The caller guarantees `0 < fill_qty <= remaining` of the best order.
    /// Returns `None` when the side is empty.
    pub(crate) fn fill_best(&mut self, side: Side, fill_qty: u64) -> Option<u64> {
        let Self {
            bids,
            asks,
            arena,
            order_index,
            best_bid,
            best_ask,
            ..
        } = self;

        let (levels, best) = match side {
            Side::Buy => (bids, best_bid),
            Side::Sell => (asks, best_ask),
        };

        let price = (*best)?;
        let level = levels.get_mut(&price)?;
        debug_assert!(level.head != ARENA_NULL);

        let head_idx = level.head;
        let front = arena.get_mut(head_idx);
        debug_assert!(fill_qty > 0 && fill_qty <= front.remaining());

        front.filled += fill_qty;
        let remaining = front.remaining();

        if remaining == 0 {
            let removed_id = front.id;
            arena.pop_front(level);
            arena.dealloc(head_idx);
            order_index.remove(&removed_id);

            if level.count == 0 {
                levels.remove(&price);
                *best = match side {
                    Side::Buy => levels.keys().copied().max(),
                    Side::Sell => levels.keys().copied().min(),
                };
            }
        }

        debug_assert_eq!(arena.count() as usize, order_index.len());
        Some(remaining)
    }

    fn update_best_after_insert(&mut self, side: Side, price: i64) {
        match side {
            Side::Buy => {
                self.best_bid = Some(self.best_bid.map_or(price, |b| b.max(price)));
            }
            Side::Sell => {
                self.best_ask = Some(self.best_ask.map_or(price, |a| a.min(price)));
            }
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
