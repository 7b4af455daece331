use crate::book::OrderBook;
use crate::ledger::TradeLedger;
use crate::order::{Order, OrderType, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Filled,
    /// Anything short of a full fill, including an order resting untouched
    /// with zero fill. There is no separate "open" status.
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitResult {
    pub order_id: u64,
    pub status: OrderStatus,
    pub filled: u64,
    pub remaining: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingError {
    /// Zero-quantity order, rejected before any state mutation.
    InvalidOrder,
    /// A market order exhausted the opposite side of the book. Partial fills
    /// executed before exhaustion stand; `remaining` is only the unmet part.
    InsufficientLiquidity { remaining: u64 },
}

impl std::fmt::Display for MatchingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrder => write!(f, "invalid order: quantity must be positive"),
            Self::InsufficientLiquidity { remaining } => {
                write!(f, "insufficient liquidity: {remaining} remaining")
            }
        }
    }
}

impl std::error::Error for MatchingError {}

/// Single-instrument matching engine: one order book, one trade ledger,
/// one synchronous entry point. The caller serializes `submit` calls; the
/// engine holds no locks and never suspends mid-pass.
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    ledger: TradeLedger,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            ledger: TradeLedger::new(),
        }
    }

    pub fn with_capacity(arena_capacity: u32) -> Self {
        Self {
            book: OrderBook::with_capacity(arena_capacity),
            ledger: TradeLedger::new(),
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Submits an order. Market orders sweep the opposite side immediately
    /// and never rest; limit orders enter the book and trigger a crossing
    /// pass. Only quantity is validated here; id uniqueness, symbol
    /// existence, and limit price positivity are the upstream validation
    /// layer's contract.
    pub fn submit(&mut self, order: Order) -> Result<SubmitResult, MatchingError> {
        if order.quantity == 0 {
            return Err(MatchingError::InvalidOrder);
        }

        match order.kind {
            OrderType::Market => self.execute_market_order(order),
            OrderType::Limit => self.execute_limit_order(order),
        }
    }

    /// Sweeps the opposite side best-first, executing at each resting
    /// order's price (a market order has no price of its own). Fills applied
    /// before liquidity runs out are not rolled back on error.
    fn execute_market_order(&mut self, mut order: Order) -> Result<SubmitResult, MatchingError> {
        let counter_side = order.side.opposite();
        let mut remaining = order.quantity;

        while remaining > 0 {
            let (maker_id, maker_price, fill_qty) = match self.book.peek_best(counter_side) {
                Some(maker) => (maker.id, maker.price, remaining.min(maker.remaining())),
                None => break,
            };

            let (buyer_id, seller_id) = match order.side {
                Side::Buy => (order.id, maker_id),
                Side::Sell => (maker_id, order.id),
            };
            self.ledger.record(buyer_id, seller_id, maker_price, fill_qty);
            self.book.fill_best(counter_side, fill_qty);

            order.filled += fill_qty;
            remaining -= fill_qty;
        }

        if remaining > 0 {
            return Err(MatchingError::InsufficientLiquidity { remaining });
        }

        Ok(SubmitResult {
            order_id: order.id,
            status: OrderStatus::Filled,
            filled: order.filled,
            remaining: 0,
        })
    }

    /// Inserts the order into its side of the book, then runs the crossing
    /// pass. The order's fill state is read back from the book afterwards;
    /// a fully filled order has already been removed.
    fn execute_limit_order(&mut self, order: Order) -> Result<SubmitResult, MatchingError> {
        let order_id = order.id;
        let quantity = order.quantity;

        self.book.insert_order(&order);
        self.cross_book();

        let filled = match self.book.get(order_id) {
            Some(resting) => resting.filled,
            None => quantity,
        };
        let status = if filled == quantity {
            OrderStatus::Filled
        } else {
            OrderStatus::Partial
        };

        Ok(SubmitResult {
            order_id,
            status,
            filled,
            remaining: quantity - filled,
        })
    }

    /// Executes while the spread is crossed (best bid >= best ask), always
    /// at the best ask's price: the resting sell limit is respected even
    /// when the sell side triggered the pass. Stops the instant the spread
    /// reopens or a side empties, so running it again without a new order
    /// produces no trades.
    fn cross_book(&mut self) {
        while let (Some(best_bid), Some(best_ask)) =
            (self.book.peek_best(Side::Buy), self.book.peek_best(Side::Sell))
        {
            if best_bid.price < best_ask.price {
                break;
            }

            let buyer_id = best_bid.id;
            let seller_id = best_ask.id;
            let execution_price = best_ask.price;
            let execution_qty = best_bid.remaining().min(best_ask.remaining());

            self.ledger
                .record(buyer_id, seller_id, execution_price, execution_qty);
            self.book.fill_best(Side::Buy, execution_qty);
            self.book.fill_best(Side::Sell, execution_qty);
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
