#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OrderType {
    Market,
    Limit,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: u64,
    pub symbol: u32,
    pub side: Side,
    pub kind: OrderType,
    /// Meaningful only for `Limit` orders; `Order::market` sets it to 0.
    pub price: i64,
    pub quantity: u64,
    pub filled: u64,
}

impl Order {
    pub fn limit(id: u64, symbol: u32, side: Side, price: i64, quantity: u64) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        Some(Self {
            id,
            symbol,
            side,
            kind: OrderType::Limit,
            price,
            quantity,
            filled: 0,
        })
    }

    pub fn market(id: u64, symbol: u32, side: Side, quantity: u64) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        Some(Self {
            id,
            symbol,
            side,
            kind: OrderType::Market,
            price: 0,
            quantity,
            filled: 0,
        })
    }

    pub fn remaining(&self) -> u64 {
        self.quantity - self.filled
    }

    pub fn is_filled(&self) -> bool {
        self.filled == self.quantity
    }
}
