use crate::order::{Order, OrderType, Side};

pub(crate) const ARENA_NULL: u32 = u32::MAX;

const DEFAULT_CAPACITY: u32 = 65_536;

#[derive(Clone)]
#[repr(C, align(64))]
pub(crate) struct OrderNode {
    pub(crate) id: u64,
    pub(crate) price: i64,
    pub(crate) quantity: u64,
    pub(crate) filled: u64,
    /// Insertion sequence assigned by the book; ties at equal price resolve
    /// by this value through the FIFO chain.
    pub(crate) seq: u64,
    pub(crate) prev: u32,
    pub(crate) next: u32,
    pub(crate) symbol: u32,
    pub(crate) side: Side,
    _pad: [u8; 11],
}

impl OrderNode {
    fn zeroed() -> Self {
        Self {
            id: 0,
            price: 0,
            quantity: 0,
            filled: 0,
            seq: 0,
            prev: ARENA_NULL,
            next: ARENA_NULL,
            symbol: 0,
            side: Side::Buy,
            _pad: [0u8; 11],
        }
    }

    pub(crate) fn from_order(order: &Order, seq: u64) -> Self {
        Self {
            id: order.id,
            price: order.price,
            quantity: order.quantity,
            filled: order.filled,
            seq,
            prev: ARENA_NULL,
            next: ARENA_NULL,
            symbol: order.symbol,
            side: order.side,
            _pad: [0u8; 11],
        }
    }

    /// Only limit orders rest in the book, so the kind is always `Limit`.
    pub(crate) fn to_order(&self) -> Order {
        Order {
            id: self.id,
            symbol: self.symbol,
            side: self.side,
            kind: OrderType::Limit,
            price: self.price,
            quantity: self.quantity,
            filled: self.filled,
        }
    }

    pub(crate) fn remaining(&self) -> u64 {
        self.quantity - self.filled
    }
}

impl std::fmt::Debug for OrderNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderNode")
            .field("id", &self.id)
            .field("price", &self.price)
            .field("quantity", &self.quantity)
            .field("filled", &self.filled)
            .field("seq", &self.seq)
            .field("prev", &self.prev)
            .field("next", &self.next)
            .field("symbol", &self.symbol)
            .field("side", &self.side)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PriceLevel {
    pub(crate) head: u32,
    pub(crate) tail: u32,
    pub(crate) count: u32,
}

impl PriceLevel {
    pub(crate) fn new() -> Self {
        Self {
            head: ARENA_NULL,
            tail: ARENA_NULL,
            count: 0,
        }
    }
}

/// Growable slab of order nodes with an intrusive free list. Freed slots are
/// reused before the backing storage grows.
#[derive(Debug)]
pub(crate) struct Arena {
    storage: Vec<OrderNode>,
    free_head: u32,
    count: u32,
}

impl Arena {
    pub(crate) fn new(capacity: u32) -> Self {
        let mut storage = Vec::with_capacity(capacity as usize);
        for i in 0..capacity {
            let mut node = OrderNode::zeroed();
            node.next = if i + 1 < capacity { i + 1 } else { ARENA_NULL };
            storage.push(node);
        }
        Self {
            storage,
            free_head: if capacity > 0 { 0 } else { ARENA_NULL },
            count: 0,
        }
    }

    pub(crate) fn default_capacity() -> u32 {
        DEFAULT_CAPACITY
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn alloc(&mut self, order: &Order, seq: u64) -> u32 {
        let node = OrderNode::from_order(order, seq);
        let index = if self.free_head != ARENA_NULL {
            let index = self.free_head;
            self.free_head = self.storage[index as usize].next;
            self.storage[index as usize] = node;
            index
        } else {
            self.storage.push(node);
            (self.storage.len() - 1) as u32
        };
        self.count += 1;
        index
    }

    pub(crate) fn dealloc(&mut self, index: u32) {
        debug_assert!((index as usize) < self.storage.len());
        self.storage[index as usize].next = self.free_head;
        self.free_head = index;
        self.count -= 1;
    }

    pub(crate) fn get(&self, index: u32) -> &OrderNode {
        &self.storage[index as usize]
    }

    pub(crate) fn get_mut(&mut self, index: u32) -> &mut OrderNode {
        &mut self.storage[index as usize]
    }

    pub(crate) fn push_back(&mut self, level: &mut PriceLevel, index: u32) {
        if level.tail != ARENA_NULL {
            let old_tail = level.tail;
            debug_assert!(self.storage[old_tail as usize].seq < self.storage[index as usize].seq);
            self.storage[old_tail as usize].next = index;
            self.storage[index as usize].prev = old_tail;
        } else {
            level.head = index;
            self.storage[index as usize].prev = ARENA_NULL;
        }

        self.storage[index as usize].next = ARENA_NULL;
        level.tail = index;
        level.count += 1;
    }

    pub(crate) fn pop_front(&mut self, level: &mut PriceLevel) -> Option<u32> {
        if level.head == ARENA_NULL {
            return None;
        }

        let index = level.head;
        let next = self.storage[index as usize].next;

        if next != ARENA_NULL {
            self.storage[next as usize].prev = ARENA_NULL;
            level.head = next;
        } else {
            level.head = ARENA_NULL;
            level.tail = ARENA_NULL;
        }

        level.count -= 1;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_order(id: u64, price: i64, qty: u64) -> Order {
        Order::limit(id, 1, Side::Buy, price, qty).unwrap()
    }

    #[test]
    fn ordernode_size_and_alignment() {
        assert_eq!(std::mem::size_of::<OrderNode>(), 64);
        assert_eq!(std::mem::align_of::<OrderNode>(), 64);
    }

    #[test]
    fn ordernode_roundtrip() {
        let order = Order::limit(1, 2, Side::Sell, 100, 50).unwrap();
        let node = OrderNode::from_order(&order, 7);
        let back = node.to_order();
        assert_eq!(back, order);
        assert_eq!(node.seq, 7);
    }

    #[test]
    fn arena_alloc_dealloc_cycle() {
        let mut arena = Arena::new(4);
        let i0 = arena.alloc(&make_order(1, 100, 10), 0);
        let i1 = arena.alloc(&make_order(2, 101, 20), 1);
        let i2 = arena.alloc(&make_order(3, 102, 30), 2);
        let i3 = arena.alloc(&make_order(4, 103, 40), 3);

        assert_eq!(arena.count(), 4);
        assert_eq!(i0, 0);
        assert_eq!(i1, 1);
        assert_eq!(i2, 2);
        assert_eq!(i3, 3);

        arena.dealloc(i1);
        arena.dealloc(i3);
        assert_eq!(arena.count(), 2);

        let i4 = arena.alloc(&make_order(5, 104, 50), 4);
        let i5 = arena.alloc(&make_order(6, 105, 60), 5);
        assert_eq!(arena.count(), 4);
        assert_eq!(i4, 3);
        assert_eq!(i5, 1);
    }

    #[test]
    fn arena_grows_past_initial_capacity() {
        let mut arena = Arena::new(2);
        arena.alloc(&make_order(1, 100, 10), 0);
        arena.alloc(&make_order(2, 101, 20), 1);
        let i2 = arena.alloc(&make_order(3, 102, 30), 2);
        assert_eq!(i2, 2);
        assert_eq!(arena.count(), 3);
        assert_eq!(arena.get(i2).id, 3);
    }

    #[test]
    fn arena_zero_capacity_grows() {
        let mut arena = Arena::new(0);
        let i0 = arena.alloc(&make_order(1, 100, 10), 0);
        assert_eq!(i0, 0);
        assert_eq!(arena.count(), 1);
    }

    #[test]
    fn push_back_builds_fifo_chain() {
        let mut arena = Arena::new(8);
        let mut level = PriceLevel::new();

        let i0 = arena.alloc(&make_order(1, 100, 10), 0);
        let i1 = arena.alloc(&make_order(2, 100, 20), 1);
        let i2 = arena.alloc(&make_order(3, 100, 30), 2);

        arena.push_back(&mut level, i0);
        arena.push_back(&mut level, i1);
        arena.push_back(&mut level, i2);

        assert_eq!(level.head, i0);
        assert_eq!(level.tail, i2);
        assert_eq!(level.count, 3);
        assert_eq!(arena.get(i0).next, i1);
        assert_eq!(arena.get(i1).prev, i0);
        assert_eq!(arena.get(i1).next, i2);
        assert_eq!(arena.get(i2).prev, i1);
    }

    #[test]
    fn pop_front_preserves_arrival_order() {
        let mut arena = Arena::new(8);
        let mut level = PriceLevel::new();

        let i0 = arena.alloc(&make_order(1, 100, 10), 0);
        let i1 = arena.alloc(&make_order(2, 100, 20), 1);
        arena.push_back(&mut level, i0);
        arena.push_back(&mut level, i1);

        assert_eq!(arena.pop_front(&mut level), Some(i0));
        assert_eq!(level.head, i1);
        assert_eq!(arena.pop_front(&mut level), Some(i1));
        assert_eq!(level.head, ARENA_NULL);
        assert_eq!(level.tail, ARENA_NULL);
        assert_eq!(level.count, 0);
    }

    #[test]
    fn pop_front_empty_level() {
        let mut arena = Arena::new(4);
        let mut level = PriceLevel::new();
        assert_eq!(arena.pop_front(&mut level), None);
    }
}
