use order_book::OrderBookStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: OrderBookStore,
}

impl AppState {
    pub fn new(store: OrderBookStore) -> Self {
        Self { store }
    }
}
