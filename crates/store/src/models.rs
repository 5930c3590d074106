//! Database models mapping to the cafes schema.

use sqlx::FromRow;

/// Cafe record as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CafeRow {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    /// Free-form seating capacity, e.g. "20-30".
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    /// Free-form price, e.g. "£2.50". The only mutable field.
    pub coffee_price: Option<String>,
}

/// Fields for a cafe about to be created. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}
