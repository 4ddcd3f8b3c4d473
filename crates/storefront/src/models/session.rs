//! Session keys for per-visitor storefront state.

/// Session keys.
pub mod keys {
    /// Shopify cart GID.
    pub const CART_ID: &str = "cart_id";

    /// Quiz progress, `{ "current_step": u8, "answers": {...} }`.
    pub const QUIZ_STATE: &str = "quiz_state";
}
