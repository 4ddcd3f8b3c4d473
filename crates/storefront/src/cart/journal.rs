//! Per-cart record of confirmed state and in-flight mutations.
//!
//! Every mutation and every cart read takes a sequence number from one
//! counter when it starts. A confirmed cart is only replaced by a response
//! whose request started later, so a slow reply can never overwrite a
//! newer one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use parking_lot::Mutex;
use tracing::debug;

use lumen_core::CartId;

use super::{CartMutation, CartProjection, project};
use crate::shopify::Cart;

/// How long an idle cart stays in the journal.
const CONFIRMED_TTI: Duration = Duration::from_secs(60 * 60);

const MAX_CARTS: u64 = 10_000;

/// Start position of a cart read, see [`CartJournal::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(u64);

/// Handle for one in-flight mutation, returned by [`CartJournal::begin`].
///
/// Dropping the ticket without calling [`CartJournal::finish`] (a cancelled
/// request, a panic) discards the overlay.
#[must_use = "a ticket must be passed to `CartJournal::finish`"]
pub struct Ticket {
    journal: Arc<JournalInner>,
    cart_id: CartId,
    id: u64,
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("cart_id", &self.cart_id)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        let mut pending = self.journal.pending.lock();
        if release(&mut pending, &self.cart_id, self.id) {
            debug!(cart_id = %self.cart_id, ticket = self.id, "Cart mutation abandoned");
        }
    }
}

/// Confirmed carts and pending mutations, shared by all requests.
#[derive(Clone)]
pub struct CartJournal {
    inner: Arc<JournalInner>,
}

#[derive(Clone)]
struct Confirmed {
    seq: u64,
    cart: Arc<Cart>,
}

struct JournalInner {
    confirmed: Cache<CartId, Confirmed>,
    /// Also serialises writes to `confirmed`.
    pending: Mutex<HashMap<CartId, Vec<(u64, CartMutation)>>>,
    next_seq: AtomicU64,
}

impl JournalInner {
    fn next(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Caller holds the `pending` lock.
    fn store(&self, seq: u64, cart: Cart) -> bool {
        if self
            .confirmed
            .get(&cart.id)
            .is_some_and(|current| current.seq > seq)
        {
            debug!(cart_id = %cart.id, seq, "Stale cart response ignored");
            return false;
        }
        self.confirmed.insert(
            cart.id.clone(),
            Confirmed {
                seq,
                cart: Arc::new(cart),
            },
        );
        true
    }
}

/// Remove ticket `id` from the queue of `cart_id`; false if already gone.
fn release(
    pending: &mut HashMap<CartId, Vec<(u64, CartMutation)>>,
    cart_id: &CartId,
    id: u64,
) -> bool {
    let Some(queue) = pending.get_mut(cart_id) else {
        return false;
    };
    let before = queue.len();
    queue.retain(|(queued, _)| *queued != id);
    let removed = queue.len() != before;
    if queue.is_empty() {
        pending.remove(cart_id);
    }
    removed
}

impl Default for CartJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl CartJournal {
    #[must_use]
    pub fn new() -> Self {
        let confirmed = Cache::builder()
            .max_capacity(MAX_CARTS)
            .time_to_idle(CONFIRMED_TTI)
            .build();

        Self {
            inner: Arc::new(JournalInner {
                confirmed,
                pending: Mutex::new(HashMap::new()),
                next_seq: AtomicU64::new(1),
            }),
        }
    }

    /// Queue a mutation about to be sent to Shopify.
    pub fn begin(&self, cart_id: &CartId, mutation: CartMutation) -> Ticket {
        let id = self.inner.next();
        debug!(cart_id = %cart_id, ticket = id, action = mutation.action(), "Cart mutation started");
        self.inner
            .pending
            .lock()
            .entry(cart_id.clone())
            .or_default()
            .push((id, mutation));
        Ticket {
            journal: Arc::clone(&self.inner),
            cart_id: cart_id.clone(),
            id,
        }
    }

    /// Drop the mutation's overlay, recording the cart Shopify returned on
    /// success. A failure simply reverts to the last confirmed cart.
    pub fn finish<E>(&self, ticket: Ticket, result: &Result<Cart, E>) {
        let mut pending = self.inner.pending.lock();
        match result {
            Ok(cart) => {
                self.inner.store(ticket.id, cart.clone());
            }
            Err(_) => {
                debug!(cart_id = %ticket.cart_id, ticket = ticket.id, "Cart mutation overlay discarded");
            }
        }
        release(&mut pending, &ticket.cart_id, ticket.id);
    }

    /// Taken before reading a cart from Shopify; pass it to [`record`].
    ///
    /// [`record`]: Self::record
    #[must_use]
    pub fn mark(&self) -> Mark {
        Mark(self.inner.next())
    }

    /// Store a cart read that started at `mark`. Returns false when a newer
    /// response is already recorded.
    pub fn record(&self, cart: Cart, mark: Mark) -> bool {
        let _pending = self.inner.pending.lock();
        self.inner.store(mark.0, cart)
    }

    #[must_use]
    pub fn confirmed(&self, cart_id: &CartId) -> Option<Arc<Cart>> {
        self.inner.confirmed.get(cart_id).map(|entry| entry.cart)
    }

    /// Mutations still in flight, oldest first.
    #[must_use]
    pub fn pending(&self, cart_id: &CartId) -> Vec<CartMutation> {
        self.inner
            .pending
            .lock()
            .get(cart_id)
            .map(|queue| queue.iter().map(|(_, m)| m.clone()).collect())
            .unwrap_or_default()
    }

    /// Confirmed cart with pending mutations applied.
    #[must_use]
    pub fn projection(&self, cart_id: &CartId) -> CartProjection {
        let (confirmed, pending) = {
            let pending = self.inner.pending.lock();
            let queue: Vec<CartMutation> = pending
                .get(cart_id)
                .map(|queue| queue.iter().map(|(_, m)| m.clone()).collect())
                .unwrap_or_default();
            (self.confirmed(cart_id), queue)
        };
        let mut view = project(confirmed.as_deref(), &pending);
        if view.cart_id.is_none() {
            view.cart_id = Some(cart_id.clone());
        }
        view
    }

    /// Forget a cart Shopify no longer knows about.
    pub fn forget(&self, cart_id: &CartId) {
        let mut pending = self.inner.pending.lock();
        pending.remove(cart_id);
        self.inner.confirmed.invalidate(cart_id);
    }
}
