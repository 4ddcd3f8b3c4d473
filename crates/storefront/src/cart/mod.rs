//! Optimistic cart view.
//!
//! Shopify is the source of truth for cart contents and prices. While a
//! mutation is in flight, pages render a [`CartProjection`]: the last
//! confirmed cart with every pending [`CartMutation`] applied on top.
//! Lines touched by a pending mutation are marked optimistic so their
//! controls stay disabled, and prices are only shown as confirmed once
//! Shopify answers.

mod journal;

pub use journal::{CartJournal, Mark, Ticket};

use lumen_core::{CartId, CartLineId, Price, ProductVariantId};

use crate::shopify::{Cart, CartLine, CartLineUpdateInput};

/// A line to add, with the title shown until Shopify confirms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub merchandise_id: ProductVariantId,
    pub quantity: u32,
    pub title: Option<String>,
}

/// A cart change sent to Shopify and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutation {
    AddLines(Vec<NewLine>),
    UpdateLines(Vec<CartLineUpdateInput>),
    RemoveLines(Vec<CartLineId>),
    UpdateDiscountCodes(Vec<String>),
    UpdateGiftCards(Vec<String>),
}

impl CartMutation {
    /// Name used in logs and Sentry breadcrumbs.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::AddLines(_) => "LinesAdd",
            Self::UpdateLines(_) => "LinesUpdate",
            Self::RemoveLines(_) => "LinesRemove",
            Self::UpdateDiscountCodes(_) => "DiscountCodesUpdate",
            Self::UpdateGiftCards(_) => "GiftCardCodesUpdate",
        }
    }
}

/// A cart line as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// `None` for a line Shopify has not created yet.
    pub id: Option<CartLineId>,
    pub merchandise_id: ProductVariantId,
    pub product_handle: Option<String>,
    pub title: String,
    pub variant_title: Option<String>,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub unit_price: Option<Price>,
    /// Confirmed line total, cleared once the quantity is touched.
    pub line_total: Option<Price>,
    pub optimistic: bool,
}

impl CartLineView {
    fn confirmed(line: &CartLine) -> Self {
        let variant_title = Some(line.merchandise.title.clone())
            .filter(|t| !t.is_empty() && t != "Default Title");
        Self {
            id: Some(line.id.clone()),
            merchandise_id: line.merchandise.id.clone(),
            product_handle: Some(line.merchandise.product_handle.clone()),
            title: line.merchandise.product_title.clone(),
            variant_title,
            image_url: line.merchandise.image.as_ref().map(|i| i.url.clone()),
            quantity: line.quantity,
            unit_price: Some(line.unit_price.clone()),
            line_total: Some(line.total.clone()),
            optimistic: false,
        }
    }

    fn pending(line: &NewLine) -> Self {
        Self {
            id: None,
            merchandise_id: line.merchandise_id.clone(),
            product_handle: None,
            title: line.title.clone().unwrap_or_else(|| "Adding to cart".to_string()),
            variant_title: None,
            image_url: None,
            quantity: line.quantity,
            unit_price: None,
            line_total: None,
            optimistic: true,
        }
    }

    fn touch(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.line_total = None;
        self.optimistic = true;
    }

    #[must_use]
    pub const fn decrease_disabled(&self) -> bool {
        self.quantity <= 1 || self.optimistic
    }

    #[must_use]
    pub const fn increase_disabled(&self) -> bool {
        self.optimistic
    }

    #[must_use]
    pub const fn remove_disabled(&self) -> bool {
        self.optimistic
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCodeView {
    pub code: String,
    /// `None` until Shopify has checked the code.
    pub applicable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCardView {
    pub last_characters: String,
    pub amount_used: Option<Price>,
    pub pending: bool,
}

/// Cart as rendered: confirmed state plus in-flight mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartProjection {
    pub cart_id: Option<CartId>,
    pub checkout_url: Option<String>,
    pub lines: Vec<CartLineView>,
    pub total_quantity: u32,
    /// Last subtotal confirmed by Shopify.
    pub subtotal: Option<Price>,
    /// The subtotal no longer reflects what is shown.
    pub subtotal_pending: bool,
    pub discount_codes: Vec<DiscountCodeView>,
    pub gift_cards: Vec<GiftCardView>,
}

impl CartProjection {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn has_optimistic_lines(&self) -> bool {
        self.lines.iter().any(|l| l.optimistic)
    }
}

/// Merge the confirmed cart with pending mutations, oldest first.
#[must_use]
pub fn project(confirmed: Option<&Cart>, pending: &[CartMutation]) -> CartProjection {
    let mut view = confirmed.map_or_else(CartProjection::empty, |cart| CartProjection {
        cart_id: Some(cart.id.clone()),
        checkout_url: Some(cart.checkout_url.clone()),
        lines: cart.lines.iter().map(CartLineView::confirmed).collect(),
        total_quantity: cart.total_quantity,
        subtotal: Some(cart.cost.subtotal.clone()),
        subtotal_pending: false,
        discount_codes: cart
            .discount_codes
            .iter()
            .map(|d| DiscountCodeView {
                code: d.code.clone(),
                applicable: Some(d.applicable),
            })
            .collect(),
        gift_cards: cart
            .applied_gift_cards
            .iter()
            .map(|g| GiftCardView {
                last_characters: g.last_characters.clone(),
                amount_used: Some(g.amount_used.clone()),
                pending: false,
            })
            .collect(),
    });

    if pending.is_empty() {
        return view;
    }

    let mut changed = false;
    for mutation in pending {
        changed |= apply(&mut view, mutation);
    }
    if changed {
        view.total_quantity = view.lines.iter().map(|l| l.quantity).sum();
        view.subtotal_pending = true;
    }
    view
}

/// Apply one mutation to the view; false if it touched nothing.
fn apply(view: &mut CartProjection, mutation: &CartMutation) -> bool {
    let mut changed = false;
    match mutation {
        CartMutation::AddLines(lines) => {
            for new in lines.iter().filter(|l| l.quantity > 0) {
                match view
                    .lines
                    .iter_mut()
                    .find(|l| l.merchandise_id == new.merchandise_id)
                {
                    Some(line) => line.touch(line.quantity.saturating_add(new.quantity)),
                    None => view.lines.push(CartLineView::pending(new)),
                }
                changed = true;
            }
        }
        CartMutation::UpdateLines(updates) => {
            for update in updates {
                if update.quantity == 0 {
                    let before = view.lines.len();
                    view.lines.retain(|l| l.id.as_ref() != Some(&update.id));
                    changed |= view.lines.len() != before;
                } else if let Some(line) = view
                    .lines
                    .iter_mut()
                    .find(|l| l.id.as_ref() == Some(&update.id))
                {
                    line.touch(update.quantity);
                    changed = true;
                }
            }
        }
        CartMutation::RemoveLines(ids) => {
            let before = view.lines.len();
            view.lines
                .retain(|l| l.id.as_ref().is_none_or(|id| !ids.contains(id)));
            changed = view.lines.len() != before;
        }
        CartMutation::UpdateDiscountCodes(codes) => {
            view.discount_codes = codes
                .iter()
                .map(|code| DiscountCodeView {
                    code: code.clone(),
                    applicable: None,
                })
                .collect();
            changed = true;
        }
        CartMutation::UpdateGiftCards(codes) => {
            view.gift_cards = codes
                .iter()
                .map(|code| GiftCardView {
                    last_characters: last_four(code),
                    amount_used: None,
                    pending: true,
                })
                .collect();
            changed = true;
        }
    }
    changed
}

fn last_four(code: &str) -> String {
    let chars: Vec<char> = code.chars().filter(|c| !c.is_whitespace()).collect();
    chars
        .iter()
        .skip(chars.len().saturating_sub(4))
        .collect()
}
