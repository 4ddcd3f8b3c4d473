//! Cart type conversion functions.
//!
//! Every cart query and mutation selects the same cart fields, so a single
//! conversion covers all of them.

use crate::shopify::types::{
    AppliedGiftCard, Cart, CartCost, CartDiscountCode, CartLine, CartMerchandise, CartUserError,
};

use super::super::queries::fields::{CartFields, CartLineFields, UserErrorFields};
use super::convert_image;
use super::products::convert_selected_option;

fn convert_cart_line(line: CartLineFields) -> CartLine {
    let merchandise = line.merchandise;
    CartLine {
        id: line.id,
        quantity: line.quantity,
        unit_price: line.cost.amount_per_quantity.0,
        compare_at_unit_price: line.cost.compare_at_amount_per_quantity.map(|p| p.0),
        total: line.cost.total_amount.0,
        merchandise: CartMerchandise {
            id: merchandise.id,
            title: merchandise.title,
            product_handle: merchandise.product.handle,
            product_title: merchandise.product.title,
            image: merchandise.image.map(convert_image),
            selected_options: merchandise
                .selected_options
                .into_iter()
                .map(convert_selected_option)
                .collect(),
        },
    }
}

pub fn convert_cart(cart: CartFields) -> Cart {
    Cart {
        id: cart.id,
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
        note: cart.note,
        cost: CartCost {
            subtotal: cart.cost.subtotal_amount.0,
            total: cart.cost.total_amount.0,
            total_tax: cart.cost.total_tax_amount.map(|p| p.0),
        },
        discount_codes: cart
            .discount_codes
            .into_iter()
            .map(|d| CartDiscountCode {
                code: d.code,
                applicable: d.applicable,
            })
            .collect(),
        applied_gift_cards: cart
            .applied_gift_cards
            .into_iter()
            .map(|g| AppliedGiftCard {
                id: g.id,
                last_characters: g.last_characters,
                amount_used: g.amount_used.0,
            })
            .collect(),
        lines: cart.lines.nodes.into_iter().map(convert_cart_line).collect(),
    }
}

pub fn convert_user_error(error: UserErrorFields) -> CartUserError {
    CartUserError {
        code: error.code,
        field: error.field,
        message: error.message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_json() -> serde_json::Value {
        serde_json::json!({
            "id": "gid://shopify/Cart/c1-abc?key=k1",
            "checkoutUrl": "https://lumen-test.myshopify.com/cart/c/c1-abc",
            "totalQuantity": 2,
            "note": null,
            "cost": {
                "subtotalAmount": { "amount": "49.8", "currencyCode": "EUR" },
                "totalAmount": { "amount": "49.8", "currencyCode": "EUR" },
                "totalTaxAmount": null
            },
            "discountCodes": [{ "code": "GLOW10", "applicable": false }],
            "appliedGiftCards": [],
            "lines": { "nodes": [{
                "id": "gid://shopify/CartLine/l1?cart=c1-abc",
                "quantity": 2,
                "cost": {
                    "amountPerQuantity": { "amount": "24.9", "currencyCode": "EUR" },
                    "compareAtAmountPerQuantity": null,
                    "totalAmount": { "amount": "49.8", "currencyCode": "EUR" }
                },
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/11",
                    "title": "30 ml",
                    "image": null,
                    "selectedOptions": [{ "name": "Size", "value": "30 ml" }],
                    "product": { "handle": "glow-serum", "title": "Glow Serum" }
                }
            }] }
        })
    }

    #[test]
    fn test_convert_cart() {
        let cart = convert_cart(serde_json::from_value(cart_json()).unwrap());

        assert_eq!(cart.id.as_str(), "gid://shopify/Cart/c1-abc?key=k1");
        assert_eq!(cart.total_quantity, 2);
        assert_eq!(cart.cost.subtotal.display(), "€49.80");
        assert!(!cart.discount_codes[0].applicable);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].merchandise.product_handle, "glow-serum");
        assert_eq!(cart.lines[0].unit_price.display(), "€24.90");
    }

    #[test]
    fn test_cart_with_foreign_line_id_is_rejected() {
        let mut json = cart_json();
        json["lines"]["nodes"][0]["id"] = serde_json::json!("gid://shopify/ProductVariant/1");
        assert!(serde_json::from_value::<CartFields>(json).is_err());
    }
}
