//! Cart query and mutations.

operation!(
    GetCart,
    get_cart,
    "CartQuery",
    concat!(
        "query CartQuery($cartId: ID!) { cart(id: $cartId) { ",
        cart_fields!(),
        " } }"
    )
);

operation!(
    CreateCart,
    create_cart,
    "CartCreate",
    concat!(
        "mutation CartCreate($input: CartInput!) { cartCreate(input: $input) { ",
        cart_payload_fields!(),
        " } }"
    )
);

operation!(
    AddCartLines,
    add_cart_lines,
    "CartLinesAdd",
    concat!(
        "mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) { ",
        "cartLinesAdd(cartId: $cartId, lines: $lines) { ",
        cart_payload_fields!(),
        " } }"
    )
);

operation!(
    UpdateCartLines,
    update_cart_lines,
    "CartLinesUpdate",
    concat!(
        "mutation CartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) { ",
        "cartLinesUpdate(cartId: $cartId, lines: $lines) { ",
        cart_payload_fields!(),
        " } }"
    )
);

operation!(
    RemoveCartLines,
    remove_cart_lines,
    "CartLinesRemove",
    concat!(
        "mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!) { ",
        "cartLinesRemove(cartId: $cartId, lineIds: $lineIds) { ",
        cart_payload_fields!(),
        " } }"
    )
);

operation!(
    UpdateCartDiscountCodes,
    update_cart_discount_codes,
    "CartDiscountCodesUpdate",
    concat!(
        "mutation CartDiscountCodesUpdate($cartId: ID!, $discountCodes: [String!]) { ",
        "cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) { ",
        cart_payload_fields!(),
        " } }"
    )
);

operation!(
    UpdateCartGiftCardCodes,
    update_cart_gift_card_codes,
    "CartGiftCardCodesUpdate",
    concat!(
        "mutation CartGiftCardCodesUpdate($cartId: ID!, $giftCardCodes: [String!]!) { ",
        "cartGiftCardCodesUpdate(cartId: $cartId, giftCardCodes: $giftCardCodes) { ",
        cart_payload_fields!(),
        " } }"
    )
);

pub mod get_cart {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartFields;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartFields>,
    }
}

pub mod create_cart {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartPayload;
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CartInput {
        pub lines: Vec<CartLineInput>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub discount_codes: Vec<String>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CartInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_create: Option<CartPayload>,
    }
}

pub mod add_cart_lines {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartPayload;
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_add: Option<CartPayload>,
    }
}

pub mod update_cart_lines {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartPayload;
    use crate::shopify::types::CartLineUpdateInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineUpdateInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_update: Option<CartPayload>,
    }
}

pub mod remove_cart_lines {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartPayload;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_remove: Option<CartPayload>,
    }
}

pub mod update_cart_discount_codes {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartPayload;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub discount_codes: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_discount_codes_update: Option<CartPayload>,
    }
}

pub mod update_cart_gift_card_codes {
    use serde::{Deserialize, Serialize};

    use super::super::fields::CartPayload;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub gift_card_codes: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_gift_card_codes_update: Option<CartPayload>,
    }
}
