//! Cart route handlers.
//!
//! `POST /cart` is the single action endpoint: the `cart_action` field picks
//! the mutation. While a mutation is in flight the journal overlays it on the
//! last confirmed cart, so concurrent renders of the page, the drawer and the
//! count badge show the optimistic projection. The cart ID lives in the
//! session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{error, instrument, warn};

use lumen_core::{CartId, CartLineId, ProductVariantId};

use crate::cart::{CartMutation, CartProjection, NewLine};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session_keys;
use crate::quiz::FormFields;
use crate::routes::HxRequest;
use crate::shopify::{Cart, CartLineInput, CartLineUpdateInput, ShopifyError};
use crate::state::AppState;

const EXPIRED_MESSAGE: &str = "Your cart has expired. Please add your items again.";
const FAILED_MESSAGE: &str = "We couldn't update your cart. Please try again.";

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nonce: String,
    pub cart: CartProjection,
    pub error: Option<String>,
}

/// Cart lines fragment (HTMX), used by the page and the drawer.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartProjection,
    pub error: Option<String>,
}

/// Cart count badge fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Cart ID from the session. A value that no longer parses is ignored.
async fn session_cart_id(session: &Session) -> Result<Option<CartId>> {
    Ok(session
        .get::<String>(session_keys::CART_ID)
        .await?
        .and_then(|raw| raw.parse().ok()))
}

async fn drop_cart(state: &AppState, session: &Session, cart_id: &CartId) -> Result<()> {
    state.journal().forget(cart_id);
    session
        .remove::<String>(session_keys::CART_ID)
        .await
        .map(|_| ())
        .map_err(AppError::from)
}

/// The visitor's cart as rendered, read fresh from Shopify.
pub(crate) async fn current_projection(
    state: &AppState,
    session: &Session,
) -> Result<CartProjection> {
    match session_cart_id(session).await? {
        Some(cart_id) => refresh(state, session, &cart_id).await,
        None => Ok(CartProjection::empty()),
    }
}

/// Read the cart from Shopify into the journal. When Shopify cannot be
/// reached the last confirmed copy is shown instead.
async fn refresh(state: &AppState, session: &Session, cart_id: &CartId) -> Result<CartProjection> {
    let mark = state.journal().mark();
    match state.storefront().get_cart(cart_id).await {
        Ok(cart) => {
            state.journal().record(cart, mark);
        }
        Err(ShopifyError::NotFound(_)) => {
            warn!(cart_id = %cart_id, "Cart no longer exists");
            drop_cart(state, session, cart_id).await?;
            return Ok(CartProjection::empty());
        }
        Err(e) => warn!(cart_id = %cart_id, error = %e, "Failed to fetch cart"),
    }
    Ok(state.journal().projection(cart_id))
}

/// The cart right after a mutation. The mutation response is already the
/// confirmed copy, so Shopify is only asked when there is none.
async fn settled_projection(state: &AppState, session: &Session) -> Result<CartProjection> {
    match session_cart_id(session).await? {
        Some(cart_id) if state.journal().confirmed(&cart_id).is_some() => {
            Ok(state.journal().projection(&cart_id))
        }
        Some(cart_id) => refresh(state, session, &cart_id).await,
        None => Ok(CartProjection::empty()),
    }
}

// =============================================================================
// Form Parsing
// =============================================================================

/// Parse the posted fields into a cart mutation.
fn parse_mutation(fields: &FormFields) -> Result<CartMutation> {
    let action = fields
        .first("cart_action")
        .ok_or_else(|| AppError::BadRequest("missing cart_action".to_string()))?;

    match action {
        "LinesAdd" => {
            let merchandise_id: ProductVariantId = parse_field(fields, "merchandise_id")?;
            let quantity = match fields.first("quantity") {
                Some(raw) => parse_quantity(raw)?,
                None => 1,
            };
            if quantity == 0 {
                return Err(AppError::BadRequest(
                    "quantity must be at least 1".to_string(),
                ));
            }
            Ok(CartMutation::AddLines(vec![NewLine {
                merchandise_id,
                quantity,
                title: fields.first("title").map(str::to_string),
            }]))
        }
        "LinesUpdate" => {
            let id: CartLineId = parse_field(fields, "line_id")?;
            let quantity = fields
                .first("quantity")
                .ok_or_else(|| AppError::BadRequest("missing quantity".to_string()))
                .and_then(parse_quantity)?;
            Ok(CartMutation::UpdateLines(vec![CartLineUpdateInput {
                id,
                quantity,
            }]))
        }
        "LinesRemove" => {
            let ids = fields
                .all("line_id")
                .map(|raw| {
                    raw.parse::<CartLineId>()
                        .map_err(|e| AppError::BadRequest(format!("line_id: {e}")))
                })
                .collect::<Result<Vec<_>>>()?;
            if ids.is_empty() {
                return Err(AppError::BadRequest("missing line_id".to_string()));
            }
            Ok(CartMutation::RemoveLines(ids))
        }
        "DiscountCodesUpdate" => Ok(CartMutation::UpdateDiscountCodes(codes(
            fields,
            "discount_code",
        ))),
        "GiftCardCodesUpdate" => Ok(CartMutation::UpdateGiftCards(codes(
            fields,
            "gift_card_code",
        ))),
        other => Err(AppError::BadRequest(format!(
            "unknown cart_action: {other}"
        ))),
    }
}

fn parse_field<T>(fields: &FormFields, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    fields
        .first(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing {name}")))?
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{name}: {e}")))
}

fn parse_quantity(raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid quantity: {raw}")))
}

/// Trimmed, de-duplicated codes. An empty list clears the codes.
fn codes(fields: &FormFields, name: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in fields.all(name).map(str::trim) {
        if !codes.iter().any(|c| c.eq_ignore_ascii_case(code)) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Only same-site paths are accepted as post-action redirects.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

// =============================================================================
// Mutations
// =============================================================================

fn line_inputs(lines: &[NewLine]) -> Vec<CartLineInput> {
    lines
        .iter()
        .map(|l| CartLineInput {
            merchandise_id: l.merchandise_id.clone(),
            quantity: l.quantity,
        })
        .collect()
}

async fn send(
    state: &AppState,
    cart_id: &CartId,
    mutation: CartMutation,
) -> std::result::Result<Cart, ShopifyError> {
    let storefront = state.storefront();
    match mutation {
        CartMutation::AddLines(lines) => {
            storefront
                .add_cart_lines(cart_id, line_inputs(&lines))
                .await
        }
        CartMutation::UpdateLines(lines) => storefront.update_cart_lines(cart_id, lines).await,
        CartMutation::RemoveLines(ids) => storefront.remove_cart_lines(cart_id, ids).await,
        CartMutation::UpdateDiscountCodes(codes) => {
            storefront.update_discount_codes(cart_id, codes).await
        }
        CartMutation::UpdateGiftCards(codes) => {
            storefront.update_gift_card_codes(cart_id, codes).await
        }
    }
}

/// Create a cart holding `lines` and remember it in the session.
async fn create(state: &AppState, session: &Session, lines: &[NewLine]) -> Result<Option<String>> {
    let mark = state.journal().mark();
    match state.storefront().create_cart(line_inputs(lines)).await {
        Ok(cart) => {
            session
                .insert(session_keys::CART_ID, cart.id.as_str())
                .await?;
            state.journal().record(cart, mark);
            Ok(None)
        }
        Err(e) => Ok(Some(failure_message(&e))),
    }
}

/// Message shown inline for a failed mutation.
fn failure_message(err: &ShopifyError) -> String {
    match err {
        ShopifyError::UserError(message) => message.clone(),
        other => {
            error!(error = %other, "Cart mutation failed");
            FAILED_MESSAGE.to_string()
        }
    }
}

/// Run a mutation against the visitor's cart, returning the inline error
/// to show, if any.
async fn run(state: &AppState, session: &Session, mutation: CartMutation) -> Result<Option<String>> {
    let Some(cart_id) = session_cart_id(session).await? else {
        return match mutation {
            CartMutation::AddLines(lines) => create(state, session, &lines).await,
            _ => Ok(None),
        };
    };

    let ticket = state.journal().begin(&cart_id, mutation.clone());
    let result = send(state, &cart_id, mutation.clone()).await;
    state.journal().finish(ticket, &result);

    match result {
        Ok(_) => Ok(None),
        Err(ShopifyError::NotFound(_)) => {
            warn!(cart_id = %cart_id, "Cart no longer exists");
            drop_cart(state, session, &cart_id).await?;
            match mutation {
                CartMutation::AddLines(lines) => create(state, session, &lines).await,
                _ => Ok(Some(EXPIRED_MESSAGE.to_string())),
            }
        }
        Err(e) => Ok(Some(failure_message(&e))),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    Ok(CartShowTemplate {
        nonce,
        cart: current_projection(&state, &session).await?,
        error: None,
    })
}

/// Cart lines fragment (HTMX).
#[instrument(skip(state, session))]
pub async fn items(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    Ok(CartItemsTemplate {
        cart: current_projection(&state, &session).await?,
        error: None,
    })
}

/// Cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = current_projection(&state, &session).await?;
    Ok(CartCountTemplate {
        count: cart.total_quantity,
    })
}

/// Apply a cart action.
///
/// HTMX requests get the lines fragment plus a `cart-updated` trigger so the
/// badge refreshes. Plain form posts follow `redirect_to` when given, else
/// get the full cart page. Failed mutations still answer 200 with the last
/// confirmed cart and the error inline.
#[instrument(skip(state, session, nonce, pairs))]
pub async fn action(
    State(state): State<AppState>,
    session: Session,
    HxRequest(htmx): HxRequest,
    CspNonce(nonce): CspNonce,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let fields = FormFields::from(pairs);
    let mutation = parse_mutation(&fields)?;
    add_breadcrumb("cart", mutation.action(), &[]);

    let error = run(&state, &session, mutation).await?;
    let cart = settled_projection(&state, &session).await?;

    if htmx {
        return Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate { cart, error },
        )
            .into_response());
    }

    if error.is_none()
        && let Some(target) = fields.first("redirect_to").filter(|p| is_local_path(p))
    {
        return Ok(Redirect::to(target).into_response());
    }

    Ok(CartShowTemplate { nonce, cart, error }.into_response())
}

/// Redirect to Shopify checkout, or back to the cart when there is nothing
/// to check out.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let cart = current_projection(&state, &session).await?;
    Ok(match cart.checkout_url.filter(|_| !cart.lines.is_empty()) {
        Some(url) => Redirect::to(&url),
        None => Redirect::to("/cart"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::from(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_parse_lines_add_defaults_quantity() {
        let mutation = parse_mutation(&fields(&[
            ("cart_action", "LinesAdd"),
            ("merchandise_id", "gid://shopify/ProductVariant/7"),
            ("title", "Calming Serum"),
        ]))
        .unwrap();

        let CartMutation::AddLines(lines) = mutation else {
            panic!("expected AddLines");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 1);
        assert_eq!(
            lines.first().unwrap().title.as_deref(),
            Some("Calming Serum")
        );
    }

    #[test]
    fn test_parse_rejects_wrong_id_kind() {
        let err = parse_mutation(&fields(&[
            ("cart_action", "LinesAdd"),
            ("merchandise_id", "gid://shopify/Cart/7"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = parse_mutation(&fields(&[
            ("cart_action", "LinesUpdate"),
            ("line_id", "gid://shopify/CartLine/1"),
            ("quantity", "-2"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_update_to_zero_is_allowed() {
        let mutation = parse_mutation(&fields(&[
            ("cart_action", "LinesUpdate"),
            ("line_id", "gid://shopify/CartLine/1"),
            ("quantity", "0"),
        ]))
        .unwrap();
        assert!(matches!(
            mutation,
            CartMutation::UpdateLines(ref lines) if lines.first().unwrap().quantity == 0
        ));
    }

    #[test]
    fn test_parse_discount_codes_dedupes_and_clears() {
        let mutation = parse_mutation(&fields(&[
            ("cart_action", "DiscountCodesUpdate"),
            ("discount_code", " WELCOME10 "),
            ("discount_code", "welcome10"),
            ("discount_code", "SPRING"),
        ]))
        .unwrap();
        assert_eq!(
            mutation,
            CartMutation::UpdateDiscountCodes(vec!["WELCOME10".to_string(), "SPRING".to_string()])
        );

        let cleared = parse_mutation(&fields(&[("cart_action", "DiscountCodesUpdate")])).unwrap();
        assert_eq!(cleared, CartMutation::UpdateDiscountCodes(Vec::new()));
    }

    #[test]
    fn test_parse_unknown_action() {
        assert!(parse_mutation(&fields(&[("cart_action", "BuyerIdentityUpdate")])).is_err());
        assert!(parse_mutation(&fields(&[])).is_err());
    }

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/products/calming-serum"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
    }

    #[test]
    fn test_failure_message_passes_user_errors_through() {
        assert_eq!(
            failure_message(&ShopifyError::UserError("Code is invalid".to_string())),
            "Code is invalid"
        );
        assert_eq!(
            failure_message(&ShopifyError::GraphQL(Vec::new())),
            FAILED_MESSAGE
        );
    }
}
