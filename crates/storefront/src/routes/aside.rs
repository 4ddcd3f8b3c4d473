//! Overlay panel fragments (HTMX).
//!
//! One aside is open at a time. `closed` renders an empty panel so the
//! overlay can be dismissed with the same swap.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::current_projection;
use crate::cart::CartProjection;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Which overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsideKind {
    Cart,
    Search,
    Mobile,
    Closed,
}

impl AsideKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "cart" => Some(Self::Cart),
            "search" => Some(Self::Search),
            "mobile" => Some(Self::Mobile),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Cart => "Cart",
            Self::Search => "Search",
            Self::Mobile => "Menu",
            Self::Closed => "",
        }
    }
}

/// Overlay panel template.
#[derive(Template, WebTemplate)]
#[template(path = "aside/panel.html")]
pub struct AsideTemplate {
    pub kind: AsideKind,
    pub cart: CartProjection,
    pub error: Option<String>,
}

/// Render the requested overlay; unknown kinds are 404.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    session: Session,
) -> Result<impl IntoResponse> {
    let kind = AsideKind::parse(&kind).ok_or_else(|| AppError::NotFound(format!("aside {kind}")))?;
    let cart = if kind == AsideKind::Cart {
        current_projection(&state, &session).await?
    } else {
        CartProjection::empty()
    };

    Ok(AsideTemplate {
        kind,
        cart,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(AsideKind::parse("cart"), Some(AsideKind::Cart));
        assert_eq!(AsideKind::parse("closed"), Some(AsideKind::Closed));
        assert_eq!(AsideKind::parse("wishlist"), None);
    }
}
