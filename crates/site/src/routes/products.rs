//! Public product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use unique_cctv_core::ProductId;

use crate::backend::types::Product;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentActor;
use crate::state::AppState;

use super::Nav;

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub nav: Nav,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub active_category: Option<String>,
    pub query: Option<String>,
    pub image_base: String,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: Nav,
    pub product: Product,
    pub image_base: String,
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize, Default)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Display the product listing.
///
/// GET /products
///
/// A search keyword (`?q=`) takes precedence over a category filter
/// (`?category=`); with neither, the full catalog is shown.
///
/// # Errors
///
/// Returns an error page when the backend is unreachable.
#[instrument(skip(state, actor))]
pub async fn index(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let nav = Nav::from(&actor.0);

    let keyword = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let products = match (keyword, category) {
        (Some(keyword), _) => state.backend().search_products(keyword).await?,
        (None, Some(category)) => state.backend().products_by_category(category).await?,
        (None, None) => state.backend().list_products().await?,
    };

    let categories = match state.backend().product_categories().await {
        Ok(categories) => categories,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load category filter");
            Vec::new()
        }
    };

    Ok(ProductIndexTemplate {
        nav,
        products,
        categories,
        active_category: category.map(ToString::to_string),
        query: keyword.map(ToString::to_string),
        image_base: state.backend().image_base(),
    })
}

/// Display a single product.
///
/// GET /products/{id}
///
/// # Errors
///
/// Returns 404 when the backend reports the product missing.
#[instrument(skip(state, actor))]
pub async fn show(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let nav = Nav::from(&actor.0);
    let id = ProductId::from(id);

    let product = state.backend().get_product(&id).await.map_err(|err| {
        if matches!(&err, crate::backend::BackendError::Api { status, .. } if *status == 404) {
            AppError::NotFound(format!("product {id}"))
        } else {
            AppError::from(err)
        }
    })?;

    Ok(ProductShowTemplate {
        nav,
        product,
        image_base: state.backend().image_base(),
    })
}
