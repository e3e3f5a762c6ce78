//! Admin product management.
//!
//! Create and edit are multipart forms so an image file can ride along
//! with the text fields. A new image is uploaded to the backend first;
//! its stored filename is then written into the product payload.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use unique_cctv_core::{Price, ProductId};

use crate::backend::types::{Product, ProductInput};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::middleware::auth::Authed;
use crate::routes::{Nav, auth_rejected_response};
use crate::state::AppState;

/// Product management listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct AdminProductsTemplate {
    pub nav: Nav,
    pub products: Vec<Product>,
    pub image_base: String,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub nav: Nav,
    pub product: Option<Product>,
    pub error: Option<String>,
    pub image_base: String,
}

/// Fields parsed out of the multipart product form.
#[derive(Debug, Default)]
struct ProductFormData {
    name: String,
    description: String,
    price: String,
    category: String,
    specifications: String,
    stock_quantity: String,
    image: Option<(String, String, Vec<u8>)>,
}

/// Read the multipart product form.
///
/// Unknown fields are skipped; an image part without a filename counts
/// as "no new image".
async fn read_form(mut multipart: Multipart) -> Result<ProductFormData, AppError> {
    let mut data = ProductFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("invalid form data".to_owned()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_string(), ToString::to_string);
                let bytes = field.bytes().await.map_err(|_| AppError::BadRequest("invalid form data".to_owned()))?;
                if let Some(file_name) = file_name.filter(|f| !f.is_empty())
                    && !bytes.is_empty()
                {
                    data.image = Some((file_name, content_type, bytes.to_vec()));
                }
            }
            other => {
                let value = field.text().await.map_err(|_| AppError::BadRequest("invalid form data".to_owned()))?;
                match other {
                    "name" => data.name = value,
                    "description" => data.description = value,
                    "price" => data.price = value,
                    "category" => data.category = value,
                    "specifications" => data.specifications = value,
                    "stock_quantity" => data.stock_quantity = value,
                    _ => {}
                }
            }
        }
    }

    Ok(data)
}

/// Validate the parsed form and build the backend payload.
///
/// `existing_image` carries the current filename forward on edits where
/// no replacement file was chosen.
fn build_input(
    data: &ProductFormData,
    uploaded_image: Option<String>,
    existing_image: Option<String>,
) -> Result<ProductInput, String> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err("Name is required.".to_string());
    }
    let category = data.category.trim();
    if category.is_empty() {
        return Err("Category is required.".to_string());
    }
    let price = Decimal::from_str(data.price.trim())
        .map(Price::new)
        .map_err(|_| "Price must be a valid number.".to_string())?;
    let stock_quantity = if data.stock_quantity.trim().is_empty() {
        None
    } else {
        Some(
            data.stock_quantity
                .trim()
                .parse::<i32>()
                .map_err(|_| "Stock quantity must be a whole number.".to_string())?,
        )
    };

    Ok(ProductInput {
        name: name.to_string(),
        description: data.description.trim().to_string(),
        price,
        category: category.to_string(),
        image: uploaded_image.or(existing_image),
        specifications: {
            let specs = data.specifications.trim();
            (!specs.is_empty()).then(|| specs.to_string())
        },
        stock_quantity,
    })
}

/// Upload the form's image file, if one was attached.
async fn upload_if_present(
    state: &AppState,
    authed: &Authed,
    data: &ProductFormData,
) -> Result<Option<String>, crate::backend::BackendError> {
    let Some((file_name, content_type, bytes)) = data.image.clone() else {
        return Ok(None);
    };
    let uploaded = state
        .backend()
        .upload_image(&authed.token, file_name, &content_type, bytes)
        .await?;
    Ok(Some(uploaded.filename))
}

/// Display the product management listing.
///
/// GET /admin/products
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn index(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
) -> Response {
    let authed = admin.0;
    match state.backend().list_products().await {
        Ok(products) => AdminProductsTemplate {
            nav: super::nav_for(&authed),
            products,
            image_base: state.backend().image_base(),
        }
        .into_response(),
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/products").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Display the new-product form.
///
/// GET /admin/products/new
#[instrument(skip(state, admin))]
pub async fn new_form(State(state): State<AppState>, admin: RequireAdmin) -> impl IntoResponse {
    ProductFormTemplate {
        nav: super::nav_for(&admin.0),
        product: None,
        error: None,
        image_base: state.backend().image_base(),
    }
}

/// Create a product.
///
/// POST /admin/products
#[instrument(skip(state, session, admin, multipart), fields(user_id = %admin.0.profile.id))]
pub async fn create(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    multipart: Multipart,
) -> Response {
    let authed = admin.0;
    let data = match read_form(multipart).await {
        Ok(data) => data,
        Err(err) => return err.into_response(),
    };

    let uploaded = match upload_if_present(&state, &authed, &data).await {
        Ok(uploaded) => uploaded,
        Err(err) if err.is_auth_rejected() => {
            return auth_rejected_response(&state, &session, "/admin/products").await;
        }
        Err(err) => return AppError::from(err).into_response(),
    };

    let input = match build_input(&data, uploaded, None) {
        Ok(input) => input,
        Err(message) => {
            return ProductFormTemplate {
                nav: super::nav_for(&authed),
                product: None,
                error: Some(message),
                image_base: state.backend().image_base(),
            }
            .into_response();
        }
    };

    match state.backend().create_product(&authed.token, &input).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product created");
            Redirect::to("/admin/products").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/products").await
        }
        Err(err) => ProductFormTemplate {
            nav: super::nav_for(&authed),
            product: None,
            error: Some(err.user_message()),
            image_base: state.backend().image_base(),
        }
        .into_response(),
    }
}

/// Display the edit form for a product.
///
/// GET /admin/products/{id}/edit
#[instrument(skip(state, session, admin))]
pub async fn edit_form(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    let authed = admin.0;
    let id = ProductId::from(id);
    match state.backend().get_product(&id).await {
        Ok(product) => ProductFormTemplate {
            nav: super::nav_for(&authed),
            product: Some(product),
            error: None,
            image_base: state.backend().image_base(),
        }
        .into_response(),
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/products").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Update a product.
///
/// POST /admin/products/{id}
#[instrument(skip(state, session, admin, multipart), fields(user_id = %admin.0.profile.id))]
pub async fn update(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let authed = admin.0;
    let id = ProductId::from(id);

    let existing = match state.backend().get_product(&id).await {
        Ok(product) => product,
        Err(err) => return AppError::from(err).into_response(),
    };

    let data = match read_form(multipart).await {
        Ok(data) => data,
        Err(err) => return err.into_response(),
    };

    let uploaded = match upload_if_present(&state, &authed, &data).await {
        Ok(uploaded) => uploaded,
        Err(err) if err.is_auth_rejected() => {
            return auth_rejected_response(&state, &session, "/admin/products").await;
        }
        Err(err) => return AppError::from(err).into_response(),
    };

    let input = match build_input(&data, uploaded, existing.image.clone()) {
        Ok(input) => input,
        Err(message) => {
            return ProductFormTemplate {
                nav: super::nav_for(&authed),
                product: Some(existing),
                error: Some(message),
                image_base: state.backend().image_base(),
            }
            .into_response();
        }
    };

    match state.backend().update_product(&authed.token, &id, &input).await {
        Ok(_) => {
            tracing::info!(product_id = %id, "product updated");
            Redirect::to("/admin/products").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/products").await
        }
        Err(err) => ProductFormTemplate {
            nav: super::nav_for(&authed),
            product: Some(existing),
            error: Some(err.user_message()),
            image_base: state.backend().image_base(),
        }
        .into_response(),
    }
}

/// Delete a product.
///
/// POST /admin/products/{id}/delete
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn delete(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    let authed = admin.0;
    let id = ProductId::from(id);
    match state.backend().delete_product(&authed.token, &id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "product deleted");
            Redirect::to("/admin/products").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/products").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
