//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Accommodation, AvailabilityUpdate, MenuItem, MenuItemCreate};

use crate::api::accommodations::owned_accommodation;
use crate::api::multipart::{MultipartForm, store_all};
use crate::auth::CurrentUser;
use crate::db::repository;
use crate::state::AppState;
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, optional_text, require_price, require_text};

const IMAGE_FOLDER: &str = "menu";

/// POST /api/menu-items - multipart: name, description, price, category,
/// isVegan, isVegetarian, isGlutenFree, image
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, ApiResponse<MenuItem>)> {
    let acc = owned_accommodation(&state, &user).await?;
    if !acc.property_type.is_dining() {
        return Err(AppError::with_message(
            ErrorCode::PropertyTypeMismatch,
            "Menu items can only be added to dining properties",
        ));
    }

    let form = MultipartForm::read(multipart, "image", 1).await?;
    let payload = MenuItemCreate {
        name: form.require("name")?.to_string(),
        description: form.text("description").map(String::from),
        price: form
            .parse::<f64>("price")?
            .ok_or_else(|| AppError::required_field("price"))?,
        category: form
            .variant("category")?
            .ok_or_else(|| AppError::required_field("category"))?,
        is_vegan: form.parse("isVegan")?.unwrap_or(false),
        is_vegetarian: form.parse("isVegetarian")?.unwrap_or(false),
        is_gluten_free: form.parse("isGlutenFree")?.unwrap_or(false),
    };
    require_text(&payload.name, "name", MAX_NAME_LEN)?;
    require_price(payload.price, "price")?;
    optional_text(payload.description.as_deref(), "description", MAX_TEXT_LEN)?;

    let image = store_all(state.storage.as_ref(), IMAGE_FOLDER, &form.files)
        .await?
        .into_iter()
        .next();
    let item = repository::menu_item::create(&state.pool, acc.id, &payload, image.as_deref()).await?;

    tracing::info!(menu_item_id = item.id, accommodation_id = acc.id, "Menu item created");
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Menu item created", item),
    ))
}

/// PATCH /api/menu-items/{id}/availability
pub async fn set_availability(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<ApiResponse<MenuItem>> {
    let acc = owned_accommodation(&state, &user).await?;
    own_item(&state, &acc, id).await?;

    let item = repository::menu_item::set_availability(&state.pool, id, payload.is_available).await?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let acc = owned_accommodation(&state, &user).await?;
    own_item(&state, &acc, id).await?;

    repository::menu_item::delete(&state.pool, id).await?;
    tracing::info!(menu_item_id = id, "Menu item deleted");
    Ok(ApiResponse::ok())
}

async fn own_item(state: &AppState, acc: &Accommodation, id: i64) -> AppResult<MenuItem> {
    repository::menu_item::find_by_id(&state.pool, id)
        .await?
        .filter(|item| item.accommodation_id == acc.id)
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))
}
