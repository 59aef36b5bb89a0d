//! Vegan Business API Handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{VeganBusiness, VeganBusinessCreate, VeganBusinessFilter};

use crate::api::multipart::{MultipartForm, store_all};
use crate::auth::CurrentUser;
use crate::db::repository;
use crate::security_log;
use crate::state::AppState;
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, optional_text, require_email, require_text};

const IMAGE_FOLDER: &str = "vegan";

/// GET /api/vegan-businesses?category=cafe&city=Durban
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<VeganBusinessFilter>,
) -> AppResult<ApiResponse<Vec<VeganBusiness>>> {
    let list = repository::vegan_business::list(&state.pool, &filter).await?;
    Ok(ApiResponse::success(list))
}

/// POST /api/vegan-businesses - multipart: name, category, description,
/// city, website, contactEmail, image
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, ApiResponse<VeganBusiness>)> {
    let form = MultipartForm::read(multipart, "image", 1).await?;
    let payload = VeganBusinessCreate {
        name: form.require("name")?.to_string(),
        category: form
            .variant("category")?
            .ok_or_else(|| AppError::required_field("category"))?,
        description: form.text("description").map(String::from),
        city: form.require("city")?.to_string(),
        website: form.text("website").map(String::from),
        contact_email: form.text("contactEmail").map(String::from),
    };
    require_text(&payload.name, "name", MAX_NAME_LEN)?;
    require_text(&payload.city, "city", MAX_NAME_LEN)?;
    optional_text(payload.description.as_deref(), "description", MAX_TEXT_LEN)?;
    optional_text(payload.website.as_deref(), "website", MAX_NAME_LEN)?;
    if let Some(email) = &payload.contact_email {
        require_email(email, "contactEmail")?;
    }

    let image = store_all(state.storage.as_ref(), IMAGE_FOLDER, &form.files)
        .await?
        .into_iter()
        .next();
    let business =
        repository::vegan_business::create(&state.pool, &user.id, &payload, image.as_deref()).await?;

    tracing::info!(vegan_business_id = business.id, user_id = %user.id, "Vegan business listed");
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Business listed", business),
    ))
}

/// DELETE /api/vegan-businesses/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let business = repository::vegan_business::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VeganBusinessNotFound).with_detail("id", id))?;

    if business.submitted_by != user.id && !user.is_admin() {
        security_log!("WARN", "delete_denied", user_id = user.id.clone(), vegan_business_id = id);
        return Err(AppError::permission_denied(
            "Only the submitter or an admin can remove this listing",
        ));
    }

    repository::vegan_business::delete(&state.pool, id).await?;
    tracing::info!(vegan_business_id = id, deleted_by = %user.id, "Vegan business removed");
    Ok(ApiResponse::ok())
}
