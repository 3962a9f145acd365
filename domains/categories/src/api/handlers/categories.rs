//! Category management API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use pressroom_common::{Error, Result, ValidatedJson};

use crate::api::middleware::CategoriesState;
use crate::domain::entities::{Category, CategoryId, NewCategory};

/// Request for creating or replacing a category
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Category name
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Request for partially updating a category
#[derive(Debug, Deserialize, Validate)]
pub struct PatchCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Category response DTO
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

/// Create a new category
pub async fn create_category(
    State(state): State<CategoriesState>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    let new = NewCategory::new(req.name, req.description)?;
    let created = state.repo.create(new).await?;
    tracing::info!(category_id = created.id, "Category created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all categories
pub async fn list_categories(
    State(state): State<CategoriesState>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = state.repo.list().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Get a single category by ID
pub async fn get_category(
    State(state): State<CategoriesState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryResponse>> {
    let category = state
        .repo
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;
    Ok(Json(category.into()))
}

/// Replace an existing category
pub async fn update_category(
    State(state): State<CategoriesState>,
    Path(id): Path<CategoryId>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>> {
    let new = NewCategory::new(req.name, req.description)?;
    let updated = state
        .repo
        .update(id, new)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(Json(updated.into()))
}

/// Partially update an existing category
pub async fn patch_category(
    State(state): State<CategoriesState>,
    Path(id): Path<CategoryId>,
    ValidatedJson(req): ValidatedJson<PatchCategoryRequest>,
) -> Result<Json<CategoryResponse>> {
    let patched = state
        .repo
        .patch(id, req.name, req.description)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;
    tracing::info!(category_id = id, "Category patched");
    Ok(Json(patched.into()))
}

/// Delete a category and notify referencing domains
pub async fn delete_category(
    State(state): State<CategoriesState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    let deleted = state.repo.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound("Category not found".to_string()));
    }

    // Deletion notifications run after the row is gone, so listeners that
    // re-check existence through the gateway see the post-delete state.
    // The deletion is already complete; a failing listener must not turn
    // it into an error response.
    for listener in &state.listeners {
        if let Err(error) = listener.category_deleted(id).await {
            tracing::warn!(category_id = id, %error, "Category deletion listener failed");
        }
    }

    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
