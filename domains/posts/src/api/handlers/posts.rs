//! Versioned post API handlers
//!
//! Handlers stay thin: parse the request, call the engine, map the
//! snapshot to a response. Category ids are resolved to display names at
//! read time; ids that no longer resolve render with a placeholder name
//! instead of failing the whole response.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use pressroom_categories::{CategoryGateway, CategoryId};
use pressroom_common::{Error, Result, ValidatedJson};

use crate::api::middleware::PostsState;
use crate::domain::entities::{NewPost, PostId, PostPatch, PostVersion};
use crate::domain::state::VersionStatus;

/// Rendered in place of a category name when the referenced category has
/// been deleted (historical versions keep stale references)
const MISSING_CATEGORY_NAME: &str = "[Category not found]";

/// Request body for creating or fully replacing a post
///
/// Field presence is checked by the engine, not here, so that a replace
/// on a missing post reports 404 before 400.
#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    pub title: String,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

impl From<PostRequest> for NewPost {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            body: req.body,
            category_ids: req.category_ids,
        }
    }
}

/// Request body for partially updating a post
#[derive(Debug, Deserialize, Validate)]
pub struct PatchPostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub category_ids: Option<Vec<CategoryId>>,
}

impl From<PatchPostRequest> for PostPatch {
    fn from(req: PatchPostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            body: req.body,
            category_ids: req.category_ids,
        }
    }
}

/// Request body for setting the current version's status
#[derive(Debug, Deserialize, Validate)]
pub struct SetStatusRequest {
    pub status: VersionStatus,
}

/// Query parameters for listing posts
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    /// Comma-separated category ids; posts must carry every listed id
    pub category_ids: Option<String>,
}

impl ListPostsQuery {
    fn parse_ids(&self) -> Result<Vec<CategoryId>> {
        let Some(raw) = self.category_ids.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<CategoryId>()
                    .map_err(|_| Error::Validation(format!("Invalid category id '{}'", s)))
            })
            .collect()
    }
}

/// Category reference with its resolved display name
#[derive(Debug, Serialize)]
pub struct CategoryRefResponse {
    pub id: CategoryId,
    pub name: String,
}

/// Post response DTO: the current (or requested) version snapshot
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub version_number: u32,
    pub title: String,
    pub author: String,
    pub body: String,
    pub status: VersionStatus,
    pub categories: Vec<CategoryRefResponse>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

async fn to_response(
    version: PostVersion,
    gateway: &Arc<dyn CategoryGateway>,
) -> Result<PostResponse> {
    let mut categories = Vec::with_capacity(version.category_ids.len());
    for id in version.category_ids {
        let name = gateway
            .display_name(id)
            .await?
            .unwrap_or_else(|| MISSING_CATEGORY_NAME.to_string());
        categories.push(CategoryRefResponse { id, name });
    }
    Ok(PostResponse {
        id: version.post_id,
        version_number: version.version_number,
        title: version.title,
        author: version.author,
        body: version.body,
        status: version.status,
        categories,
        created_at: version.created_at,
    })
}

async fn to_responses(
    versions: Vec<PostVersion>,
    gateway: &Arc<dyn CategoryGateway>,
) -> Result<Vec<PostResponse>> {
    let mut responses = Vec::with_capacity(versions.len());
    for version in versions {
        responses.push(to_response(version, gateway).await?);
    }
    Ok(responses)
}

/// Create a new post; the response is its first version
pub async fn create_post(
    State(state): State<PostsState>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>)> {
    let version = state.service.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(to_response(version, &state.gateway).await?),
    ))
}

/// List the current version of every post, optionally filtered to posts
/// carrying all of the given categories
pub async fn list_posts(
    State(state): State<PostsState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>> {
    let ids = query.parse_ids()?;
    let versions = if ids.is_empty() {
        state.service.list_all().await?
    } else {
        state.service.list_by_categories(&ids).await?
    };
    Ok(Json(to_responses(versions, &state.gateway).await?))
}

/// Get the current version of a post
pub async fn get_post(
    State(state): State<PostsState>,
    Path(id): Path<PostId>,
) -> Result<Json<PostResponse>> {
    let version = state
        .service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".to_string()))?;
    Ok(Json(to_response(version, &state.gateway).await?))
}

/// Fully replace a post's content, appending a new version
pub async fn update_post(
    State(state): State<PostsState>,
    Path(id): Path<PostId>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<Json<PostResponse>> {
    let version = state.service.replace(id, req.into()).await?;
    Ok(Json(to_response(version, &state.gateway).await?))
}

/// Partially update a post, appending a new version that inherits unset
/// fields from the current one
pub async fn patch_post(
    State(state): State<PostsState>,
    Path(id): Path<PostId>,
    ValidatedJson(req): ValidatedJson<PatchPostRequest>,
) -> Result<Json<PostResponse>> {
    let version = state.service.patch(id, req.into()).await?;
    Ok(Json(to_response(version, &state.gateway).await?))
}

/// Delete a post and its whole version history
pub async fn delete_post(
    State(state): State<PostsState>,
    Path(id): Path<PostId>,
) -> Result<StatusCode> {
    if !state.service.delete(id).await? {
        return Err(Error::NotFound("Post not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// List every version of a post in creation order
pub async fn list_versions(
    State(state): State<PostsState>,
    Path(id): Path<PostId>,
) -> Result<Json<Vec<PostResponse>>> {
    let versions = state
        .service
        .history(id)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".to_string()))?;
    Ok(Json(to_responses(versions, &state.gateway).await?))
}

/// Set the status of a post's current version
pub async fn set_status(
    State(state): State<PostsState>,
    Path(id): Path<PostId>,
    ValidatedJson(req): ValidatedJson<SetStatusRequest>,
) -> Result<Json<PostResponse>> {
    let version = state.service.set_status(id, req.status).await?;
    Ok(Json(to_response(version, &state.gateway).await?))
}

/// Roll a post back to a prior version
pub async fn rollback_post(
    State(state): State<PostsState>,
    Path((id, version_number)): Path<(PostId, u32)>,
) -> Result<Json<PostResponse>> {
    let version = state.service.rollback(id, version_number).await?;
    Ok(Json(to_response(version, &state.gateway).await?))
}
