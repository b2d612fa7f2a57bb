//! User API routes

use crate::error::ApiResult;
use crate::repositories::{EntityId, UserFields, UserRecord};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use recipe_project_shared::{User, UserRequest};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub(crate) fn user_response(user: UserRecord) -> User {
    User {
        id: user.id,
        name: user.name,
        email: user.email,
    }
}

fn user_fields(req: UserRequest) -> UserFields {
    UserFields {
        name: req.name,
        email: req.email,
    }
}

/// GET /users - List every user
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = UserService::find_all(state.users()).await?;
    Ok(Json(users.into_iter().map(user_response).collect()))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<EntityId>,
) -> ApiResult<Json<User>> {
    let user = UserService::find_by_id(state.users(), user_id).await?;
    Ok(Json(user_response(user)))
}

/// PUT /users/{id} - Replace name and email of an existing user
async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<EntityId>,
    Json(req): Json<UserRequest>,
) -> ApiResult<Json<User>> {
    let user = UserService::update_by_id(state.users(), user_id, user_fields(req)).await?;
    Ok(Json(user_response(user)))
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = UserService::create(state.users(), user_fields(req)).await?;
    Ok((StatusCode::CREATED, Json(user_response(user))))
}

/// DELETE /users/{id} - Always 204, whether or not the user existed
async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    UserService::delete(state.users(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
