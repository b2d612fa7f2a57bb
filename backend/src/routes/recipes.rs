//! Recipe API routes

use super::users::user_response;
use crate::error::ApiResult;
use crate::repositories::{EntityId, RecipeFields};
use crate::services::{RecipeDetails, RecipeService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use recipe_project_shared::{Recipe, RecipeRequest};

/// Create recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

fn recipe_response(details: RecipeDetails) -> Recipe {
    let RecipeDetails { recipe, created_by } = details;
    Recipe {
        id: recipe.id,
        name: recipe.name,
        description: recipe.description,
        category: recipe.category,
        skill_level: recipe.skill_level,
        created_by: created_by.map(user_response),
    }
}

fn recipe_fields(req: RecipeRequest) -> RecipeFields {
    RecipeFields {
        name: req.name,
        description: req.description,
        category: req.category,
        skill_level: req.skill_level,
        created_by_id: req.created_by.map(|author| author.id),
    }
}

/// GET /recipes - List every recipe with its author
async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<Recipe>>> {
    let recipes = RecipeService::find_all(state.recipes(), state.users()).await?;
    Ok(Json(recipes.into_iter().map(recipe_response).collect()))
}

/// GET /recipes/{id}
async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<EntityId>,
) -> ApiResult<Json<Recipe>> {
    let recipe = RecipeService::find_by_id(state.recipes(), state.users(), recipe_id).await?;
    Ok(Json(recipe_response(recipe)))
}

/// PUT /recipes/{id} - Replace the editable fields of an existing recipe
///
/// `createdBy` in the body is ignored; the stored author is kept.
async fn update_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<EntityId>,
    Json(req): Json<RecipeRequest>,
) -> ApiResult<Json<Recipe>> {
    let recipe = RecipeService::update_by_id(
        state.recipes(),
        state.users(),
        recipe_id,
        recipe_fields(req),
    )
    .await?;
    Ok(Json(recipe_response(recipe)))
}

/// POST /recipes
async fn create_recipe(
    State(state): State<AppState>,
    Json(req): Json<RecipeRequest>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    let recipe = RecipeService::create(state.recipes(), state.users(), recipe_fields(req)).await?;
    Ok((StatusCode::CREATED, Json(recipe_response(recipe))))
}

/// DELETE /recipes/{id} - Always 204, whether or not the recipe existed
async fn delete_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    RecipeService::delete(state.recipes(), recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
