//! Axum router construction.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::web::config::JSON_BODY_LIMIT;
use crate::web::handlers;
use crate::web::state::SharedState;

/// Build the complete Axum router with all API routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root_handler))
        .route("/api/health", get(handlers::health::health_handler))
        // Users API
        .route("/api/users/test", get(handlers::users::test_handler))
        .route(
            "/api/users/register",
            post(handlers::users::register_handler),
        )
        .route(
            "/api/users/current",
            get(handlers::users::current_user_handler),
        )
        // Profiles API
        .route("/api/profile/test", get(handlers::profiles::test_handler))
        .route(
            "/api/profile",
            get(handlers::profiles::get_own_profile_handler)
                .post(handlers::profiles::upsert_profile_handler)
                .delete(handlers::profiles::delete_account_handler),
        )
        .route(
            "/api/profile/all",
            get(handlers::profiles::list_profiles_handler),
        )
        .route(
            "/api/profile/handle/:handle",
            get(handlers::profiles::get_profile_by_handle_handler),
        )
        .route(
            "/api/profile/user/:user_id",
            get(handlers::profiles::get_profile_by_user_handler),
        )
        .route(
            "/api/profile/experience",
            post(handlers::profiles::add_experience_handler),
        )
        .route(
            "/api/profile/experience/:exp_id",
            delete(handlers::profiles::delete_experience_handler),
        )
        .route(
            "/api/profile/education",
            post(handlers::profiles::add_education_handler),
        )
        .route(
            "/api/profile/education/:edu_id",
            delete(handlers::profiles::delete_education_handler),
        )
        // Posts API
        .route("/api/posts/test", get(handlers::posts::test_handler))
        .route(
            "/api/posts",
            get(handlers::posts::list_posts_handler).post(handlers::posts::create_post_handler),
        )
        .route(
            "/api/posts/:id",
            get(handlers::posts::get_post_handler).delete(handlers::posts::delete_post_handler),
        )
        .route("/api/posts/like/:id", post(handlers::posts::like_handler))
        .route(
            "/api/posts/unlike/:id",
            post(handlers::posts::unlike_handler),
        )
        .route(
            "/api/posts/comment/:id",
            post(handlers::posts::add_comment_handler),
        )
        .route(
            "/api/posts/comment/:id/:comment_id",
            delete(handlers::posts::delete_comment_handler),
        )
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .with_state(state)
}
