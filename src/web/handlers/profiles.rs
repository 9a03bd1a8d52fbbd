//! Profile handlers. Every route here requires an authenticated caller.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::logging;
use crate::profiles;
use crate::users;
use crate::validation::{EducationInput, ExperienceInput, ProfileInput};
use crate::web::auth::AuthUser;
use crate::web::handlers::health::works;
use crate::web::state::SharedState;
use crate::web::utils::{error_response, json_body, ok_json};

pub async fn test_handler() -> impl IntoResponse {
    works("Profile")
}

pub async fn get_own_profile_handler(auth: AuthUser, State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    match profiles::get_by_user(&st.storage, &auth.user_id) {
        Ok(profile) => ok_json(&profile),
        Err(e) => error_response(e),
    }
}

pub async fn list_profiles_handler(_auth: AuthUser, State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    match profiles::get_all(&st.storage) {
        Ok(all) => ok_json(&all),
        Err(e) => error_response(e),
    }
}

pub async fn get_profile_by_handle_handler(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(handle): Path<String>,
) -> Response {
    let st = state.lock().await;
    match profiles::get_by_handle(&st.storage, &handle) {
        Ok(profile) => ok_json(&profile),
        Err(e) => error_response(e),
    }
}

pub async fn get_profile_by_user_handler(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match profiles::get_by_user(&st.storage, &user_id) {
        Ok(profile) => ok_json(&profile),
        Err(e) => error_response(e),
    }
}

pub async fn upsert_profile_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    body: Result<axum::Json<ProfileInput>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let st = state.lock().await;
    match profiles::upsert(&st.storage, &auth.user_id, &input) {
        Ok(profile) => {
            crate::dclog!(
                "profile '{}' saved for {}",
                profile.handle,
                logging::user_id(&auth.user_id)
            );
            ok_json(&profile)
        }
        Err(e) => error_response(e),
    }
}

pub async fn add_experience_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    body: Result<axum::Json<ExperienceInput>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let st = state.lock().await;
    match profiles::add_experience(&st.storage, &auth.user_id, &input) {
        Ok(profile) => {
            crate::dclog!("experience added for {}", logging::user_id(&auth.user_id));
            ok_json(&profile)
        }
        Err(e) => error_response(e),
    }
}

pub async fn add_education_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    body: Result<axum::Json<EducationInput>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let st = state.lock().await;
    match profiles::add_education(&st.storage, &auth.user_id, &input) {
        Ok(profile) => {
            crate::dclog!("education added for {}", logging::user_id(&auth.user_id));
            ok_json(&profile)
        }
        Err(e) => error_response(e),
    }
}

pub async fn delete_experience_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(exp_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match profiles::remove_experience(&st.storage, &auth.user_id, &exp_id) {
        Ok(profile) => {
            crate::dclog!(
                "experience {} removed for {}",
                exp_id,
                logging::user_id(&auth.user_id)
            );
            ok_json(&profile)
        }
        Err(e) => error_response(e),
    }
}

pub async fn delete_education_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(edu_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match profiles::remove_education(&st.storage, &auth.user_id, &edu_id) {
        Ok(profile) => {
            crate::dclog!(
                "education {} removed for {}",
                edu_id,
                logging::user_id(&auth.user_id)
            );
            ok_json(&profile)
        }
        Err(e) => error_response(e),
    }
}

/// Delete the caller's profile and account.
pub async fn delete_account_handler(auth: AuthUser, State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    match users::delete_account(&st.storage, &auth.user_id) {
        Ok(()) => {
            crate::dclog!("account {} deleted", logging::user_id(&auth.user_id));
            ok_json(&serde_json::json!({ "success": true }))
        }
        Err(e) => error_response(e),
    }
}
