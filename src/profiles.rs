//! Profile merge engine.
//!
//! A profile submission is turned into a [`ProfilePatch`] holding only the
//! fields the caller supplied. The first submission for a user inserts the
//! profile; later ones apply the patch in place, so omitted fields keep their
//! stored values. Experience and education entries are prepended with fresh
//! identifiers and removed one at a time by identifier.

use crate::error::CoreError;
use crate::models::{from_millis, now_millis, Education, Experience, Profile, ProfilePatch, Social};
use crate::storage::{ProfileRow, Storage, StorageError};
use crate::users;
use crate::validation::{
    validate_education, validate_experience, validate_profile, EducationInput, ExperienceInput,
    ProfileInput,
};

const SKILLS_DELIMITER: char = ',';

fn no_profile() -> CoreError {
    CoreError::not_found("noprofile", "There is no profile for this user")
}

fn handle_taken() -> CoreError {
    CoreError::conflict("handle", "That handle already exists")
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Split the delimited skills string. Entries are neither trimmed nor
/// deduplicated: `"a, b,a"` becomes `["a", " b", "a"]`.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(SKILLS_DELIMITER).map(str::to_string).collect()
}

/// Build the sparse patch for a submission. The handle is stored trimmed.
pub fn build_patch(input: &ProfileInput) -> ProfilePatch {
    ProfilePatch {
        handle: input.handle.as_deref().map(|h| h.trim().to_string()),
        company: input.company.clone(),
        website: input.website.clone(),
        location: input.location.clone(),
        bio: input.bio.clone(),
        status: input.status.clone(),
        githubusername: input.githubusername.clone(),
        skills: input.skills.as_deref().map(split_skills),
        social: Social {
            youtube: input.youtube.clone(),
            twitter: input.twitter.clone(),
            facebook: input.facebook.clone(),
            linkedin: input.linkedin.clone(),
            instagram: input.instagram.clone(),
        },
    }
}

fn assemble(storage: &Storage, row: ProfileRow) -> Result<Profile, CoreError> {
    let user = users::get_user(storage, &row.user_id)?;
    let experience = storage.list_experience(&row.id)?;
    let education = storage.list_education(&row.id)?;

    Ok(Profile {
        id: row.id,
        user: user.summary(),
        handle: row.handle,
        company: row.company,
        website: row.website,
        location: row.location,
        bio: row.bio,
        status: row.status,
        githubusername: row.githubusername,
        skills: row.skills,
        social: row.social,
        experience,
        education,
        date: from_millis(row.created_at),
    })
}

fn profile_row_for(storage: &Storage, user_id: &str) -> Result<ProfileRow, CoreError> {
    storage.get_profile_by_user(user_id)?.ok_or_else(no_profile)
}

/// Create the caller's profile or merge the submission into it.
///
/// A handle already used by another profile aborts the write with a
/// conflict, on both the create and the update path.
pub fn upsert(storage: &Storage, user_id: &str, input: &ProfileInput) -> Result<Profile, CoreError> {
    validate_profile(input)?;
    let patch = build_patch(input);

    if storage.get_profile_by_user(user_id)?.is_some() {
        match storage.update_profile(user_id, &patch) {
            Ok(_) => {}
            Err(StorageError::AlreadyExists(_)) => return Err(handle_taken()),
            Err(e) => return Err(e.into()),
        }
        return get_by_user(storage, user_id);
    }

    let handle = patch.handle.clone().unwrap_or_default();
    if storage.get_profile_by_handle(&handle)?.is_some() {
        return Err(handle_taken());
    }

    let row = ProfileRow {
        id: new_id(),
        user_id: user_id.to_string(),
        handle,
        company: patch.company,
        website: patch.website,
        location: patch.location,
        bio: patch.bio,
        status: patch.status,
        githubusername: patch.githubusername,
        skills: patch.skills.unwrap_or_default(),
        social: patch.social,
        created_at: now_millis(),
    };
    match storage.insert_profile(&row) {
        Ok(()) => {}
        // A concurrent create for the same handle or user lost the race.
        Err(StorageError::AlreadyExists(columns)) if columns.contains("handle") => {
            return Err(handle_taken());
        }
        Err(StorageError::AlreadyExists(_)) => {
            return Err(CoreError::conflict("user", "Profile already exists for this user"));
        }
        Err(e) => return Err(e.into()),
    }

    assemble(storage, row)
}

pub fn get_by_user(storage: &Storage, user_id: &str) -> Result<Profile, CoreError> {
    let row = profile_row_for(storage, user_id)?;
    assemble(storage, row)
}

pub fn get_by_handle(storage: &Storage, handle: &str) -> Result<Profile, CoreError> {
    let row = storage
        .get_profile_by_handle(handle)?
        .ok_or_else(|| CoreError::not_found("noprofile", "There is no profile for this handle"))?;
    assemble(storage, row)
}

/// Every profile, oldest first. An empty store is reported as not found.
pub fn get_all(storage: &Storage) -> Result<Vec<Profile>, CoreError> {
    let rows = storage.list_profiles()?;
    if rows.is_empty() {
        return Err(CoreError::not_found("noprofile", "There are no profiles"));
    }
    rows.into_iter().map(|row| assemble(storage, row)).collect()
}

/// Prepend an experience entry to the caller's profile.
pub fn add_experience(
    storage: &Storage,
    user_id: &str,
    input: &ExperienceInput,
) -> Result<Profile, CoreError> {
    let valid = validate_experience(input)?;
    let row = profile_row_for(storage, user_id)?;

    let entry = Experience {
        id: new_id(),
        title: valid.title,
        company: valid.company,
        location: valid.location,
        from: valid.period.from,
        to: valid.period.to,
        current: valid.period.current,
        description: valid.description,
    };
    storage.insert_experience(&row.id, &entry)?;
    assemble(storage, row)
}

/// Prepend an education entry to the caller's profile.
pub fn add_education(
    storage: &Storage,
    user_id: &str,
    input: &EducationInput,
) -> Result<Profile, CoreError> {
    let valid = validate_education(input)?;
    let row = profile_row_for(storage, user_id)?;

    let entry = Education {
        id: new_id(),
        school: valid.school,
        degree: valid.degree,
        fieldofstudy: valid.fieldofstudy,
        from: valid.period.from,
        to: valid.period.to,
        current: valid.period.current,
        description: valid.description,
    };
    storage.insert_education(&row.id, &entry)?;
    assemble(storage, row)
}

pub fn remove_experience(
    storage: &Storage,
    user_id: &str,
    entry_id: &str,
) -> Result<Profile, CoreError> {
    let row = profile_row_for(storage, user_id)?;
    if !storage.delete_experience(&row.id, entry_id)? {
        return Err(CoreError::not_found("noexperience", "Experience entry not found"));
    }
    assemble(storage, row)
}

pub fn remove_education(
    storage: &Storage,
    user_id: &str,
    entry_id: &str,
) -> Result<Profile, CoreError> {
    let row = profile_row_for(storage, user_id)?;
    if !storage.delete_education(&row.id, entry_id)? {
        return Err(CoreError::not_found("noeducation", "Education entry not found"));
    }
    assemble(storage, row)
}
