//! Post interaction engine: creation, owner-only deletion, like/unlike and
//! comments.
//!
//! Like state per (post, user) is either liked or not liked. Liking twice or
//! unliking a post that is not liked is refused and leaves the likes
//! untouched; the store enforces this with a uniqueness key, so two
//! concurrent likes by one user cannot both land.

use crate::error::CoreError;
use crate::models::{from_millis, now_millis, Comment, Like, Post};
use crate::storage::{CommentRow, PostRow, Storage};
use crate::validation::{validate_text, TextInput};

fn no_post() -> CoreError {
    CoreError::not_found("nopostfound", "No post found with that ID")
}

fn post_row(storage: &Storage, post_id: &str) -> Result<PostRow, CoreError> {
    storage.get_post(post_id)?.ok_or_else(no_post)
}

fn assemble(storage: &Storage, row: PostRow) -> Result<Post, CoreError> {
    let likes = storage
        .list_likes(&row.id)?
        .into_iter()
        .map(|user| Like { user })
        .collect();
    let comments = storage
        .list_comments(&row.id)?
        .into_iter()
        .map(|c| Comment {
            id: c.id,
            user: c.user_id,
            text: c.text,
            name: c.name,
            avatar: c.avatar,
            date: from_millis(c.created_at),
        })
        .collect();

    Ok(Post {
        id: row.id,
        user: row.user_id,
        text: row.text,
        name: row.name,
        avatar: row.avatar,
        likes,
        comments,
        date: from_millis(row.created_at),
    })
}

/// All posts, newest first.
pub fn list(storage: &Storage) -> Result<Vec<Post>, CoreError> {
    storage
        .list_posts()?
        .into_iter()
        .map(|row| assemble(storage, row))
        .collect()
}

pub fn get(storage: &Storage, post_id: &str) -> Result<Post, CoreError> {
    let row = post_row(storage, post_id)?;
    assemble(storage, row)
}

/// Create a post owned by `user_id`, snapshotting the author's current name
/// and avatar.
pub fn create(storage: &Storage, user_id: &str, input: &TextInput) -> Result<Post, CoreError> {
    let text = validate_text(input)?;
    let author = storage
        .get_user(user_id)?
        .ok_or_else(|| CoreError::not_found("nouser", "User not found"))?;

    let row = PostRow {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: author.id,
        text,
        name: author.name,
        avatar: author.avatar,
        created_at: now_millis(),
    };
    storage.insert_post(&row)?;
    assemble(storage, row)
}

/// Delete a post. Only its owner may do so.
pub fn delete(storage: &Storage, user_id: &str, post_id: &str) -> Result<(), CoreError> {
    let row = post_row(storage, post_id)?;
    if row.user_id != user_id {
        return Err(CoreError::NotAuthorized);
    }
    if !storage.delete_post(post_id)? {
        return Err(no_post());
    }
    Ok(())
}

/// Like a post. The new like goes to the head of `likes`.
pub fn like(storage: &Storage, user_id: &str, post_id: &str) -> Result<Post, CoreError> {
    let row = post_row(storage, post_id)?;
    if !storage.insert_like(post_id, user_id, now_millis())? {
        return Err(CoreError::AlreadyLiked);
    }
    assemble(storage, row)
}

/// Remove the caller's like from a post.
pub fn unlike(storage: &Storage, user_id: &str, post_id: &str) -> Result<Post, CoreError> {
    let row = post_row(storage, post_id)?;
    if !storage.delete_like(post_id, user_id)? {
        return Err(CoreError::NotLiked);
    }
    assemble(storage, row)
}

/// Prepend a comment, snapshotting the commenter's name and avatar.
pub fn add_comment(
    storage: &Storage,
    user_id: &str,
    post_id: &str,
    input: &TextInput,
) -> Result<Post, CoreError> {
    let text = validate_text(input)?;
    let row = post_row(storage, post_id)?;
    let author = storage
        .get_user(user_id)?
        .ok_or_else(|| CoreError::not_found("nouser", "User not found"))?;

    storage.insert_comment(&CommentRow {
        id: uuid::Uuid::new_v4().to_string(),
        post_id: row.id.clone(),
        user_id: author.id,
        text,
        name: author.name,
        avatar: author.avatar,
        created_at: now_millis(),
    })?;
    assemble(storage, row)
}

/// Remove a comment. Only the comment's author may do so.
pub fn remove_comment(
    storage: &Storage,
    user_id: &str,
    post_id: &str,
    comment_id: &str,
) -> Result<Post, CoreError> {
    let row = post_row(storage, post_id)?;
    let comment = storage
        .get_comment(post_id, comment_id)?
        .ok_or_else(|| CoreError::not_found("commentnotexists", "Comment does not exist"))?;
    if comment.user_id != user_id
        || !storage.delete_comment_by_author(post_id, comment_id, user_id)?
    {
        return Err(CoreError::NotAuthorized);
    }
    assemble(storage, row)
}
