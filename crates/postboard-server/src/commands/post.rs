//! Post command handlers

use anyhow::{Context, Result};

use postboard_core::{Config, NewPost, PostFilter, Store};

use crate::output::Output;

/// List posts, optionally filtered
pub fn list(
    config: &Config,
    author: Option<String>,
    date: Option<String>,
    time: Option<String>,
    output: &Output,
) -> Result<()> {
    let store = Store::open(config);
    let filter = PostFilter { author, date, time };

    let posts = store.list(&filter).context("Failed to list posts")?;
    output.print_posts(&posts)
}

/// Show a single post
pub fn show(config: &Config, id: u64, output: &Output) -> Result<()> {
    let store = Store::open(config);
    let post = store.get(id)?;
    output.print_post(&post)
}

/// Create a new post
pub fn create(
    config: &Config,
    author: String,
    subject: String,
    message: String,
    output: &Output,
) -> Result<()> {
    let store = Store::open(config);
    let post = store
        .create(&NewPost::new(author, subject, message))
        .context("Failed to create post")?;

    output.success(&format!("Created post {}", post.id));
    output.print_post(&post)
}

/// Toggle the like flag
pub fn like(config: &Config, id: u64, output: &Output) -> Result<()> {
    let store = Store::open(config);
    let post = store.toggle_like(id)?;

    let verb = if post.liked { "Liked" } else { "Unliked" };
    output.success(&format!("{} post {}", verb, post.id));
    Ok(())
}

/// Delete a post
pub fn delete(config: &Config, id: u64, output: &Output) -> Result<()> {
    let store = Store::open(config);
    let post = store.delete(id)?;

    output.success(&format!("Deleted post {} by {}", post.id, post.author));
    Ok(())
}
