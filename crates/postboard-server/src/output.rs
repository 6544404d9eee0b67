//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use serde::Serialize;

use postboard_core::Post;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single post
    pub fn print_post(&self, post: &Post) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", post.id);
                println!("Author:   {}", post.author);
                println!("Subject:  {}", post.subject);
                println!("Created:  {}", post.created_at.format("%Y-%m-%d %H:%M"));
                println!("Liked:    {}", if post.liked { "yes" } else { "no" });
                println!();
                println!("{}", post.message);
            }
            OutputFormat::Json => print_json(post)?,
            OutputFormat::Quiet => println!("{}", post.id),
        }
        Ok(())
    }

    /// Print a list of posts
    pub fn print_posts(&self, posts: &[Post]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if posts.is_empty() {
                    println!("No posts found.");
                    return Ok(());
                }
                for post in posts {
                    println!(
                        "{:>4} | {} | {:<16} | {}{}",
                        post.id,
                        post.created_at.format("%Y-%m-%d %H:%M"),
                        truncate(&post.author, 16),
                        truncate_line(&post.subject, 40),
                        if post.liked { " ♥" } else { "" }
                    );
                }
                println!("\n{} post(s)", posts.len());
            }
            OutputFormat::Json => print_json(posts)?,
            OutputFormat::Quiet => {
                for post in posts {
                    println!("{}", post.id);
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
