//! Field validation for new posts

use thiserror::Error;

use crate::models::NewPost;

pub const MIN_AUTHOR_LEN: usize = 2;
pub const MIN_SUBJECT_LEN: usize = 3;
pub const MIN_MESSAGE_LEN: usize = 5;

/// Reasons a new post is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Author, subject and message are required")]
    MissingFields,

    #[error("Author name must be at least 2 characters")]
    AuthorTooShort,

    #[error("Subject must be at least 3 characters")]
    SubjectTooShort,

    #[error("Message must be at least 5 characters")]
    MessageTooShort,
}

impl ValidationError {
    /// Short title naming what failed
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Invalid data",
            ValidationError::AuthorTooShort => "Invalid author",
            ValidationError::SubjectTooShort => "Invalid subject",
            ValidationError::MessageTooShort => "Invalid message",
        }
    }
}

/// Trimmed fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub author: String,
    pub subject: String,
    pub message: String,
}

/// Validate a new post.
///
/// Presence is checked first, then lengths after trimming, in the order
/// author, subject, message.
pub fn validate(input: &NewPost) -> Result<ValidPost, ValidationError> {
    let (author, subject, message) = match (
        present(&input.author),
        present(&input.subject),
        present(&input.message),
    ) {
        (Some(a), Some(s), Some(m)) => (a.trim(), s.trim(), m.trim()),
        _ => return Err(ValidationError::MissingFields),
    };

    if author.chars().count() < MIN_AUTHOR_LEN {
        return Err(ValidationError::AuthorTooShort);
    }
    if subject.chars().count() < MIN_SUBJECT_LEN {
        return Err(ValidationError::SubjectTooShort);
    }
    if message.chars().count() < MIN_MESSAGE_LEN {
        return Err(ValidationError::MessageTooShort);
    }

    Ok(ValidPost {
        author: author.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
    })
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}
