//! Task title input and its validation.

use thiserror::Error;

/// Minimum number of characters in a task title.
pub const MIN_TITLE_LEN: usize = 3;

/// Reasons a task title is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("a task title is required")]
    Required,
    #[error("task title must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// Check a candidate title. Length is counted in Unicode scalar values and
/// the value is not trimmed.
///
/// A browser `minlength` check counts UTF-16 code units instead, so it takes
/// `"😀😀"` as four characters and accepts it. Here it is two and rejected.
pub fn validate_title(value: &str) -> Result<(), TitleError> {
    let len = value.chars().count();
    if len == 0 {
        Err(TitleError::Required)
    } else if len < MIN_TITLE_LEN {
        Err(TitleError::TooShort {
            min: MIN_TITLE_LEN,
            actual: len,
        })
    } else {
        Ok(())
    }
}

/// The single text field of the timer form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleInput {
    value: String,
}

impl TitleInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.value.pop()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn validate(&self) -> Result<(), TitleError> {
        validate_title(&self.value)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
