use crate::error::FieldError;

/// Lifecycle of one form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    /// Accepted by validation; the operation runs on the next frame.
    Submitted,
    Ready(T),
    Failed(String),
}

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Phase::Idle
    }
}

impl<T> Phase<T> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Phase::Submitted)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Phase::Ready(v) => Some(v),
            _ => None,
        }
    }
}

pub fn require(label: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required(label));
    }
    Ok(())
}
