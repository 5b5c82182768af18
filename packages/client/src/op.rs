//! Progress of a single asynchronous user action.

use crate::error::FlowError;

/// One async operation: never started, in flight, or finished.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncOp<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for AsyncOp<T> {
    fn default() -> Self {
        AsyncOp::Idle
    }
}

impl<T> AsyncOp<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncOp::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            AsyncOp::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AsyncOp::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Mark as in flight. Returns `false` if it already was, so callers can
    /// ignore repeated clicks.
    pub fn start(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = AsyncOp::Pending;
        true
    }

    pub fn finish(&mut self, result: Result<T, FlowError>) {
        *self = result.into();
    }
}

impl<T> From<Result<T, FlowError>> for AsyncOp<T> {
    fn from(result: Result<T, FlowError>) -> Self {
        match result {
            Ok(value) => AsyncOp::Succeeded(value),
            Err(FlowError::Cancelled) => AsyncOp::Idle,
            Err(e) => AsyncOp::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut op: AsyncOp<u32> = AsyncOp::default();
        assert_eq!(op, AsyncOp::Idle);

        assert!(op.start());
        assert!(!op.start());
        assert!(op.is_pending());

        op.finish(Ok(7));
        assert_eq!(op.value(), Some(&7));
        assert!(!op.is_pending());

        assert!(op.start());
        op.finish(Err(FlowError::validation("Please add a caption")));
        assert_eq!(op.error(), Some("Please add a caption"));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut op: AsyncOp<()> = AsyncOp::Pending;
        op.finish(Err(FlowError::Cancelled));
        assert_eq!(op, AsyncOp::Idle);
    }
}
