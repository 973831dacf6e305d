pub mod inference;
pub mod recommendation;

/// Lifecycle of one asynchronous unit of work with its own pending, result,
/// and error state.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage<T, E> {
    Idle,
    Pending,
    Complete(T),
    Failed(E),
}

impl<T, E> Stage<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Complete(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
