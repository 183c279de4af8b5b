/// What a screen should show.
///
/// Each update replaces the previous state wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Content(T),
    Empty,
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            Self::Content(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}
