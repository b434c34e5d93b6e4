/// A request to change a global visibility state.
///
/// `Show` and `Hide` force a state and are idempotent; `Toggle` flips
/// whatever the current state is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRequest {
    Show,
    Hide,
    Toggle,
}

impl VisibilityRequest {
    /// Resolves the desired visibility from the current one.
    pub fn resolve(self, currently_visible: bool) -> bool {
        match self {
            Self::Show => true,
            Self::Hide => false,
            Self::Toggle => !currently_visible,
        }
    }
}
