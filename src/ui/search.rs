/// Queries at or below this many characters never reach the catalog
pub const MIN_QUERY_CHARS: usize = 2;

/// What one search-box input event asks the server for.
///
/// Only the input length decides; the query text is forwarded verbatim, so
/// whitespace counts like any other character. Picking a suggestion, the
/// confirm button and dropping out-of-order responses belong to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Clear the suggestion list; no search is issued
    Clear,
    Search(String),
}

impl InputAction {
    pub fn from_input(text: &str) -> Self {
        if text.chars().count() <= MIN_QUERY_CHARS {
            InputAction::Clear
        } else {
            InputAction::Search(text.to_string())
        }
    }
}
