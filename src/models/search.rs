use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[serde(default)]
    #[validate(length(min = 1, message = "Search query must not be empty"))]
    pub q: String,
}
