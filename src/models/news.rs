use serde::{Deserialize, Serialize};

/// A single top headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub title: String,
    /// Publisher name, e.g. `The Verge`
    pub source: String,
    pub url: Option<String>,
}
