use serde::{Deserialize, Serialize};

/// A random number fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriviaFact {
    /// The number the fact is about. Can exceed `i64`, so kept as a float.
    pub number: f64,
    pub text: String,
}
