use serde::{Deserialize, Serialize};

/// A Somfy installation, usually one home with one hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub label: String,
}
