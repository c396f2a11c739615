//! Tags Data

/// New Tag Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub label: String,
}
