use serde::{Deserialize, Serialize};

use ns_core::ContextResult;

/// Query of `POST /api/context/refresh`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshQuery {
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextListResponse {
    pub sources: Vec<String>,
    pub contexts: Vec<ContextResult>,
}
