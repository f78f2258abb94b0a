use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct APIError {
    /// Machine readable error kind, e.g. `not_found` or `validation`.
    pub cause: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: APIError,
}

impl ErrorResponse {
    pub fn new(cause: &str, field: Option<&str>, message: String) -> Self {
        Self {
            error: APIError {
                cause: cause.to_string(),
                field: field.map(str::to_string),
                message,
            },
        }
    }
}
