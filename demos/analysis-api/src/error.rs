use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code and optional structured detail.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<Value>,
}

impl AppError {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });
        if let Some(detail) = self.detail {
            body["detail"] = detail;
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<deckcore::DeckcoreError> for AppError {
    fn from(e: deckcore::DeckcoreError) -> Self {
        use deckcore::DeckcoreError as E;
        match &e {
            E::InvalidInput(_) => AppError::bad_request(e.to_string()),
            E::UnknownPokemon { candidates } => AppError::not_found(e.to_string())
                .with_detail(json!({ "candidates": candidates })),
            E::NoMatches { .. } => AppError::not_found(e.to_string()),
            E::NoUsableDecklists { errors, .. } => {
                // report at most the first few per-item failures
                let truncated: Vec<Value> = errors
                    .iter()
                    .take(5)
                    .map(|f| {
                        json!({
                            "date": f.date,
                            "decklistUrl": f.decklist_url,
                            "reason": f.reason,
                        })
                    })
                    .collect();
                AppError::bad_gateway(e.to_string()).with_detail(json!({ "errors": truncated }))
            }
            E::CoreOverflow {
                targets,
                core_totals,
                overflow,
            } => AppError::conflict(
                "core cards exceed one or more category quotas; a fixed-budget deck cannot be built",
            )
            .with_detail(json!({
                "targets": targets,
                "coreCategoryTotals": core_totals,
                "overflow": overflow
                    .iter()
                    .map(|(cat, by)| json!({ "category": cat, "over": by }))
                    .collect::<Vec<_>>(),
            })),
            E::Http(_) | E::Status { .. } => AppError::bad_gateway(e.to_string()),
            _ => AppError::internal(e.to_string()),
        }
    }
}
