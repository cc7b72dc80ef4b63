use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod receipts;
mod server;

pub mod types {
    pub mod receipt {
        pub use api_types::receipt::{
            RawReceipt, RawReceiptItem, ReceiptList, ReceiptRange, ReceiptUploaded, ReceiptView,
        };
    }

    pub mod stats {
        pub use api_types::stats::ReceiptStats;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

/// Error envelope shared by both endpoints.
///
/// `success` is always `false` here; the field is carried explicitly so
/// clients can branch on it without looking at the status code.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

// Validation failures deliberately answer 200 with success:false, matching
// the behavior clients already depend on. Everything else is a 500.
fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::OK,
        EngineError::Parse(_)
        | EngineError::Timeout(_)
        | EngineError::KeyNotFound(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for_engine_error(err: EngineError) -> ErrorBody {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            ErrorBody {
                success: false,
                error: db_err.to_string(),
                details: Some(format!("{db_err:?}")),
            }
        }
        other => ErrorBody {
            success: false,
            error: other.to_string(),
            details: None,
        },
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Generic(error) => (
                StatusCode::OK,
                ErrorBody {
                    success: false,
                    error,
                    details: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
