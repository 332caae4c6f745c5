use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::common::errors::TradeError;

/// HTTP wrapper rendering a [`TradeError`] as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError(pub TradeError);

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TradeError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            TradeError::OutgoingPlayerLocked(_) => StatusCode::CONFLICT,
            TradeError::InvalidPositionSet
            | TradeError::InvalidStrategy(_)
            | TradeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            TradeError::CandidatePoolTooLarge { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TradeError::TeamListUnavailable | TradeError::SearchTimedOut { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            TradeError::CatalogLoad(_)
            | TradeError::Configuration(_)
            | TradeError::Csv(_)
            | TradeError::Io(_)
            | TradeError::Database(_)
            | TradeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TradeError::PlayerNotFound("X".into()), StatusCode::NOT_FOUND),
            (TradeError::OutgoingPlayerLocked("X".into()), StatusCode::CONFLICT),
            (TradeError::InvalidPositionSet, StatusCode::BAD_REQUEST),
            (TradeError::InvalidStrategy("9".into()), StatusCode::BAD_REQUEST),
            (
                TradeError::CandidatePoolTooLarge { size: 2000, limit: 1500 },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (TradeError::TeamListUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (TradeError::SearchTimedOut { evaluated: 10 }, StatusCode::SERVICE_UNAVAILABLE),
            (TradeError::CatalogLoad("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn test_client_errors_are_4xx() {
        let err = TradeError::InvalidRequest("player1 is required".into());
        assert!(err.is_client_error());
        assert!(ApiError(err).status().is_client_error());
    }
}
