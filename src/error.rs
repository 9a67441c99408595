use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

/// Rejections of trip requests at the HTTP boundary. The generator itself
/// never fails.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TripRequestError {
    #[error("destination_city must not be empty")]
    EmptyDestination,

    #[error("trip_length_days must be between 1 and {max}, got {got}")]
    TripLengthOutOfRange { got: u32, max: u32 },

    #[error("count must be between 1 and {max}, got {got}")]
    FeedCountOutOfRange { got: usize, max: usize },

    #[error("start_offset must be at most {max}, got {got}")]
    FeedOffsetOutOfRange { got: usize, max: usize },
}

impl ResponseError for TripRequestError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
