//! Route handlers.

pub mod answer;
pub mod health;
pub mod page;
pub mod plants;

use serde::Serialize;

/// Response envelope shared by the `/api` endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub data: T,
    pub msg: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            data,
            msg: "success".to_string(),
        }
    }

    pub fn error(code: u16, data: T, msg: impl Into<String>) -> Self {
        Self {
            code,
            data,
            msg: msg.into(),
        }
    }
}
