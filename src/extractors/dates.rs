//! Extract and validate the `:start` / `:end` date path segments.

use crate::dates::ObsDate;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

/// Date window from the path. `end` is `None` on the open-ended route.
#[derive(Clone, Debug)]
pub struct DateRange {
    pub start: ObsDate,
    pub end: Option<ObsDate>,
}

#[async_trait]
impl<S> FromRequestParts<S> for DateRange
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segments) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let start = segments
            .get("start")
            .ok_or_else(|| AppError::BadRequest("missing start date".into()))?;
        let start = ObsDate::parse(start)?;
        let end = segments.get("end").map(|s| ObsDate::parse(s)).transpose()?;
        Ok(DateRange { start, end })
    }
}
