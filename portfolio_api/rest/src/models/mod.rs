use std::borrow::Cow;

use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiResult {
    pub success: bool,
    pub message: Cow<'static, str>,
}
