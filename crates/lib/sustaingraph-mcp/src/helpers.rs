use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use sustaingraph_core::control::ControlError;
use tracing::warn;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Bad arguments become `INVALID_PARAMS`; everything else is an internal error.
pub fn map_err(err: ControlError) -> ErrorData {
    match err {
        ControlError::InvalidInput(message) => mcp_err(ErrorCode::INVALID_PARAMS, message),
        other => {
            warn!(error = %other, "tool call failed");
            mcp_err(ErrorCode::INTERNAL_ERROR, other.to_string())
        }
    }
}
