//! 工具模块 - 错误类型与日志工具

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
