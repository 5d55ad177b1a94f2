//! 面向用户的临时提示
//!
//! 接口失败只在发起调用的边界处转换为提示，不向上传播。

use tracing::{error, warn};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// 把错误转换为提示并记录日志；传输错误和接口错误只在日志中区分
    pub fn from_error(err: &AppError) -> Self {
        if err.is_transport() {
            error!("❌ 请求未完成: {}", err);
        } else {
            warn!("⚠️ 操作失败: {}", err);
        }
        Self::error(err.user_message())
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
