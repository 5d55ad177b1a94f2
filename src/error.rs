use thiserror::Error;

/// 统一的用户提示：服务端没有返回可读信息时使用
pub const GENERIC_FAILURE_TEXT: &str = "出错了，请几秒后再试！";

/// 表单校验失败提示
pub const VALIDATION_FAILURE_TEXT: &str = "所有字段均为必填项！";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验错误（本地拦截，不会发起网络请求）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),

    /// 接口返回了非成功状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    Api {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },

    /// 请求没有拿到任何响应
    #[error("API请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 响应体无法解析为预期结构
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必填字段缺失
    #[error("必填字段缺失: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// 选中的选项不在当前选项列表中
    #[error("选项不存在: {field}={id}")]
    UnknownOption { field: &'static str, id: i64 },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建传输层错误
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建接口错误，空白的响应体视为没有消息
    pub fn api(endpoint: impl Into<String>, status: u16, body: Option<String>) -> Self {
        AppError::Api {
            endpoint: endpoint.into(),
            status,
            message: body.filter(|b| !b.trim().is_empty()),
        }
    }

    /// 是否是传输层错误（仅用于日志区分）
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport { .. })
    }

    /// 面向用户的提示文本
    ///
    /// 接口错误优先原样展示服务端消息，传输错误与接口错误对用户一视同仁。
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => VALIDATION_FAILURE_TEXT.to_string(),
            AppError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            AppError::Api { message: None, .. }
            | AppError::Transport { .. }
            | AppError::Decode { .. }
            | AppError::Config(_) => GENERIC_FAILURE_TEXT.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_surfaces_body_verbatim() {
        let e = AppError::api("/tests", 409, Some("已存在同名试卷".into()));
        assert_eq!(e.user_message(), "已存在同名试卷");
    }

    #[test]
    fn blank_api_body_falls_back_to_generic_text() {
        let e = AppError::api("/tests", 500, Some("   ".into()));
        assert_eq!(e.user_message(), GENERIC_FAILURE_TEXT);
    }

    #[test]
    fn transport_error_reads_like_api_error_for_users() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let e = AppError::transport("/categories", io);
        assert!(e.is_transport());
        assert_eq!(e.user_message(), GENERIC_FAILURE_TEXT);
        assert!(e.to_string().contains("/categories"));
    }

    #[test]
    fn validation_error_lists_missing_fields() {
        let e = ValidationError::MissingFields(vec!["name", "categoryId"]);
        assert_eq!(e.to_string(), "必填字段缺失: name, categoryId");
        let app: AppError = e.into();
        assert_eq!(app.user_message(), VALIDATION_FAILURE_TEXT);
    }
}
