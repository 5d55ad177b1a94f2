use std::fmt;

/// 登录凭证
///
/// 显式传入每一次接口调用，会话期间只读。
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// `Authorization` 请求头的值
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// 不把 token 打进日志
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"***").finish()
    }
}
