use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// 程序配置
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 试卷库 API 地址
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 默认日志级别（RUST_LOG 优先）
    pub log_level: String,
    // --- 登录信息（仅命令行使用） ---
    pub email: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/".to_string(),
            request_timeout_secs: 15,
            verbose_logging: false,
            log_level: "info".to_string(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值，再应用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())?.with_env_overrides()
    }

    fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: env_string("EXAM_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: env_parsed("EXAM_REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            verbose_logging: env_parsed("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            log_level: env_string("LOG_LEVEL").unwrap_or(self.log_level),
            email: env_string("EXAM_EMAIL").unwrap_or(self.email),
            password: env_string("EXAM_PASSWORD").unwrap_or(self.password),
        })
    }

    /// 是否配置了登录信息
    pub fn has_credentials(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

// 不把密码打进日志
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("verbose_logging", &self.verbose_logging)
            .field("log_level", &self.log_level)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok()
}

fn env_parsed<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &'static str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type,
            }),
        Err(_) => Ok(None),
    }
}
