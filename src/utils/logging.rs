/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 API 地址: {}", config.api_base_url);
    info!("⏱️ 请求超时: {} 秒", config.request_timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 记录页面加载结果
///
/// # 参数
/// - `page`: 页面名称
/// - `sections`: 顶层分组数量
/// - `entries`: 搜索条目数量
pub fn log_page_loaded(page: &str, sections: usize, entries: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📚 {} 加载完成", page);
    info!("📂 顶层分组: {} 个", sections);
    info!("🔎 搜索条目: {} 条", entries);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_text;

    #[test]
    fn truncates_by_chars_not_bytes() {
        assert_eq!(truncate_text("微积分期中考试", 3), "微积分...");
        assert_eq!(truncate_text("Midterm", 20), "Midterm");
    }
}
