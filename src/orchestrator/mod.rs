//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `page_loader` - 页面加载
//! - 并发请求试卷快照与类别
//! - 构建实体图，生成一次搜索索引
//! - 请求失败降级为空数据 + 提示
//!
//! ### `app` - 命令行应用
//! - 登录并持有会话
//! - 并发加载两个页面，输出分组与搜索结果
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! page_loader / workflow::AddTestFlow
//!     ↓
//! views + search（纯计算）
//!     ↓
//! graph::EntityGraph
//!     ↓
//! clients（ExamApi）
//! ```

pub mod app;
pub mod page_loader;

pub use app::App;
pub use page_loader::{load_page, LoadedPage};
