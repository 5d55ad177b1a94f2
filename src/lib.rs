//! # Exam Vault
//!
//! 试卷库客户端：按学科或按教师浏览试卷、搜索、打开 PDF、新增试卷
//!
//! ## 架构设计
//!
//! ### ① 接口层（Clients）
//! - `clients/` - `ExamApi` 接口契约与 HTTP 实现 `ExamClient`
//!
//! ### ② 数据层（Graph）
//! - `graph/` - 把两种快照规整为同一张只读实体图
//!
//! ### ③ 计算层（Views / Search）
//! - `views/` - 按学科、按教师两种投影，共用类别过滤
//! - `search/` - 搜索条目构建与查询
//!
//! ### ④ 流程层（Workflow / Services）
//! - `workflow/` - 新增试卷表单的级联选择与提交
//! - `services/` - 选中搜索条目后查询并跳转
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/page_loader` - 页面加载
//! - `orchestrator/app` - 命令行应用
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod graph;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod search;
pub mod services;
pub mod utils;
pub mod views;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ExamApi, ExamClient};
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use graph::EntityGraph;
pub use models::Session;
pub use orchestrator::{load_page, App, LoadedPage};
pub use search::{SearchEntry, SearchIndex, SearchIndexBuilder};
pub use services::{Navigation, TestLookup};
pub use views::{DisciplineView, TeacherView, ViewBuilder, ViewKind};
pub use workflow::{AddTestFlow, CascadeOutcome, CascadeSelector, Notice};
