use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::clients::{ExamApi, ExamClient};
use crate::config::Config;
use crate::models::{Session, UserData};
use crate::orchestrator::page_loader::{load_page, LoadedPage};
use crate::search::SearchEntry;
use crate::utils::{log_page_loaded, log_startup, truncate_text};
use crate::views::{Section, TermSection, TeacherSection, ViewKind};

/// 应用主结构
pub struct App {
    config: Config,
    client: ExamClient,
    session: Session,
}

impl App {
    /// 初始化应用：创建客户端并登录
    pub async fn initialize(config: Config) -> Result<Self> {
        Self::connect(config, false).await
    }

    /// 先用配置中的账号注册，再登录
    pub async fn register(config: Config) -> Result<Self> {
        Self::connect(config, true).await
    }

    async fn connect(config: Config, sign_up: bool) -> Result<Self> {
        log_startup(&config);

        if !config.has_credentials() {
            bail!("缺少登录信息，请设置 EXAM_EMAIL 和 EXAM_PASSWORD");
        }

        let client = ExamClient::new(&config)?;
        let user = UserData {
            email: config.email.clone(),
            password: config.password.clone(),
        };

        if sign_up {
            client.sign_up(&user).await.context("注册失败")?;
            info!("✓ 注册成功: {}", config.email);
        }

        let session = client.sign_in(&user).await.context("登录失败")?;

        info!("✓ 登录成功: {}", config.email);

        Ok(Self {
            config,
            client,
            session,
        })
    }

    /// 运行应用主逻辑：并发加载两个页面并输出分组
    pub async fn run(&self, query: Option<&str>) -> Result<()> {
        let (by_discipline, by_teacher) = futures::join!(
            load_page(&self.client, &self.session, ViewKind::ByDiscipline),
            load_page(&self.client, &self.session, ViewKind::ByTeacher)
        );

        for page in [&by_discipline, &by_teacher] {
            for notice in &page.notices {
                warn!("⚠️ [{}] {}", page.kind, notice.text);
            }
            log_page_loaded(&page.kind.to_string(), page.top_level_count(), page.index.len());
        }

        for term in by_discipline.discipline_view().terms() {
            self.log_term(&term);
        }
        for section in by_teacher.teacher_view().sections() {
            self.log_teacher(&section);
        }

        if let Some(query) = query {
            log_matches(&by_discipline, query);
            log_matches(&by_teacher, query);
        }

        Ok(())
    }

    // ========== 日志辅助方法 ==========

    fn log_term(&self, term: &TermSection<'_>) {
        info!("📅 {}", term.heading());
        match &term.disciplines {
            Section::Placeholder(text) => info!("    {}", text),
            Section::Items(disciplines) => {
                for section in disciplines {
                    info!("  📘 {}", section.discipline.name);
                    match &section.categories {
                        Section::Placeholder(text) => info!("      {}", text),
                        Section::Items(groups) => {
                            for group in groups {
                                info!("    🏷️ {} ({} 份)", group.category.name, group.tests.len());
                                if self.config.verbose_logging {
                                    for line in &group.tests {
                                        info!("      {} ({})", line.test.name, line.teacher);
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn log_teacher(&self, section: &TeacherSection<'_>) {
        info!("👤 {}", section.teacher);
        for group in &section.categories {
            info!("  🏷️ {} ({} 份)", group.category.name, group.tests.len());
            if self.config.verbose_logging {
                for line in &group.tests {
                    info!("    {} ({})", line.test.name, line.discipline);
                }
            }
        }
    }
}

fn log_matches(page: &LoadedPage, query: &str) {
    let hits: Vec<&SearchEntry> = page.search(query);
    info!("🔎 [{}] \"{}\" 命中 {} 条", page.kind, query, hits.len());
    for entry in hits {
        info!("    #{} {}", entry.id, truncate_text(&entry.label, 80));
    }
}
