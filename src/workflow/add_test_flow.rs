//! 新增试卷流程
//!
//! 核心职责：在 `CascadeSelector` 外面包一层异步边界
//!
//! 1. 并发加载类别和学科选项
//! 2. 学科选择 → 依赖请求 → 按票据决定是否采用
//! 3. 提交前本地校验，通过后才调用接口
//!
//! 选择器放在互斥锁里，只在状态转换时加锁，网络请求期间不持有锁，
//! 因此两次学科选择可以交错进行。

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::clients::ExamApi;
use crate::error::{AppError, AppResult};
use crate::models::{CategoryId, DisciplineId, Session, TeacherDisciplineId};
use crate::utils::truncate_text;
use crate::workflow::cascade::CascadeSelector;
use crate::workflow::notice::Notice;

/// 新增成功的提示
pub const ADD_SUCCESS_TEXT: &str = "试卷添加成功！";

/// 学科选择的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// 响应已采用，携带新的教师选项数量
    Applied(usize),
    /// 期间又选择了其他学科，响应被丢弃
    Discarded,
    /// 请求失败或选择无效
    Failed(Notice),
}

/// 新增试卷流程
pub struct AddTestFlow<A: ExamApi + ?Sized> {
    api: Arc<A>,
    session: Session,
    selector: Mutex<CascadeSelector>,
}

impl<A: ExamApi + ?Sized> AddTestFlow<A> {
    /// 用已经准备好的选择器创建流程
    pub fn new(api: Arc<A>, session: Session, selector: CascadeSelector) -> Self {
        Self {
            api,
            session,
            selector: Mutex::new(selector),
        }
    }

    /// 并发加载类别和学科后创建流程
    pub async fn load(api: Arc<A>, session: Session) -> AppResult<Self> {
        let (categories, disciplines) = futures::try_join!(
            api.get_categories(&session),
            api.get_disciplines(&session)
        )?;

        info!(
            "📝 表单选项加载完成: 类别 {} 个, 学科 {} 个",
            categories.len(),
            disciplines.len()
        );

        let selector = CascadeSelector::new(&categories, &disciplines);
        Ok(Self::new(api, session, selector))
    }

    /// 当前状态的快照
    pub async fn snapshot(&self) -> CascadeSelector {
        self.selector.lock().await.clone()
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.selector.lock().await.set_name(name);
    }

    pub async fn set_pdf_url(&self, pdf_url: impl Into<String>) {
        self.selector.lock().await.set_pdf_url(pdf_url);
    }

    pub async fn select_category(&self, category_id: CategoryId) -> Result<(), Notice> {
        self.selector
            .lock()
            .await
            .select_category(category_id)
            .map_err(|e| Notice::from_error(&AppError::from(e)))
    }

    pub async fn select_teacher(&self, teacher_discipline_id: TeacherDisciplineId) -> Result<(), Notice> {
        self.selector
            .lock()
            .await
            .select_teacher(teacher_discipline_id)
            .map_err(|e| Notice::from_error(&AppError::from(e)))
    }

    /// 选择学科并拉取该学科下的教师
    pub async fn select_discipline(&self, discipline_id: DisciplineId) -> CascadeOutcome {
        let ticket = match self.selector.lock().await.select_discipline(discipline_id) {
            Ok(ticket) => ticket,
            Err(e) => return CascadeOutcome::Failed(Notice::from_error(&AppError::from(e))),
        };

        let result = self
            .api
            .get_teachers_by_discipline(&self.session, ticket.discipline_id())
            .await;

        let mut selector = self.selector.lock().await;
        match result {
            Ok(links) => {
                if selector.apply_teacher_links(ticket, &links) {
                    info!("👩‍🏫 学科 #{} 的教师选项: {} 个", discipline_id, links.len());
                    CascadeOutcome::Applied(links.len())
                } else {
                    CascadeOutcome::Discarded
                }
            }
            // 过期请求的失败不打扰用户
            Err(e) if !selector.is_current(&ticket) => {
                warn!("过期的教师请求失败 (学科 #{}): {}", discipline_id, e);
                CascadeOutcome::Discarded
            }
            Err(e) => CascadeOutcome::Failed(Notice::from_error(&e)),
        }
    }

    /// 提交表单
    ///
    /// 校验不通过时直接返回错误提示，不发起任何请求。创建的试卷不会合并进已加载的视图。
    pub async fn submit(&self) -> Notice {
        let new_test = match self.selector.lock().await.validate() {
            Ok(new_test) => new_test,
            Err(e) => return Notice::from_error(&AppError::from(e)),
        };

        info!("📤 提交试卷: {}", truncate_text(&new_test.name, 40));

        match self.api.add_test(&self.session, &new_test).await {
            Ok(created) => {
                info!("✓ 试卷已创建: #{}", created.id);
                Notice::success(ADD_SUCCESS_TEXT)
            }
            Err(e) => Notice::from_error(&e),
        }
    }
}
