//! 试卷库接口契约
//!
//! 核心逻辑只依赖这个 trait，HTTP 实现见 `ExamClient`，测试中使用内存实现。

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    Category, DisciplineId, DisciplineListItem, NewTest, RawTeacherDiscipline, RawTest, Session,
    TeacherLink, TermTests, TestId, UserData,
};

/// 试卷库接口
///
/// 除注册和登录外，所有调用都需要显式传入 `Session`。
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// 注册
    async fn sign_up(&self, user: &UserData) -> AppResult<()>;

    /// 登录，返回会话凭证
    async fn sign_in(&self, user: &UserData) -> AppResult<Session>;

    /// 按学期 → 学科 → 教师关联 嵌套的试卷快照
    async fn get_tests_by_discipline(&self, session: &Session) -> AppResult<Vec<TermTests>>;

    /// 扁平的教师-学科关联列表，每条内嵌教师、学科与试卷
    async fn get_tests_by_teacher(&self, session: &Session)
        -> AppResult<Vec<RawTeacherDiscipline>>;

    /// 全局类别列表
    async fn get_categories(&self, session: &Session) -> AppResult<Vec<Category>>;

    /// 扁平学科列表（新增试卷表单使用）
    async fn get_disciplines(&self, session: &Session) -> AppResult<Vec<DisciplineListItem>>;

    /// 某门学科下的教师关联
    async fn get_teachers_by_discipline(
        &self,
        session: &Session,
        discipline_id: DisciplineId,
    ) -> AppResult<Vec<TeacherLink>>;

    /// 新增试卷，返回创建后的记录
    async fn add_test(&self, session: &Session, test: &NewTest) -> AppResult<RawTest>;

    /// 查询单份试卷
    async fn get_test(&self, session: &Session, test_id: TestId) -> AppResult<RawTest>;
}
