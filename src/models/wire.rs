//! 接口原始数据结构
//!
//! 与服务端 JSON 一一对应（camelCase），缺失的嵌套数组一律按空处理。

use serde::{Deserialize, Serialize};

use super::entity::{Category, CategoryId, DisciplineId, Teacher, TeacherId, Term, TermId, TestId};

/// 登录/注册请求体
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub email: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub token: String,
}

/// 试卷原始数据，类别可能是 id，也可能是内嵌对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTest {
    pub id: TestId,
    pub name: String,
    pub pdf_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl RawTest {
    /// 解析出类别 id，显式的 `categoryId` 优先
    pub fn resolved_category_id(&self) -> Option<CategoryId> {
        self.category_id
            .or_else(|| self.category.as_ref().map(|c| c.id))
    }
}

/// 学科引用（按教师分组时内嵌在关联中）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDisciplineRef {
    pub id: DisciplineId,
    pub name: String,
    #[serde(default)]
    pub term_id: Option<TermId>,
    #[serde(default)]
    pub term: Option<Term>,
}

impl RawDisciplineRef {
    pub fn resolved_term_id(&self) -> Option<TermId> {
        self.term_id.or_else(|| self.term.as_ref().map(|t| t.id))
    }
}

/// 教师-学科关联的原始数据
///
/// 按学科分组时 `discipline` 由外层隐含；按教师分组时内嵌。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeacherDiscipline {
    pub id: i64,
    pub teacher: Teacher,
    #[serde(default)]
    pub discipline: Option<RawDisciplineRef>,
    #[serde(default)]
    pub tests: Vec<RawTest>,
}

/// 按学科分组快照中的学科节点
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiscipline {
    pub id: DisciplineId,
    pub name: String,
    #[serde(default)]
    pub teacher_disciplines: Vec<RawTeacherDiscipline>,
}

/// `GET /tests?groupBy=disciplines` 的学期节点
#[derive(Debug, Clone, Deserialize)]
pub struct TermTests {
    pub id: TermId,
    pub number: i64,
    #[serde(default)]
    pub disciplines: Vec<RawDiscipline>,
}

/// `GET /disciplines` 的扁平学科条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineListItem {
    pub id: DisciplineId,
    pub name: String,
    pub term_id: TermId,
}

/// `GET /teachers/{disciplineId}` 的条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLink {
    pub id: i64,
    pub teacher_id: TeacherId,
    pub discipline_id: DisciplineId,
    pub teacher: Teacher,
}

/// 新增试卷的提交数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTest {
    pub name: String,
    pub pdf_url: String,
    pub category_id: CategoryId,
    pub teacher_discipline_id: i64,
}

// ========== 响应包装 ==========

#[derive(Debug, Deserialize)]
pub struct TestsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub tests: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub struct DisciplinesEnvelope {
    #[serde(default)]
    pub disciplines: Vec<DisciplineListItem>,
}

#[derive(Debug, Deserialize)]
pub struct TeachersEnvelope {
    #[serde(default)]
    pub teachers: Vec<TeacherLink>,
}
