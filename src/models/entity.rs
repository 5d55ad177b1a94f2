//! 规范化后的实体
//!
//! 由 `graph::EntityGraph` 从接口快照构建，构建后只读。

use serde::{Deserialize, Serialize};

pub type TermId = i64;
pub type DisciplineId = i64;
pub type TeacherId = i64;
pub type TeacherDisciplineId = i64;
pub type CategoryId = i64;
pub type TestId = i64;

/// 学期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub number: i64,
}

/// 学科，归属于唯一的学期
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discipline {
    pub id: DisciplineId,
    pub name: String,
    /// 按教师分组的快照不携带学期信息时为 `None`
    pub term_id: Option<TermId>,
}

/// 教师
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}

/// 试卷类别（全局枚举）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// 试卷记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test {
    pub id: TestId,
    pub name: String,
    pub pdf_url: String,
    pub category_id: CategoryId,
}

/// "某位教师教授某门学科"，唯一持有试卷列表的实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherDiscipline {
    pub id: TeacherDisciplineId,
    pub discipline_id: DisciplineId,
    pub teacher_id: TeacherId,
    pub tests: Vec<Test>,
}

impl TeacherDiscipline {
    /// 该关联下属于指定类别的试卷
    pub fn tests_in_category(&self, category_id: CategoryId) -> impl Iterator<Item = &Test> {
        self.tests
            .iter()
            .filter(move |test| test.category_id == category_id)
    }
}
