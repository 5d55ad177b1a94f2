//! 视图层
//!
//! 同一张实体图的两种只读投影：
//! - `DisciplineView`：学期 → 学科 → 类别 → 试卷
//! - `TeacherView`：教师 → 类别 → 学科 → 试卷
//!
//! 两者都实现 `ViewBuilder`，共用 `category_filter` 的判断逻辑；
//! 视图只借用图中的数据，不复制也不修改试卷。

pub mod by_discipline;
pub mod by_teacher;
pub mod category_filter;

pub use by_discipline::{DisciplineSection, DisciplineView, TermSection};
pub use by_teacher::{TeacherSection, TeacherView};
pub use category_filter::{include_category, visible_categories};

use crate::graph::EntityGraph;
use crate::models::{Category, TeacherDiscipline, Test};
use crate::search::SearchIndex;

/// 当前展示的视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    ByDiscipline,
    ByTeacher,
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::ByDiscipline => write!(f, "按学科"),
            ViewKind::ByTeacher => write!(f, "按教师"),
        }
    }
}

/// 类别过滤的范围：一组教师-学科关联
#[derive(Debug, Clone, Default)]
pub struct Scope<'g> {
    links: Vec<&'g TeacherDiscipline>,
}

impl<'g> Scope<'g> {
    pub fn new(links: Vec<&'g TeacherDiscipline>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[&'g TeacherDiscipline] {
        &self.links
    }

    /// 范围内的全部试卷
    pub fn tests(&self) -> impl Iterator<Item = &'g Test> + '_ {
        self.links.iter().flat_map(|&link| link.tests.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// 分组内容：要么是条目，要么是"暂无数据"占位
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Placeholder(&'static str),
    Items(Vec<T>),
}

impl<T> Section<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Section::Items(items) => items,
            Section::Placeholder(_) => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Section::Placeholder(_))
    }
}

/// 一行试卷，附带所属教师和学科名称
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestLine<'g> {
    pub test: &'g Test,
    pub teacher: &'g str,
    pub discipline: &'g str,
}

/// 某类别下的试卷
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'g> {
    pub category: &'g Category,
    pub tests: Vec<TestLine<'g>>,
}

/// 两种视图的共同能力
pub trait ViewBuilder<'g> {
    /// 分组键：学科 id 或教师姓名
    type Key: ?Sized;

    fn graph(&self) -> &'g EntityGraph;

    /// 生成搜索索引（每次图加载后调用一次）
    fn build_index(&self) -> SearchIndex;

    /// 某个分组键对应的类别过滤范围
    fn scope_for_category(&self, key: &Self::Key) -> Scope<'g>;

    /// 该分组下需要展示的类别
    fn visible_categories(&self, key: &Self::Key) -> Vec<&'g Category> {
        visible_categories(self.graph().categories(), &self.scope_for_category(key))
    }

    /// 按类别归组后的试卷，只列出属于该类别的试卷
    fn category_groups(&self, key: &Self::Key) -> Vec<CategoryGroup<'g>> {
        let graph = self.graph();
        let scope = self.scope_for_category(key);

        visible_categories(graph.categories(), &scope)
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                tests: scope
                    .links()
                    .iter()
                    .flat_map(|&link| {
                        link.tests_in_category(category.id).map(move |test| TestLine {
                            test,
                            teacher: graph.teacher_name(link),
                            discipline: graph.discipline_name(link),
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}
