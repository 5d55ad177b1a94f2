//! 按教师视图：教师 → 类别 → 学科 → 试卷
//!
//! 教师按姓名去重：同名的两位教师会被合并为一组。

use std::collections::HashSet;

use crate::graph::EntityGraph;
use crate::search::{teacher_label, SearchIndex, SearchIndexBuilder};
use crate::views::{CategoryGroup, Scope, ViewBuilder};

/// 教师分组
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherSection<'g> {
    pub teacher: &'g str,
    pub categories: Vec<CategoryGroup<'g>>,
}

/// 按教师视图
#[derive(Debug, Clone, Copy)]
pub struct TeacherView<'g> {
    graph: &'g EntityGraph,
}

impl<'g> TeacherView<'g> {
    pub fn new(graph: &'g EntityGraph) -> Self {
        Self { graph }
    }

    /// 去重后的教师姓名，保持首次出现的顺序
    pub fn teachers(&self) -> Vec<&'g str> {
        let mut seen = HashSet::new();
        self.graph
            .links()
            .iter()
            .map(|link| self.graph.teacher_name(link))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// 完整的分组树
    pub fn sections(&self) -> Vec<TeacherSection<'g>> {
        self.teachers()
            .into_iter()
            .map(|teacher| TeacherSection {
                teacher,
                categories: self.category_groups(teacher),
            })
            .collect()
    }
}

impl<'g> ViewBuilder<'g> for TeacherView<'g> {
    type Key = str;

    fn graph(&self) -> &'g EntityGraph {
        self.graph
    }

    /// 所有关联的试卷都进入索引
    fn build_index(&self) -> SearchIndex {
        let mut builder = SearchIndexBuilder::new();

        for link in self.graph.links() {
            let teacher = self.graph.teacher_name(link);
            for test in &link.tests {
                let category = self.graph.category_label(test.category_id);
                builder.push(teacher_label(teacher, &category, &test.name), test.id);
            }
        }

        builder.finish()
    }

    fn scope_for_category(&self, teacher: &str) -> Scope<'g> {
        Scope::new(
            self.graph
                .links()
                .iter()
                .filter(|link| self.graph.teacher_name(link) == teacher)
                .collect(),
        )
    }
}
