//! 按学科视图：学期 → 学科 → 类别 → 试卷

use crate::graph::EntityGraph;
use crate::models::{Discipline, DisciplineId, Term};
use crate::search::{discipline_label, SearchIndex, SearchIndexBuilder};
use crate::views::{CategoryGroup, Scope, Section, ViewBuilder};

/// 学期下没有学科时的占位文本
pub const EMPTY_TERM_TEXT: &str = "本学期暂无试卷...";

/// 学科下没有教师关联时的占位文本
pub const EMPTY_DISCIPLINE_TEXT: &str = "该学科暂无试卷...";

/// 学期分组
#[derive(Debug, Clone, PartialEq)]
pub struct TermSection<'g> {
    pub term: &'g Term,
    pub disciplines: Section<DisciplineSection<'g>>,
}

impl TermSection<'_> {
    pub fn heading(&self) -> String {
        format!("第 {} 学期", self.term.number)
    }
}

/// 学科分组
#[derive(Debug, Clone, PartialEq)]
pub struct DisciplineSection<'g> {
    pub discipline: &'g Discipline,
    pub categories: Section<CategoryGroup<'g>>,
}

/// 按学科视图
#[derive(Debug, Clone, Copy)]
pub struct DisciplineView<'g> {
    graph: &'g EntityGraph,
}

impl<'g> DisciplineView<'g> {
    pub fn new(graph: &'g EntityGraph) -> Self {
        Self { graph }
    }

    /// 完整的分组树，空学期/空学科以占位文本表示
    pub fn terms(&self) -> Vec<TermSection<'g>> {
        self.graph
            .terms()
            .iter()
            .map(|term| TermSection {
                term,
                disciplines: self.discipline_sections(term),
            })
            .collect()
    }

    fn discipline_sections(&self, term: &Term) -> Section<DisciplineSection<'g>> {
        let disciplines = self.graph.disciplines_of_term(term.id);
        if disciplines.is_empty() {
            return Section::Placeholder(EMPTY_TERM_TEXT);
        }

        Section::Items(
            disciplines
                .into_iter()
                .map(|discipline| DisciplineSection {
                    discipline,
                    categories: if self.graph.links_of_discipline(discipline.id).is_empty() {
                        Section::Placeholder(EMPTY_DISCIPLINE_TEXT)
                    } else {
                        Section::Items(self.category_groups(&discipline.id))
                    },
                })
                .collect(),
        )
    }
}

impl<'g> ViewBuilder<'g> for DisciplineView<'g> {
    type Key = DisciplineId;

    fn graph(&self) -> &'g EntityGraph {
        self.graph
    }

    /// 每门学科只取第一条教师关联的试卷进入索引
    // 这是沿用下来的既有行为，其他教师的试卷只能在分组树里找到
    fn build_index(&self) -> SearchIndex {
        let mut builder = SearchIndexBuilder::new();

        for term in self.graph.terms() {
            for discipline in self.graph.disciplines_of_term(term.id) {
                let links = self.graph.links_of_discipline(discipline.id);
                let Some(first) = links.first() else {
                    continue;
                };
                let teacher = self.graph.teacher_name(first);

                for test in &first.tests {
                    let category = self.graph.category_label(test.category_id);
                    builder.push(
                        discipline_label(&discipline.name, &category, &test.name, teacher),
                        test.id,
                    );
                }
            }
        }

        builder.finish()
    }

    fn scope_for_category(&self, key: &DisciplineId) -> Scope<'g> {
        Scope::new(self.graph.links_of_discipline(*key))
    }
}
