//! 实体图
//!
//! 把两种接口快照（按学科嵌套 / 按教师扁平）规范化为同一套只读结构，
//! 两个视图都建立在它之上。

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::models::wire::{RawTeacherDiscipline, RawTest, TermTests};
use crate::models::{
    Category, CategoryId, Discipline, DisciplineId, Teacher, TeacherDiscipline, TeacherId, Term,
    TermId, Test,
};

/// 实体图，构建后不可变，重新加载时整体替换
#[derive(Debug, Default)]
pub struct EntityGraph {
    terms: Vec<Term>,
    disciplines: Vec<Discipline>,
    teachers: Vec<Teacher>,
    links: Vec<TeacherDiscipline>,
    categories: Vec<Category>,
    /// 生成搜索标签用；全局类别优先，缺失时回退到试卷内嵌的类别名
    category_names: HashMap<CategoryId, String>,
    discipline_index: HashMap<DisciplineId, usize>,
    teacher_index: HashMap<TeacherId, usize>,
    disciplines_by_term: HashMap<TermId, Vec<usize>>,
    links_by_discipline: HashMap<DisciplineId, Vec<usize>>,
}

impl EntityGraph {
    /// 空图（数据尚未到达时使用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从按学科分组的快照构建
    pub fn from_terms(terms: Vec<TermTests>, categories: Vec<Category>) -> Self {
        let mut builder = GraphBuilder::default();

        for term in terms {
            builder.add_term(Term {
                id: term.id,
                number: term.number,
            });
            for discipline in term.disciplines {
                builder.add_discipline(Discipline {
                    id: discipline.id,
                    name: discipline.name,
                    term_id: Some(term.id),
                });
                for link in discipline.teacher_disciplines {
                    builder.add_link(discipline.id, link);
                }
            }
        }

        builder.finish(categories)
    }

    /// 从按教师分组的扁平快照构建
    ///
    /// 缺少学科信息的关联无法挂到任何学科下，直接丢弃。
    pub fn from_teacher_links(links: Vec<RawTeacherDiscipline>, categories: Vec<Category>) -> Self {
        let mut builder = GraphBuilder::default();

        for mut link in links {
            let Some(discipline) = link.discipline.take() else {
                warn!("⚠️ 教师关联 #{} 缺少学科信息，已忽略", link.id);
                continue;
            };
            if let Some(term) = discipline.term.clone() {
                builder.add_term(term);
            }
            builder.add_discipline(Discipline {
                id: discipline.id,
                term_id: discipline.resolved_term_id(),
                name: discipline.name,
            });
            builder.add_link(discipline.id, link);
        }

        builder.finish(categories)
    }

    // ========== 查询 ==========

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// 全部教师-学科关联，保持快照中的顺序
    pub fn links(&self) -> &[TeacherDiscipline] {
        &self.links
    }

    pub fn discipline(&self, id: DisciplineId) -> Option<&Discipline> {
        self.discipline_index.get(&id).map(|&i| &self.disciplines[i])
    }

    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teacher_index.get(&id).map(|&i| &self.teachers[i])
    }

    /// 某学期下的学科，保持原始顺序
    pub fn disciplines_of_term(&self, term_id: TermId) -> Vec<&Discipline> {
        self.disciplines_by_term
            .get(&term_id)
            .map(|indices| indices.iter().map(|&i| &self.disciplines[i]).collect())
            .unwrap_or_default()
    }

    /// 某学科下的教师关联，保持原始顺序（第一条有特殊含义，见搜索索引）
    pub fn links_of_discipline(&self, discipline_id: DisciplineId) -> Vec<&TeacherDiscipline> {
        self.links_by_discipline
            .get(&discipline_id)
            .map(|indices| indices.iter().map(|&i| &self.links[i]).collect())
            .unwrap_or_default()
    }

    /// 类别名称
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.category_names.get(&id).map(String::as_str)
    }

    /// 搜索标签用的类别名，名称未知时回退为 `#id`
    pub fn category_label(&self, id: CategoryId) -> Cow<'_, str> {
        match self.category_name(id) {
            Some(name) => Cow::Borrowed(name),
            None => {
                debug!("类别 #{} 没有名称，标签使用 id", id);
                Cow::Owned(format!("#{}", id))
            }
        }
    }

    /// 关联中教师的姓名
    pub fn teacher_name(&self, link: &TeacherDiscipline) -> &str {
        self.teacher(link.teacher_id)
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }

    /// 关联中学科的名称
    pub fn discipline_name(&self, link: &TeacherDiscipline) -> &str {
        self.discipline(link.discipline_id)
            .map(|d| d.name.as_str())
            .unwrap_or_default()
    }

    pub fn test_count(&self) -> usize {
        self.links.iter().map(|link| link.tests.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.terms.is_empty()
    }
}

/// 构建过程中的去重与索引
#[derive(Default)]
struct GraphBuilder {
    graph: EntityGraph,
    link_ids: HashSet<i64>,
    embedded_category_names: HashMap<CategoryId, String>,
}

impl GraphBuilder {
    fn add_term(&mut self, term: Term) {
        if self.graph.terms.iter().all(|t| t.id != term.id) {
            self.graph.terms.push(term);
        }
    }

    fn add_discipline(&mut self, discipline: Discipline) {
        if self.graph.discipline_index.contains_key(&discipline.id) {
            return;
        }
        let index = self.graph.disciplines.len();
        self.graph.discipline_index.insert(discipline.id, index);
        if let Some(term_id) = discipline.term_id {
            self.graph
                .disciplines_by_term
                .entry(term_id)
                .or_default()
                .push(index);
        }
        self.graph.disciplines.push(discipline);
    }

    fn add_teacher(&mut self, teacher: Teacher) {
        if !self.graph.teacher_index.contains_key(&teacher.id) {
            self.graph
                .teacher_index
                .insert(teacher.id, self.graph.teachers.len());
            self.graph.teachers.push(teacher);
        }
    }

    fn add_link(&mut self, discipline_id: DisciplineId, raw: RawTeacherDiscipline) {
        if !self.link_ids.insert(raw.id) {
            warn!("⚠️ 重复的教师关联 #{}，保留第一次出现的记录", raw.id);
            return;
        }

        let teacher_id = raw.teacher.id;
        self.add_teacher(raw.teacher);

        let tests = raw
            .tests
            .into_iter()
            .filter_map(|test| self.normalize_test(test))
            .collect();

        let index = self.graph.links.len();
        self.graph
            .links_by_discipline
            .entry(discipline_id)
            .or_default()
            .push(index);
        self.graph.links.push(TeacherDiscipline {
            id: raw.id,
            discipline_id,
            teacher_id,
            tests,
        });
    }

    fn normalize_test(&mut self, raw: RawTest) -> Option<Test> {
        let Some(category_id) = raw.resolved_category_id() else {
            warn!("⚠️ 试卷 #{} ({}) 没有类别，已忽略", raw.id, raw.name);
            return None;
        };
        if let Some(category) = raw.category {
            self.embedded_category_names
                .entry(category.id)
                .or_insert(category.name);
        }
        Some(Test {
            id: raw.id,
            name: raw.name,
            pdf_url: raw.pdf_url,
            category_id,
        })
    }

    fn finish(self, categories: Vec<Category>) -> EntityGraph {
        let mut graph = self.graph;

        graph.category_names = self.embedded_category_names;
        for category in &categories {
            graph
                .category_names
                .insert(category.id, category.name.clone());
        }
        graph.categories = categories;

        debug!(
            "实体图构建完成: 学期 {} / 学科 {} / 教师 {} / 关联 {} / 试卷 {}",
            graph.terms.len(),
            graph.disciplines.len(),
            graph.teachers.len(),
            graph.links.len(),
            graph.test_count()
        );

        graph
    }
}
