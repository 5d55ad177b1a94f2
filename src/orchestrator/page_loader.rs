//! 页面加载
//!
//! 每个页面并发发起两个互不依赖的请求（试卷快照 + 类别），
//! 任一失败都降级为空列表加一条提示，图和索引照常构建。

use tracing::info;

use crate::clients::ExamApi;
use crate::error::AppResult;
use crate::graph::EntityGraph;
use crate::models::Session;
use crate::search::{SearchEntry, SearchIndex};
use crate::views::{DisciplineView, TeacherView, ViewBuilder, ViewKind};
use crate::workflow::Notice;

/// 一次页面加载的结果：只读的实体图和对应视图的搜索索引
#[derive(Debug)]
pub struct LoadedPage {
    pub kind: ViewKind,
    pub graph: EntityGraph,
    pub index: SearchIndex,
    pub notices: Vec<Notice>,
}

impl LoadedPage {
    /// 用已有的图构建页面（索引在这里生成一次）
    pub fn from_graph(kind: ViewKind, graph: EntityGraph) -> Self {
        let index = match kind {
            ViewKind::ByDiscipline => DisciplineView::new(&graph).build_index(),
            ViewKind::ByTeacher => TeacherView::new(&graph).build_index(),
        };
        Self {
            kind,
            graph,
            index,
            notices: Vec::new(),
        }
    }

    pub fn discipline_view(&self) -> DisciplineView<'_> {
        DisciplineView::new(&self.graph)
    }

    pub fn teacher_view(&self) -> TeacherView<'_> {
        TeacherView::new(&self.graph)
    }

    /// 顶层分组数量（学期或教师）
    pub fn top_level_count(&self) -> usize {
        match self.kind {
            ViewKind::ByDiscipline => self.graph.terms().len(),
            ViewKind::ByTeacher => self.teacher_view().teachers().len(),
        }
    }

    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        self.index.search(query)
    }
}

/// 加载一个页面
pub async fn load_page<A: ExamApi + ?Sized>(
    api: &A,
    session: &Session,
    kind: ViewKind,
) -> LoadedPage {
    let mut notices = Vec::new();

    let graph = match kind {
        ViewKind::ByDiscipline => {
            let (tests, categories) = futures::join!(
                api.get_tests_by_discipline(session),
                api.get_categories(session)
            );
            EntityGraph::from_terms(
                settle(tests, &mut notices),
                settle(categories, &mut notices),
            )
        }
        ViewKind::ByTeacher => {
            let (tests, categories) = futures::join!(
                api.get_tests_by_teacher(session),
                api.get_categories(session)
            );
            EntityGraph::from_teacher_links(
                settle(tests, &mut notices),
                settle(categories, &mut notices),
            )
        }
    };

    let mut page = LoadedPage::from_graph(kind, graph);
    page.notices = notices;

    info!(
        "{}页面: 试卷 {} 份, 索引 {} 条, 提示 {} 条",
        kind,
        page.graph.test_count(),
        page.index.len(),
        page.notices.len()
    );

    page
}

/// 失败的请求降级为空列表
fn settle<T: Default>(result: AppResult<T>, notices: &mut Vec<Notice>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            notices.push(Notice::from_error(&e));
            T::default()
        }
    }
}
