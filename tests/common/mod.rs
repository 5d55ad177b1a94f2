//! 内存中的 `ExamApi` 实现，供集成测试使用

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use exam_vault::clients::ExamApi;
use exam_vault::error::{AppError, AppResult};
use exam_vault::models::{
    Category, DisciplineId, DisciplineListItem, NewTest, RawTeacherDiscipline, RawTest, Session,
    TeacherLink, TermTests, TestId, UserData,
};

pub const CALCULUS: DisciplineId = 7;
pub const PHYSICS: DisciplineId = 8;

/// 可配置的内存接口
#[derive(Default)]
pub struct MockApi {
    pub terms: Vec<TermTests>,
    pub teacher_links: Vec<RawTeacherDiscipline>,
    pub categories: Vec<Category>,
    pub disciplines: Vec<DisciplineListItem>,
    pub teachers: HashMap<DisciplineId, Vec<TeacherLink>>,

    /// `/categories` 返回 500
    pub fail_categories: bool,
    /// 指定学科的教师请求返回 500
    pub failing_teachers: HashSet<DisciplineId>,
    /// `POST /tests` 返回的错误消息
    pub add_error: Option<String>,

    /// 指定学科的教师请求会等到对应的 Notify 被触发才返回
    pub gates: HashMap<DisciplineId, Arc<Notify>>,
    /// 每次教师请求开始时触发
    pub started: Arc<Notify>,

    pub add_calls: AtomicUsize,
    pub created: Mutex<Vec<RawTest>>,
}

impl MockApi {
    /// 两个学期：第 1 学期有 Calculus（两位教师）和 Physics（无关联），第 2 学期为空
    pub fn with_fixtures() -> Self {
        let terms: Vec<TermTests> = serde_json::from_value(json!([
            {
                "id": 1,
                "number": 1,
                "disciplines": [
                    {
                        "id": CALCULUS,
                        "name": "Calculus",
                        "teacherDisciplines": [
                            {
                                "id": 100,
                                "teacher": { "id": 1, "name": "Dr. Smith" },
                                "tests": [
                                    { "id": 10, "name": "Midterm", "pdfUrl": "https://files.test/midterm.pdf", "categoryId": 1 }
                                ]
                            },
                            {
                                "id": 101,
                                "teacher": { "id": 2, "name": "Dr. Jones" },
                                "tests": [
                                    { "id": 11, "name": "Final", "pdfUrl": "https://files.test/final.pdf", "categoryId": 2 }
                                ]
                            }
                        ]
                    },
                    { "id": PHYSICS, "name": "Physics", "teacherDisciplines": [] }
                ]
            },
            { "id": 2, "number": 2, "disciplines": [] }
        ]))
        .unwrap();

        let teacher_links: Vec<RawTeacherDiscipline> = serde_json::from_value(json!([
            {
                "id": 100,
                "teacher": { "id": 1, "name": "Dr. Smith" },
                "discipline": { "id": CALCULUS, "name": "Calculus", "term": { "id": 1, "number": 1 } },
                "tests": [
                    { "id": 10, "name": "Midterm", "pdfUrl": "https://files.test/midterm.pdf", "category": { "id": 1, "name": "P1" } }
                ]
            },
            {
                "id": 101,
                "teacher": { "id": 2, "name": "Dr. Jones" },
                "discipline": { "id": CALCULUS, "name": "Calculus", "term": { "id": 1, "number": 1 } },
                "tests": [
                    { "id": 11, "name": "Final", "pdfUrl": "https://files.test/final.pdf", "category": { "id": 2, "name": "P2" } }
                ]
            }
        ]))
        .unwrap();

        let mut teachers = HashMap::new();
        teachers.insert(
            CALCULUS,
            vec![
                teacher_link(100, 1, CALCULUS, "Dr. Smith"),
                teacher_link(101, 2, CALCULUS, "Dr. Jones"),
            ],
        );
        teachers.insert(PHYSICS, vec![teacher_link(200, 3, PHYSICS, "Dr. Curie")]);

        Self {
            terms,
            teacher_links,
            categories: vec![category(1, "P1"), category(2, "P2"), category(3, "Recuperação")],
            disciplines: vec![
                DisciplineListItem { id: CALCULUS, name: "Calculus".into(), term_id: 1 },
                DisciplineListItem { id: PHYSICS, name: "Physics".into(), term_id: 1 },
            ],
            teachers,
            ..Self::default()
        }
    }

    /// 让指定学科的教师请求挂起，返回放行用的 Notify
    pub fn gate(&mut self, discipline_id: DisciplineId) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.insert(discipline_id, gate.clone());
        gate
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    fn snapshot_tests(&self) -> impl Iterator<Item = &RawTest> {
        self.teacher_links.iter().flat_map(|link| link.tests.iter())
    }
}

pub fn session() -> Session {
    Session::new("test-token")
}

pub fn category(id: i64, name: &str) -> Category {
    Category { id, name: name.into() }
}

fn teacher_link(id: i64, teacher_id: i64, discipline_id: DisciplineId, name: &str) -> TeacherLink {
    serde_json::from_value(json!({
        "id": id,
        "teacherId": teacher_id,
        "disciplineId": discipline_id,
        "teacher": { "id": teacher_id, "name": name }
    }))
    .unwrap()
}

#[async_trait]
impl ExamApi for MockApi {
    async fn sign_up(&self, _user: &UserData) -> AppResult<()> {
        Ok(())
    }

    async fn sign_in(&self, _user: &UserData) -> AppResult<Session> {
        Ok(session())
    }

    async fn get_tests_by_discipline(&self, _session: &Session) -> AppResult<Vec<TermTests>> {
        Ok(self.terms.clone())
    }

    async fn get_tests_by_teacher(&self, _session: &Session) -> AppResult<Vec<RawTeacherDiscipline>> {
        Ok(self.teacher_links.clone())
    }

    async fn get_categories(&self, _session: &Session) -> AppResult<Vec<Category>> {
        if self.fail_categories {
            return Err(AppError::api("/categories", 500, None));
        }
        Ok(self.categories.clone())
    }

    async fn get_disciplines(&self, _session: &Session) -> AppResult<Vec<DisciplineListItem>> {
        Ok(self.disciplines.clone())
    }

    async fn get_teachers_by_discipline(
        &self,
        _session: &Session,
        discipline_id: DisciplineId,
    ) -> AppResult<Vec<TeacherLink>> {
        self.started.notify_one();
        if let Some(gate) = self.gates.get(&discipline_id) {
            gate.notified().await;
        }
        if self.failing_teachers.contains(&discipline_id) {
            return Err(AppError::api(format!("/teachers/{}", discipline_id), 500, None));
        }
        Ok(self.teachers.get(&discipline_id).cloned().unwrap_or_default())
    }

    async fn add_test(&self, _session: &Session, test: &NewTest) -> AppResult<RawTest> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.add_error {
            return Err(AppError::api("/tests", 409, Some(message.clone())));
        }

        let mut created = self.created.lock().unwrap();
        let record = RawTest {
            id: 500 + created.len() as TestId,
            name: test.name.clone(),
            pdf_url: test.pdf_url.clone(),
            category_id: Some(test.category_id),
            category: None,
        };
        created.push(record.clone());
        Ok(record)
    }

    async fn get_test(&self, _session: &Session, test_id: TestId) -> AppResult<RawTest> {
        let created = self.created.lock().unwrap();
        let found = created
            .iter()
            .chain(self.snapshot_tests())
            .find(|test| test.id == test_id)
            .cloned();
        found.ok_or_else(|| AppError::api(format!("/tests/{}", test_id), 404, None))
    }
}
