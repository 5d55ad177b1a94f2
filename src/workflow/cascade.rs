//! 新增试卷表单的级联选择
//!
//! 类别来自预加载的静态列表；选择学科会触发一次依赖请求，
//! 返回后替换教师选项。每次依赖请求都带一个递增的票据，
//! 只有最新票据对应的响应才会被采用。

use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;
use crate::models::{
    Category, CategoryId, DisciplineId, DisciplineListItem, NewTest, TeacherDisciplineId,
    TeacherLink,
};

/// 选项的取值，区分来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionValue {
    Category(CategoryId),
    Discipline(DisciplineId),
    TeacherDiscipline(TeacherDisciplineId),
}

/// 下拉选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
}

/// 依赖请求的票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    discipline_id: DisciplineId,
}

impl FetchTicket {
    pub fn discipline_id(&self) -> DisciplineId {
        self.discipline_id
    }
}

/// 级联选择状态机
#[derive(Debug, Clone, Default)]
pub struct CascadeSelector {
    form: NewTest,
    category_options: Vec<SelectOption>,
    discipline_options: Vec<SelectOption>,
    teacher_options: Vec<SelectOption>,
    selected_discipline: Option<DisciplineId>,
    latest_seq: u64,
}

impl CascadeSelector {
    pub fn new(categories: &[Category], disciplines: &[DisciplineListItem]) -> Self {
        Self {
            category_options: categories
                .iter()
                .map(|c| SelectOption {
                    label: c.name.clone(),
                    value: OptionValue::Category(c.id),
                })
                .collect(),
            discipline_options: disciplines
                .iter()
                .map(|d| SelectOption {
                    label: d.name.clone(),
                    value: OptionValue::Discipline(d.id),
                })
                .collect(),
            ..Self::default()
        }
    }

    // ========== 状态读取 ==========

    pub fn form(&self) -> &NewTest {
        &self.form
    }

    pub fn category_options(&self) -> &[SelectOption] {
        &self.category_options
    }

    pub fn discipline_options(&self) -> &[SelectOption] {
        &self.discipline_options
    }

    pub fn teacher_options(&self) -> &[SelectOption] {
        &self.teacher_options
    }

    pub fn selected_discipline(&self) -> Option<DisciplineId> {
        self.selected_discipline
    }

    /// 票据是否仍是最新的一次请求
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest_seq && self.selected_discipline == Some(ticket.discipline_id)
    }

    // ========== 状态转换 ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_pdf_url(&mut self, pdf_url: impl Into<String>) {
        self.form.pdf_url = pdf_url.into();
    }

    /// 选择类别，不触发任何请求
    pub fn select_category(&mut self, category_id: CategoryId) -> Result<(), ValidationError> {
        ensure_option(
            &self.category_options,
            OptionValue::Category(category_id),
            "categoryId",
            category_id,
        )?;
        self.form.category_id = category_id;
        Ok(())
    }

    /// 选择学科，返回本次依赖请求的票据
    ///
    /// 已选的教师属于旧学科，立即清空；教师选项等新响应到达后再填充。
    pub fn select_discipline(
        &mut self,
        discipline_id: DisciplineId,
    ) -> Result<FetchTicket, ValidationError> {
        ensure_option(
            &self.discipline_options,
            OptionValue::Discipline(discipline_id),
            "disciplineId",
            discipline_id,
        )?;

        self.latest_seq += 1;
        self.selected_discipline = Some(discipline_id);
        self.form.teacher_discipline_id = 0;
        self.teacher_options.clear();

        debug!("学科 #{} 已选择，依赖请求票据 #{}", discipline_id, self.latest_seq);

        Ok(FetchTicket {
            seq: self.latest_seq,
            discipline_id,
        })
    }

    /// 依赖请求返回后调用；过期票据的响应被丢弃，返回是否采用
    pub fn apply_teacher_links(&mut self, ticket: FetchTicket, links: &[TeacherLink]) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                "丢弃过期的教师列表: 学科 #{} 票据 #{} (最新 #{})",
                ticket.discipline_id, ticket.seq, self.latest_seq
            );
            return false;
        }

        self.teacher_options = links
            .iter()
            .map(|link| SelectOption {
                label: link.teacher.name.clone(),
                value: OptionValue::TeacherDiscipline(link.id),
            })
            .collect();
        self.form.teacher_discipline_id = 0;
        true
    }

    /// 从当前（按学科筛选后的）教师选项中选择
    pub fn select_teacher(
        &mut self,
        teacher_discipline_id: TeacherDisciplineId,
    ) -> Result<(), ValidationError> {
        ensure_option(
            &self.teacher_options,
            OptionValue::TeacherDiscipline(teacher_discipline_id),
            "teacherDisciplineId",
            teacher_discipline_id,
        )?;
        self.form.teacher_discipline_id = teacher_discipline_id;
        Ok(())
    }

    /// 提交前校验，四个字段都必须非空/非零
    pub fn validate(&self) -> Result<NewTest, ValidationError> {
        let mut missing = Vec::new();
        if self.form.name.trim().is_empty() {
            missing.push("name");
        }
        if self.form.pdf_url.trim().is_empty() {
            missing.push("pdfUrl");
        }
        if self.form.category_id == 0 {
            missing.push("categoryId");
        }
        if self.form.teacher_discipline_id == 0 {
            missing.push("teacherDisciplineId");
        }

        if missing.is_empty() {
            Ok(NewTest {
                name: self.form.name.trim().to_string(),
                pdf_url: self.form.pdf_url.trim().to_string(),
                ..self.form.clone()
            })
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

fn ensure_option(
    options: &[SelectOption],
    value: OptionValue,
    field: &'static str,
    id: i64,
) -> Result<(), ValidationError> {
    if options.iter().any(|option| option.value == value) {
        Ok(())
    } else {
        Err(ValidationError::UnknownOption { field, id })
    }
}
