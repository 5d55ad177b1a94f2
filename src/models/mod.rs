pub mod entity;
pub mod session;
pub mod wire;

pub use entity::{
    Category, CategoryId, Discipline, DisciplineId, Teacher, TeacherDiscipline,
    TeacherDisciplineId, TeacherId, Term, TermId, Test, TestId,
};
pub use session::Session;
pub use wire::{
    DisciplineListItem, NewTest, RawDiscipline, RawDisciplineRef, RawTeacherDiscipline, RawTest,
    TeacherLink, TermTests, UserData,
};
