mod common;

use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};

use common::{session, MockApi, CALCULUS, PHYSICS};
use exam_vault::error::VALIDATION_FAILURE_TEXT;
use exam_vault::workflow::{
    AddTestFlow, CascadeOutcome, NoticeLevel, OptionValue, ADD_SUCCESS_TEXT,
};

fn teacher_values(flow_options: &[exam_vault::workflow::SelectOption]) -> Vec<OptionValue> {
    flow_options.iter().map(|option| option.value).collect()
}

#[tokio::test]
async fn late_response_for_previous_discipline_is_discarded() {
    let mut api = MockApi::with_fixtures();
    let release_calculus = api.gate(CALCULUS);
    let api = Arc::new(api);
    let flow = Arc::new(assert_ok!(AddTestFlow::load(api.clone(), session()).await));

    let first = tokio::spawn({
        let flow = flow.clone();
        async move { flow.select_discipline(CALCULUS).await }
    });
    api.started.notified().await;

    // B 先返回
    assert_eq!(flow.select_discipline(PHYSICS).await, CascadeOutcome::Applied(1));

    // A 后返回
    release_calculus.notify_one();
    assert_eq!(first.await.unwrap(), CascadeOutcome::Discarded);

    let state = flow.snapshot().await;
    assert_eq!(state.selected_discipline(), Some(PHYSICS));
    assert_eq!(
        teacher_values(state.teacher_options()),
        vec![OptionValue::TeacherDiscipline(200)]
    );
}

#[tokio::test]
async fn early_response_for_previous_discipline_is_discarded() {
    let mut api = MockApi::with_fixtures();
    let release_calculus = api.gate(CALCULUS);
    let release_physics = api.gate(PHYSICS);
    let api = Arc::new(api);
    let flow = Arc::new(assert_ok!(AddTestFlow::load(api.clone(), session()).await));

    let first = tokio::spawn({
        let flow = flow.clone();
        async move { flow.select_discipline(CALCULUS).await }
    });
    api.started.notified().await;

    let second = tokio::spawn({
        let flow = flow.clone();
        async move { flow.select_discipline(PHYSICS).await }
    });
    api.started.notified().await;

    // A 先返回，但 B 已经是最新的选择
    release_calculus.notify_one();
    assert_eq!(first.await.unwrap(), CascadeOutcome::Discarded);
    assert!(flow.snapshot().await.teacher_options().is_empty());

    release_physics.notify_one();
    assert_eq!(second.await.unwrap(), CascadeOutcome::Applied(1));

    let state = flow.snapshot().await;
    assert_eq!(
        teacher_values(state.teacher_options()),
        vec![OptionValue::TeacherDiscipline(200)]
    );
}

#[tokio::test]
async fn stale_failure_is_silent() {
    let mut api = MockApi::with_fixtures();
    let release_calculus = api.gate(CALCULUS);
    api.failing_teachers.insert(CALCULUS);
    let api = Arc::new(api);
    let flow = Arc::new(assert_ok!(AddTestFlow::load(api.clone(), session()).await));

    let first = tokio::spawn({
        let flow = flow.clone();
        async move { flow.select_discipline(CALCULUS).await }
    });
    api.started.notified().await;

    assert_eq!(flow.select_discipline(PHYSICS).await, CascadeOutcome::Applied(1));
    release_calculus.notify_one();
    assert_eq!(first.await.unwrap(), CascadeOutcome::Discarded);
}

#[tokio::test]
async fn current_failure_becomes_notice() {
    let mut api = MockApi::with_fixtures();
    api.failing_teachers.insert(PHYSICS);
    let flow = assert_ok!(AddTestFlow::load(Arc::new(api), session()).await);

    match flow.select_discipline(PHYSICS).await {
        CascadeOutcome::Failed(notice) => assert!(notice.is_error()),
        other => panic!("意外的结果: {:?}", other),
    }
}

#[tokio::test]
async fn teacher_from_other_discipline_is_rejected() {
    let api = Arc::new(MockApi::with_fixtures());
    let flow = assert_ok!(AddTestFlow::load(api, session()).await);

    assert_eq!(flow.select_discipline(PHYSICS).await, CascadeOutcome::Applied(1));
    let notice = assert_err!(flow.select_teacher(100).await);
    assert_eq!(notice.text, VALIDATION_FAILURE_TEXT);
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_api() {
    let api = Arc::new(MockApi::with_fixtures());
    let flow = assert_ok!(AddTestFlow::load(api.clone(), session()).await);

    flow.set_name("Exam 1").await;
    flow.set_pdf_url("https://files.test/exam1.pdf").await;
    flow.select_discipline(CALCULUS).await;
    assert_ok!(flow.select_teacher(100).await);

    // 未选择类别
    let notice = flow.submit().await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, VALIDATION_FAILURE_TEXT);
    assert_eq!(api.add_calls(), 0);
}

#[tokio::test]
async fn complete_form_is_submitted_once() {
    let api = Arc::new(MockApi::with_fixtures());
    let flow = assert_ok!(AddTestFlow::load(api.clone(), session()).await);

    flow.set_name("  Exam 1 ").await;
    flow.set_pdf_url("https://files.test/exam1.pdf").await;
    assert_ok!(flow.select_category(1).await);
    flow.select_discipline(CALCULUS).await;
    assert_ok!(flow.select_teacher(100).await);

    let notice = flow.submit().await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.text, ADD_SUCCESS_TEXT);
    assert_eq!(api.add_calls(), 1);
    assert_eq!(api.created.lock().unwrap()[0].name, "Exam 1");
}

#[tokio::test]
async fn server_message_is_shown_verbatim() {
    let api = Arc::new(MockApi {
        add_error: Some("Test name already exists".into()),
        ..MockApi::with_fixtures()
    });
    let flow = assert_ok!(AddTestFlow::load(api.clone(), session()).await);

    flow.set_name("Midterm").await;
    flow.set_pdf_url("https://files.test/midterm.pdf").await;
    assert_ok!(flow.select_category(1).await);
    flow.select_discipline(CALCULUS).await;
    assert_ok!(flow.select_teacher(100).await);

    let notice = flow.submit().await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Test name already exists");
    assert_eq!(api.add_calls(), 1);
}
