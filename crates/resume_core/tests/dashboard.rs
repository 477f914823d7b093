use resume_core::service::dashboard::{
    CREATED_TITLE, CREATE_FAILED_TITLE, DELETED_TITLE, DELETE_FAILED_TITLE, DELETE_PROMPT,
    DUPLICATED_TITLE, DUPLICATE_FAILED_TITLE, LIST_FAILED_TITLE, RENAME_FAILED_TITLE,
};
use resume_core::{
    open_db_in_memory, sample_document, Dashboard, NoticeLevel, ResumeService,
    SqliteResumeRepository,
};
use uuid::Uuid;

fn titles(dashboard: &Dashboard) -> Vec<&str> {
    dashboard
        .resumes()
        .iter()
        .map(|resume| resume.title.as_str())
        .collect()
}

#[test]
fn create_duplicate_rename_delete_keep_list_current() {
    let conn = open_db_in_memory().unwrap();
    let service = ResumeService::new(SqliteResumeRepository::try_new(&conn).unwrap());
    let owner = Uuid::new_v4();
    let mut dashboard = Dashboard::load(&service, owner);
    assert!(dashboard.resumes().is_empty());
    assert!(dashboard.notices().is_empty());

    let created = dashboard.create(&service, "").unwrap();
    service
        .save_document(owner, created.id, &sample_document())
        .unwrap();
    let copy = dashboard.duplicate(&service, created.id).unwrap();
    assert_eq!(titles(&dashboard), vec!["New Resume (Copy)", "New Resume"]);

    assert!(dashboard.rename(&service, created.id, "Backend"));
    assert_eq!(titles(&dashboard), vec!["Backend", "New Resume (Copy)"]);

    let mut prompts = Vec::new();
    let mut accept = |message: &str| {
        prompts.push(message.to_string());
        true
    };
    assert!(dashboard.delete(&service, copy.id, &mut accept));
    assert_eq!(prompts, vec![DELETE_PROMPT]);
    assert_eq!(titles(&dashboard), vec!["Backend"]);

    let notices: Vec<(NoticeLevel, String)> = dashboard
        .take_notices()
        .into_iter()
        .map(|notice| (notice.level, notice.title))
        .collect();
    assert_eq!(
        notices,
        vec![
            (NoticeLevel::Success, CREATED_TITLE.to_string()),
            (NoticeLevel::Success, DUPLICATED_TITLE.to_string()),
            (NoticeLevel::Success, DELETED_TITLE.to_string()),
        ]
    );
}

#[test]
fn declined_delete_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = ResumeService::new(SqliteResumeRepository::try_new(&conn).unwrap());
    let owner = Uuid::new_v4();
    let mut dashboard = Dashboard::load(&service, owner);
    let created = dashboard.create(&service, "CV").unwrap();
    dashboard.take_notices();

    let mut decline = |_: &str| false;
    assert!(!dashboard.delete(&service, created.id, &mut decline));
    assert_eq!(titles(&dashboard), vec!["CV"]);
    assert!(dashboard.notices().is_empty());
    assert!(service.get_resume(owner, created.id).is_ok());
}

#[test]
fn missing_resumes_report_errors_and_keep_list() {
    let conn = open_db_in_memory().unwrap();
    let service = ResumeService::new(SqliteResumeRepository::try_new(&conn).unwrap());
    let owner = Uuid::new_v4();
    let mut dashboard = Dashboard::load(&service, owner);
    dashboard.create(&service, "CV").unwrap();
    dashboard.take_notices();

    let missing = Uuid::new_v4();
    let mut accept = |_: &str| true;
    assert_eq!(dashboard.duplicate(&service, missing), None);
    assert!(!dashboard.rename(&service, missing, "x"));
    assert!(!dashboard.delete(&service, missing, &mut accept));
    assert_eq!(titles(&dashboard), vec!["CV"]);

    let notices = dashboard.take_notices();
    assert!(notices.iter().all(|notice| notice.is_error()));
    let notice_titles: Vec<&str> = notices.iter().map(|notice| notice.title.as_str()).collect();
    assert_eq!(
        notice_titles,
        vec![DUPLICATE_FAILED_TITLE, RENAME_FAILED_TITLE, DELETE_FAILED_TITLE]
    );
}

#[test]
fn storage_failure_reports_load_and_create_errors() {
    let conn = open_db_in_memory().unwrap();
    let service = ResumeService::new(SqliteResumeRepository::try_new(&conn).unwrap());
    conn.execute_batch("DROP TABLE resume_sections; DROP TABLE resumes;")
        .unwrap();
    let owner = Uuid::new_v4();

    let mut dashboard = Dashboard::load(&service, owner);
    assert!(dashboard.resumes().is_empty());
    assert_eq!(dashboard.notices()[0].title, LIST_FAILED_TITLE);
    assert!(dashboard.notices()[0].is_error());

    assert_eq!(dashboard.create(&service, "CV"), None);
    let last = dashboard.notices().last().unwrap();
    assert!(last.is_error());
    assert_eq!(last.title, CREATE_FAILED_TITLE);
}
