use resume_core::model::content::ExperienceItem;
use resume_core::{
    open_db_in_memory, sample_document, RepoError, ResumeRepository, Section, SectionContent,
    SectionKind, SectionOrder, SectionRecord, SqliteResumeRepository,
};
use uuid::Uuid;

fn records(resume_id: Uuid) -> Vec<SectionRecord> {
    sample_document()
        .iter()
        .enumerate()
        .map(|(index, section)| SectionRecord::from_section(resume_id, section, index as i64))
        .collect()
}

#[test]
fn blank_title_gets_default() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let created = repo.create_resume(owner, "   ").unwrap();
    assert_eq!(created.title, "New Resume");
    assert_eq!(created.owner_id, owner);
    assert_eq!(created.created_at, created.updated_at);

    let named = repo.create_resume(owner, " Backend CV ").unwrap();
    assert_eq!(named.title, "Backend CV");
}

#[test]
fn resumes_are_scoped_to_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let resume = repo.create_resume(alice, "Alice").unwrap();
    repo.sync_sections(alice, resume.id, &records(resume.id))
        .unwrap();

    assert!(repo.list_resumes(bob).unwrap().is_empty());
    assert_eq!(repo.get_resume(bob, resume.id).unwrap(), None);
    assert!(matches!(
        repo.list_sections(bob, resume.id),
        Err(RepoError::ResumeNotFound(id)) if id == resume.id
    ));
    assert!(matches!(
        repo.delete_resume(bob, resume.id),
        Err(RepoError::ResumeNotFound(_))
    ));
    assert_eq!(repo.list_sections(alice, resume.id).unwrap().len(), 6);
}

#[test]
fn section_writes_bump_list_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let first = repo.create_resume(owner, "First").unwrap();
    let second = repo.create_resume(owner, "Second").unwrap();
    let titles = |repo: &SqliteResumeRepository<'_>| -> Vec<String> {
        repo.list_resumes(owner)
            .unwrap()
            .into_iter()
            .map(|resume| resume.title)
            .collect()
    };
    assert_eq!(titles(&repo), vec!["Second", "First"]);

    let header = Section::new(SectionKind::Header);
    repo.upsert_section(owner, &SectionRecord::from_section(first.id, &header, 0))
        .unwrap();
    assert_eq!(titles(&repo), vec!["First", "Second"]);

    let touched = repo.get_resume(owner, first.id).unwrap().unwrap();
    assert!(touched.updated_at > second.updated_at);
}

#[test]
fn sections_round_trip_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();
    let resume = repo.create_resume(owner, "CV").unwrap();

    let written = records(resume.id);
    repo.sync_sections(owner, resume.id, &written).unwrap();
    assert_eq!(repo.list_sections(owner, resume.id).unwrap(), written);

    let reversed: Vec<SectionOrder> = written
        .iter()
        .rev()
        .enumerate()
        .map(|(index, record)| SectionOrder {
            id: record.id.clone(),
            order: index as i64,
        })
        .collect();
    repo.reorder_sections(owner, resume.id, &reversed).unwrap();

    let ids: Vec<String> = repo
        .list_sections(owner, resume.id)
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect();
    let expected: Vec<String> = written.iter().rev().map(|record| record.id.clone()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn reorder_with_unknown_id_rolls_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();
    let resume = repo.create_resume(owner, "CV").unwrap();
    let written = records(resume.id);
    repo.sync_sections(owner, resume.id, &written).unwrap();

    let orders = vec![
        SectionOrder {
            id: written[0].id.clone(),
            order: 99,
        },
        SectionOrder {
            id: "missing".to_string(),
            order: 0,
        },
    ];
    let err = repo.reorder_sections(owner, resume.id, &orders).unwrap_err();
    assert!(matches!(err, RepoError::SectionNotFound(id) if id == "missing"));
    assert_eq!(repo.list_sections(owner, resume.id).unwrap(), written);
}

#[test]
fn sync_removes_unlisted_sections() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();
    let resume = repo.create_resume(owner, "CV").unwrap();
    let written = records(resume.id);
    repo.sync_sections(owner, resume.id, &written).unwrap();

    let kept = &written[..2];
    repo.sync_sections(owner, resume.id, kept).unwrap();
    assert_eq!(repo.list_sections(owner, resume.id).unwrap(), kept);

    repo.delete_section(owner, resume.id, &kept[1].id).unwrap();
    assert!(matches!(
        repo.delete_section(owner, resume.id, &kept[1].id),
        Err(RepoError::SectionNotFound(_))
    ));
}

#[test]
fn section_id_cannot_move_between_resumes_or_kinds() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();
    let first = repo.create_resume(owner, "First").unwrap();
    let second = repo.create_resume(owner, "Second").unwrap();

    let section = Section::with_id(
        "shared-1",
        "Work Experience",
        SectionContent::Experience(vec![ExperienceItem::default()]),
    );
    repo.upsert_section(owner, &SectionRecord::from_section(first.id, &section, 0))
        .unwrap();

    let stolen = SectionRecord::from_section(second.id, &section, 0);
    assert!(matches!(
        repo.upsert_section(owner, &stolen),
        Err(RepoError::SectionConflict(id)) if id == "shared-1"
    ));

    let retyped = Section::with_id(
        "shared-1",
        "Skills",
        SectionContent::empty(SectionKind::Skills),
    );
    assert!(matches!(
        repo.upsert_section(owner, &SectionRecord::from_section(first.id, &retyped, 0)),
        Err(RepoError::SectionConflict(_))
    ));
}

#[test]
fn duplicate_copies_sections_under_fresh_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();
    let resume = repo.create_resume(owner, "CV").unwrap();
    let written = records(resume.id);
    repo.sync_sections(owner, resume.id, &written).unwrap();

    let copy = repo.duplicate_resume(owner, resume.id).unwrap();
    assert_eq!(copy.title, "CV (Copy)");
    assert_ne!(copy.id, resume.id);

    let copied = repo.list_sections(owner, copy.id).unwrap();
    assert_eq!(copied.len(), written.len());
    for (original, duplicate) in written.iter().zip(&copied) {
        assert_ne!(original.id, duplicate.id);
        assert_eq!(original.kind, duplicate.kind);
        assert_eq!(original.content, duplicate.content);
        assert_eq!(original.order, duplicate.order);
    }

    repo.delete_resume(owner, resume.id).unwrap();
    assert_eq!(repo.get_resume(owner, resume.id).unwrap(), None);
    assert_eq!(repo.list_sections(owner, copy.id).unwrap(), copied);

    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM resume_sections WHERE resume_uuid = ?1;",
            [resume.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn rename_resolves_blank_titles() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResumeRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();
    let resume = repo.create_resume(owner, "CV").unwrap();

    repo.rename_resume(owner, resume.id, "Platform Engineer").unwrap();
    assert_eq!(
        repo.get_resume(owner, resume.id).unwrap().unwrap().title,
        "Platform Engineer"
    );
    repo.rename_resume(owner, resume.id, "").unwrap();
    assert_eq!(
        repo.get_resume(owner, resume.id).unwrap().unwrap().title,
        "New Resume"
    );
}
