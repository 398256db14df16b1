//! Integration tests for the service layer against LocalRepository.

use mentorhub_rust::api::{
    AccountType, NewProgramType, NewUser, ProgramDetails, ProgramTypeChanges, ProgramTypeId,
    UserId,
};
use mentorhub_rust::db::repositories::LocalRepository;
use mentorhub_rust::db::services;

fn new_program(name: &str) -> NewProgramType {
    NewProgramType {
        type_name: name.to_string(),
        description: None,
        duration: Some(60),
    }
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
}

#[tokio::test]
async fn test_create_then_list() {
    let repo = LocalRepository::new();

    services::create_program_type(&repo, &new_program("Office Hours"))
        .await
        .unwrap();
    services::create_program_type(&repo, &new_program("Tutoring"))
        .await
        .unwrap();

    let all = services::list_program_types(&repo).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_create_duplicate_is_conflict() {
    let repo = LocalRepository::new();
    services::create_program_type(&repo, &new_program("Office Hours"))
        .await
        .unwrap();

    let err = services::create_program_type(&repo, &new_program("Office Hours"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_update_and_fetch() {
    let repo = LocalRepository::new();
    let created = services::create_program_type(&repo, &new_program("Advising"))
        .await
        .unwrap();

    let changes = ProgramTypeChanges {
        description: Some("Academic advising".to_string()),
        ..Default::default()
    };
    services::update_program_type(&repo, created.id, &changes)
        .await
        .unwrap();

    let fetched = services::get_program_type(&repo, created.id).await.unwrap();
    assert_eq!(fetched.description.as_deref(), Some("Academic advising"));
    assert_eq!(fetched.duration, Some(60));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let repo = LocalRepository::new();
    let created = services::create_program_type(&repo, &new_program("Advising"))
        .await
        .unwrap();

    services::delete_program_type(&repo, created.id).await.unwrap();

    let err = services::get_program_type(&repo, created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_set_details_roundtrip() {
    let repo = LocalRepository::new();
    let created = services::create_program_type(&repo, &new_program("Advising"))
        .await
        .unwrap();

    let details = ProgramDetails {
        course_id: Some(3),
        type_name: Some("Advising".to_string()),
        duration: Some(25),
        virtual_link: Some("https://meet.example.com/advising".to_string()),
        max_daily_meetings: Some(6),
        ..Default::default()
    };
    let updated = services::set_program_details(&repo, created.id, &details)
        .await
        .unwrap();

    assert_eq!(updated.course_id, Some(3));
    assert_eq!(updated.duration, Some(25));
    assert_eq!(
        updated.virtual_link.as_deref(),
        Some("https://meet.example.com/advising")
    );
    assert_eq!(updated.max_daily_meetings, Some(6));
    // Fields absent from the detail set are cleared
    assert!(updated.description.is_none());
}

#[tokio::test]
async fn test_set_details_unknown_id() {
    let repo = LocalRepository::new();
    let err = services::set_program_details(
        &repo,
        ProgramTypeId::new(42),
        &ProgramDetails::default(),
    )
    .await
    .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_is_admin() {
    let repo = LocalRepository::new();

    let admin = services::create_user(
        &repo,
        &NewUser {
            username: "admin".to_string(),
            account_type: AccountType::Admin,
        },
    )
    .await
    .unwrap();

    let student = services::create_user(
        &repo,
        &NewUser {
            username: "student".to_string(),
            account_type: AccountType::Student,
        },
    )
    .await
    .unwrap();

    assert!(services::is_admin(&repo, admin.id).await.unwrap());
    assert!(!services::is_admin(&repo, student.id).await.unwrap());

    let fetched = services::get_user(&repo, admin.id).await.unwrap();
    assert_eq!(fetched.username, "admin");
    assert_eq!(fetched.account_type, AccountType::Admin);
}

#[tokio::test]
async fn test_is_admin_unknown_user_is_false() {
    let repo = LocalRepository::new();
    assert!(!services::is_admin(&repo, UserId::new(404)).await.unwrap());
}
