//! Tests for the robot catalogue service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockRobotRepository;
use crate::domain::{ErrorCode, RobotType};

fn make_service(repo: MockRobotRepository) -> RobotCatalogueService<MockRobotRepository> {
    RobotCatalogueService::new(Arc::new(repo))
}

fn marta(id: i64) -> Robot {
    Robot {
        id: RobotId::new(id),
        name: "Marta".to_owned(),
        robot_type: RobotType::Mechanical,
        year: 1981,
    }
}

fn rejection(result: Result<impl std::fmt::Debug, RobotWriteError>) -> ValidationErrors {
    match result {
        Err(RobotWriteError::Rejected(errors)) => errors,
        other => panic!("expected a validation rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn create_inserts_valid_drafts() {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken()
        .withf(|name, exclude| name == "Marta" && exclude.is_none())
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_insert()
        .withf(|fields| fields.robot_type == RobotType::Mechanical && fields.year == 1981)
        .times(1)
        .return_once(|fields| Ok(fields.clone().into_robot(RobotId::new(7))));

    let robot = make_service(repo)
        .create_robot(RobotDraft::new("Marta", "mechanical", 1981))
        .await
        .expect("create succeeds");

    assert_eq!(robot, marta(7));
}

#[tokio::test]
async fn create_collects_every_failure_and_writes_nothing() {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken().return_once(|_, _| Ok(true));
    repo.expect_insert().never();

    let result = make_service(repo)
        .create_robot(RobotDraft::new("Marta", "toaster", -1))
        .await;

    let errors = rejection(result);
    assert_eq!(
        errors.texts(),
        vec![
            "Field type must be a part of list: droid, mechanical, virtual".to_owned(),
            "The robot name must be unique".to_owned(),
            "The year cannot be less than zero".to_owned(),
        ]
    );
}

#[tokio::test]
async fn create_reports_store_level_duplicates_as_uniqueness() {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken().return_once(|_, _| Ok(false));
    repo.expect_insert()
        .return_once(|_| Err(RobotRepositoryError::duplicate_name("Marta")));

    let result = make_service(repo)
        .create_robot(RobotDraft::new("Marta", "droid", 1981))
        .await;

    let errors = rejection(result);
    assert!(errors.contains(ValidationRule::Uniqueness));
    assert_eq!(errors.messages().len(), 1);
}

#[rstest]
#[case(UniquenessScope::OtherRows, Some(RobotId::new(1)))]
#[case(UniquenessScope::AllRows, None)]
#[tokio::test]
async fn update_checks_uniqueness_within_configured_scope(
    #[case] scope: UniquenessScope,
    #[case] expected_exclusion: Option<RobotId>,
) {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken()
        .withf(move |_, exclude| *exclude == expected_exclusion)
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_update()
        .with(eq(RobotId::new(1)), mockall::predicate::always())
        .times(1)
        .return_once(|_, _| Ok(1));

    make_service(repo)
        .with_uniqueness_scope(scope)
        .update_robot(RobotId::new(1), RobotDraft::new("Marta", "virtual", 1981))
        .await
        .expect("update succeeds");
}

#[tokio::test]
async fn update_of_missing_row_is_not_an_error() {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken().return_once(|_, _| Ok(false));
    repo.expect_update().return_once(|_, _| Ok(0));

    let result = make_service(repo)
        .update_robot(RobotId::new(99), RobotDraft::new("Ghost", "virtual", 0))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn update_rejection_leaves_the_row_alone() {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken().return_once(|_, _| Ok(false));
    repo.expect_update().never();

    let result = make_service(repo)
        .update_robot(RobotId::new(1), RobotDraft::new("Marta", "virtual", -5))
        .await;

    let errors = rejection(result);
    assert!(errors.contains(ValidationRule::YearNonNegative));
}

#[rstest]
#[case(0)]
#[case(1)]
#[tokio::test]
async fn delete_succeeds_whether_or_not_a_row_matched(#[case] affected: usize) {
    let mut repo = MockRobotRepository::new();
    repo.expect_delete()
        .with(eq(RobotId::new(6)))
        .times(1)
        .return_once(move |_| Ok(affected));

    let result = make_service(repo).delete_robot(RobotId::new(6)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn connection_failures_surface_as_service_unavailable() {
    let mut repo = MockRobotRepository::new();
    repo.expect_name_taken()
        .return_once(|_, _| Err(RobotRepositoryError::connection("refused")));
    repo.expect_insert().never();

    let result = make_service(repo)
        .create_robot(RobotDraft::new("Marta", "droid", 1))
        .await;

    match result {
        Err(RobotWriteError::Failed(error)) => {
            assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        }
        other => panic!("expected a store failure, got {other:?}"),
    }
}

#[tokio::test]
async fn query_failures_surface_as_internal_errors() {
    let mut repo = MockRobotRepository::new();
    repo.expect_list_all()
        .return_once(|| Err(RobotRepositoryError::query("syntax")));

    let error = make_service(repo)
        .list_robots()
        .await
        .expect_err("list fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn duplicate_name_from_a_read_is_an_internal_error() {
    let mut repo = MockRobotRepository::new();
    repo.expect_search_by_name()
        .return_once(|_| Err(RobotRepositoryError::duplicate_name("Marta")));

    let error = make_service(repo)
        .search_robots("Mar")
        .await
        .expect_err("search fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn find_passes_absence_through() {
    let mut repo = MockRobotRepository::new();
    repo.expect_find_by_id()
        .with(eq(RobotId::new(42)))
        .return_once(|_| Ok(None));

    let found = make_service(repo)
        .find_robot(RobotId::new(42))
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[tokio::test]
async fn search_forwards_the_fragment() {
    let mut repo = MockRobotRepository::new();
    repo.expect_search_by_name()
        .withf(|fragment| fragment == "art")
        .return_once(|_| Ok(vec![marta(1)]));

    let robots = make_service(repo)
        .search_robots("art")
        .await
        .expect("search succeeds");

    assert_eq!(robots, vec![marta(1)]);
}

#[rstest]
fn excludes_self_setting_maps_to_scope() {
    assert_eq!(
        UniquenessScope::from_excludes_self(true),
        UniquenessScope::OtherRows
    );
    assert_eq!(
        UniquenessScope::from_excludes_self(false),
        UniquenessScope::AllRows
    );
}
