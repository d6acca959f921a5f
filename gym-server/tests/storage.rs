//! On-disk engine and repository behavior below the HTTP layer

use chrono::NaiveDate;
use gym_server::core::Config;
use gym_server::db::DbService;
use gym_server::db::repository::{AttendanceRepository, RepoError, attendance::daily_key};
use shared::models::{Attendance, CheckInMethod};

fn check_in(org: &str, member: &str, date: NaiveDate, at: i64) -> Attendance {
    Attendance {
        id: daily_key(org, member, date),
        organization_id: org.to_string(),
        member_id: member.to_string(),
        member_name: Some("Disk Dan".into()),
        date,
        check_in_time: at,
        check_out_time: None,
        method: CheckInMethod::Manual,
        verification_method: None,
    }
}

#[tokio::test]
async fn test_surrealkv_store_enforces_daily_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::in_memory("storage-test-secret-0123456789abcdef");
    config.db_in_memory = false;
    config.data_dir = dir.path().join("gym.db").to_string_lossy().into_owned();

    let db = DbService::open(&config).await.unwrap();
    let repo = AttendanceRepository::new(db);
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    repo.create(&check_in("org-a", "m1", date, 1_000)).await.unwrap();
    let again = repo.create(&check_in("org-a", "m1", date, 2_000)).await;
    assert!(matches!(again, Err(RepoError::Duplicate(_))));

    // Other day, other tenant: distinct keys
    repo.create(&check_in("org-a", "m1", date.succ_opt().unwrap(), 3_000))
        .await
        .unwrap();
    repo.create(&check_in("org-b", "m1", date, 4_000)).await.unwrap();

    let day = repo.list_by_date("org-a", date, None).await.unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].check_in_time, 1_000);
    assert_eq!(repo.count_by_date("org-b", date).await.unwrap(), 1);

    assert!(std::fs::read_dir(&config.data_dir).unwrap().next().is_some());
}
