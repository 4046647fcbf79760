//! Dashboard statistics and grade summaries

mod support;

use api::models::pengguna::Role;
use api::validation::Page;
use chrono::Utc;
use support::{seed_kelas, seed_murid, seed_pengguna, test_state};

async fn seed_nilai(
    state: &api::state::AppState,
    murid_id: i64,
    mata_pelajaran: &str,
    skor: i64,
    tipe: &str,
    tanggal: &str,
) {
    sqlx::query(
        "INSERT INTO nilai (murid_id, mata_pelajaran, skor, tipe, tanggal, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(murid_id)
    .bind(mata_pelajaran)
    .bind(skor)
    .bind(tipe)
    .bind(tanggal)
    .bind(Utc::now())
    .execute(&state.db_pool)
    .await
    .expect("nilai insert failed");
}

#[tokio::test]
async fn counts_track_the_tables() {
    let state = test_state().await;

    seed_pengguna(&state, "guru_01", "rahasia1", Role::Guru, "Pak Budi").await;
    seed_kelas(&state, "X-A", "2024/2025").await;
    seed_murid(&state, "NISN001", "Jane").await;

    let overview = state
        .stats_repository
        .overview()
        .await
        .expect("stats failed");

    assert_eq!(overview.pengguna_count, 1);
    assert_eq!(overview.guru_count, 1, "provisioned guru row counts");
    assert_eq!(overview.kelas_count, 1);
    assert_eq!(overview.murid_count, 1);
}

#[tokio::test]
async fn recent_activity_merges_and_truncates_newest_first() {
    let state = test_state().await;

    for i in 0..3 {
        seed_kelas(&state, &format!("X-{}", i), "2024/2025").await;
    }
    for i in 0..4 {
        seed_murid(&state, &format!("NISN{:03}", i), &format!("Murid {}", i)).await;
    }

    let overview = state
        .stats_repository
        .overview()
        .await
        .expect("stats failed");

    assert_eq!(overview.recent_activity.len(), 5);

    let tipes: Vec<&str> = overview
        .recent_activity
        .iter()
        .map(|a| a.tipe.as_str())
        .collect();
    assert_eq!(tipes, vec!["murid", "murid", "murid", "murid", "kelas"]);

    assert_eq!(overview.recent_activity[0].nama, "Murid 3");
    assert_eq!(overview.recent_activity[4].nama, "X-2");
}

#[tokio::test]
async fn grades_list_newest_first() {
    let state = test_state().await;

    let murid = seed_murid(&state, "NISN001", "Jane").await;
    seed_nilai(&state, murid.id, "Matematika", 80, "Tugas", "2024-09-01").await;
    seed_nilai(&state, murid.id, "Matematika", 90, "UTS", "2024-10-15").await;

    let rows = state
        .nilai_repository
        .list_by_murid(murid.id, &Page { limit: 10, offset: 0 })
        .await
        .expect("list failed");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].tanggal, "2024-10-15");
    assert_eq!(rows[1].tanggal, "2024-09-01");
}

#[tokio::test]
async fn grade_summary_averages_per_subject() {
    let state = test_state().await;

    let murid = seed_murid(&state, "NISN001", "Jane").await;
    let other = seed_murid(&state, "NISN002", "Tono").await;

    seed_nilai(&state, murid.id, "Matematika", 80, "Tugas", "2024-09-01").await;
    seed_nilai(&state, murid.id, "Matematika", 90, "UTS", "2024-10-15").await;
    seed_nilai(&state, murid.id, "IPA", 70, "Tugas", "2024-09-05").await;
    seed_nilai(&state, other.id, "Matematika", 10, "Tugas", "2024-09-01").await;

    let rekap = state
        .nilai_repository
        .rekap_by_murid(murid.id)
        .await
        .expect("summary failed");

    assert_eq!(rekap.len(), 2);

    assert_eq!(rekap[0].mata_pelajaran, "IPA");
    assert_eq!(rekap[0].jumlah, 1);
    assert!((rekap[0].rata_rata - 70.0).abs() < f64::EPSILON);

    assert_eq!(rekap[1].mata_pelajaran, "Matematika");
    assert_eq!(rekap[1].jumlah, 2);
    assert!((rekap[1].rata_rata - 85.0).abs() < f64::EPSILON);
}
