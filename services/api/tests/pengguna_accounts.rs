//! Account lifecycle: provisioning, uniqueness, rename cascade, passwords,
//! sessions

mod support;

use api::error::ApiError;
use api::models::pengguna::{Role, UpdatePengguna};
use api::password;
use api::routes::pengguna::PENGGUNA_DUPLICATES;
use support::{seed_pengguna, test_state};

#[tokio::test]
async fn create_stores_a_hash_and_stamps_creation_time() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    assert_ne!(pengguna.password, "rahasia1");
    assert!(
        password::verify_password("rahasia1", &pengguna.password).expect("verify errored"),
        "stored hash must verify against the original password"
    );
}

#[tokio::test]
async fn guru_account_provisions_a_linked_guru_row() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "guru_01", "rahasia1", Role::Guru, "Budi Santoso").await;

    let guru = state
        .guru_repository
        .find_by_pengguna_id(pengguna.id)
        .await
        .expect("lookup failed")
        .expect("guru row must have been provisioned");

    assert_eq!(guru.nama, "Budi Santoso");
    assert!(guru.nip.starts_with("TEMP-"), "placeholder NIP expected");
    assert_eq!(guru.mata_pelajaran, "Umum");
}

#[tokio::test]
async fn murid_account_provisions_a_linked_murid_row() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "murid_01", "rahasia1", Role::Murid, "Jane Doe").await;

    let murid: Option<(String,)> =
        sqlx::query_as("SELECT nisn FROM murid WHERE pengguna_id = ?")
            .bind(pengguna.id)
            .fetch_optional(&state.db_pool)
            .await
            .expect("lookup failed");

    let (nisn,) = murid.expect("murid row must have been provisioned");
    assert!(nisn.starts_with("TEMP-"), "placeholder NISN expected");
}

#[tokio::test]
async fn admin_account_provisions_nothing() {
    let state = test_state().await;

    seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    let guru_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guru")
        .fetch_one(&state.db_pool)
        .await
        .expect("count failed");
    let murid_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM murid")
        .fetch_one(&state.db_pool)
        .await
        .expect("count failed");

    assert_eq!((guru_count, murid_count), (0, 0));
}

#[tokio::test]
async fn duplicate_username_is_a_conflict_and_first_row_survives() {
    let state = test_state().await;

    let first = seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    let err = state
        .pengguna_repository
        .create(&api::models::pengguna::NewPengguna {
            username: "admin_01".to_string(),
            password: "rahasia2".to_string(),
            role: Role::Admin,
            nama: "Penyusup".to_string(),
            foto: None,
        })
        .await
        .expect_err("duplicate username must be rejected");

    match ApiError::from_db(err, PENGGUNA_DUPLICATES) {
        ApiError::Conflict { code, .. } => assert_eq!(code, "DUPLICATE_USERNAME"),
        other => panic!("expected DUPLICATE_USERNAME conflict, got {:?}", other),
    }

    let survivor = state
        .pengguna_repository
        .find_by_id(first.id)
        .await
        .expect("lookup failed")
        .expect("first row must be unaffected");
    assert_eq!(survivor.nama, "Admin Satu");
}

#[tokio::test]
async fn renaming_an_account_cascades_to_the_linked_profile() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "guru_01", "rahasia1", Role::Guru, "Budi Santoso").await;

    let updated = state
        .pengguna_repository
        .update(
            pengguna.id,
            &UpdatePengguna {
                nama: Some("Budi Wijaya".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update failed")
        .expect("pengguna must exist");
    assert_eq!(updated.nama, "Budi Wijaya");

    let guru = state
        .guru_repository
        .find_by_pengguna_id(pengguna.id)
        .await
        .expect("lookup failed")
        .expect("guru row must exist");
    assert_eq!(guru.nama, "Budi Wijaya", "denormalized name must follow");
}

#[tokio::test]
async fn empty_patch_is_idempotent() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    let once = state
        .pengguna_repository
        .update(pengguna.id, &UpdatePengguna::default())
        .await
        .expect("update failed")
        .expect("pengguna must exist");
    let twice = state
        .pengguna_repository
        .update(pengguna.id, &UpdatePengguna::default())
        .await
        .expect("update failed")
        .expect("pengguna must exist");

    assert_eq!(once.username, twice.username);
    assert_eq!(once.nama, twice.nama);
    assert_eq!(once.created_at, twice.created_at);
}

#[tokio::test]
async fn deleting_an_account_detaches_its_profile_row() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "guru_01", "rahasia1", Role::Guru, "Budi Santoso").await;

    let deleted = state
        .pengguna_repository
        .delete(pengguna.id)
        .await
        .expect("delete failed")
        .expect("row must be returned");
    assert_eq!(deleted.username, "guru_01");

    let orphan: (Option<i64>,) =
        sqlx::query_as("SELECT pengguna_id FROM guru WHERE nama = 'Budi Santoso'")
            .fetch_one(&state.db_pool)
            .await
            .expect("guru row must survive the account deletion");
    assert_eq!(orphan.0, None, "link must be cleared, not cascaded away");
}

#[tokio::test]
async fn password_change_rehashes_and_old_password_stops_working() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    let changed = state
        .pengguna_repository
        .update_password(pengguna.id, "barubanget9")
        .await
        .expect("password update failed");
    assert!(changed);

    let after = state
        .pengguna_repository
        .find_by_id(pengguna.id)
        .await
        .expect("lookup failed")
        .expect("pengguna must exist");

    assert!(!password::verify_password("rahasia1", &after.password).expect("verify errored"));
    assert!(password::verify_password("barubanget9", &after.password).expect("verify errored"));
}

#[tokio::test]
async fn wrong_password_yields_nothing_but_a_refusal() {
    let state = test_state().await;

    seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    let found = state
        .pengguna_repository
        .find_by_username("admin_01")
        .await
        .expect("lookup failed")
        .expect("pengguna must exist");

    assert!(
        !password::verify_password("salah123", &found.password).expect("verify errored"),
        "wrong password must not verify"
    );

    let ghost = state
        .pengguna_repository
        .find_by_username("tidak_ada")
        .await
        .expect("lookup failed");
    assert!(ghost.is_none());
}

#[tokio::test]
async fn session_round_trip_expiry_and_logout() {
    let state = test_state().await;

    let pengguna = seed_pengguna(&state, "admin_01", "rahasia1", Role::Admin, "Admin Satu").await;

    let sesi = state
        .sesi_repository
        .create(pengguna.id, 3600)
        .await
        .expect("session create failed");

    let principal = state
        .sesi_repository
        .find_principal(&sesi.token)
        .await
        .expect("lookup failed")
        .expect("live token must resolve");
    assert_eq!(principal.id, pengguna.id);
    assert_eq!(principal.role, Role::Admin);

    let unknown = state
        .sesi_repository
        .find_principal("not-a-token")
        .await
        .expect("lookup failed");
    assert!(unknown.is_none());

    let expired = state
        .sesi_repository
        .create(pengguna.id, -10)
        .await
        .expect("session create failed");
    let principal = state
        .sesi_repository
        .find_principal(&expired.token)
        .await
        .expect("lookup failed");
    assert!(principal.is_none(), "expired token must not resolve");

    state
        .sesi_repository
        .delete_for_pengguna(pengguna.id)
        .await
        .expect("logout failed");

    let principal = state
        .sesi_repository
        .find_principal(&sesi.token)
        .await
        .expect("lookup failed");
    assert!(principal.is_none(), "logout must close the session");
}
