//! Student and class CRUD: uniqueness, partial updates, pagination,
//! search and the enriched own-profile view

mod support;

use api::error::ApiError;
use api::models::kelas::UpdateKelas;
use api::models::murid::{JenisKelamin, MuridListFilter, NewMurid, UpdateMurid};
use api::models::pengguna::{Role, UpdatePengguna};
use api::routes::murid::MURID_DUPLICATES;
use api::validation::Page;
use support::{seed_kelas, seed_murid, seed_pengguna, test_state};

fn page(limit: i64, offset: i64) -> Page {
    Page { limit, offset }
}

#[tokio::test]
async fn duplicate_nisn_is_a_conflict_and_first_row_survives() {
    let state = test_state().await;

    seed_murid(&state, "NISN001", "Jane").await;

    let err = state
        .murid_repository
        .create(&NewMurid {
            pengguna_id: None,
            nisn: "NISN001".to_string(),
            nama: "Impostor".to_string(),
            jenis_kelamin: JenisKelamin::P,
            tanggal_lahir: None,
            alamat: None,
            kelas_id: None,
            nama_orang_tua: None,
            no_telp_orang_tua: None,
        })
        .await
        .expect_err("duplicate NISN must be rejected");

    match ApiError::from_db(err, MURID_DUPLICATES) {
        ApiError::Conflict { code, .. } => assert_eq!(code, "NISN_ALREADY_EXISTS"),
        other => panic!("expected NISN_ALREADY_EXISTS conflict, got {:?}", other),
    }

    let survivor = state
        .murid_repository
        .find_by_nisn("NISN001")
        .await
        .expect("lookup failed")
        .expect("first row must be unaffected");
    assert_eq!(survivor.nama, "Jane");
}

#[tokio::test]
async fn patch_is_tristate_absent_keeps_null_clears_value_sets() {
    let state = test_state().await;

    let murid = state
        .murid_repository
        .create(&NewMurid {
            pengguna_id: None,
            nisn: "NISN001".to_string(),
            nama: "Jane".to_string(),
            jenis_kelamin: JenisKelamin::P,
            tanggal_lahir: None,
            alamat: Some("Jl. Melati 1".to_string()),
            kelas_id: None,
            nama_orang_tua: None,
            no_telp_orang_tua: None,
        })
        .await
        .expect("create failed");

    // absent field: alamat untouched, parent name set
    let updated = state
        .murid_repository
        .update(
            murid.id,
            &UpdateMurid {
                nama_orang_tua: Some(Some("Ibu Sari".to_string())),
                ..Default::default()
            },
        )
        .await
        .expect("update failed")
        .expect("murid must exist");
    assert_eq!(updated.alamat.as_deref(), Some("Jl. Melati 1"));
    assert_eq!(updated.nama_orang_tua.as_deref(), Some("Ibu Sari"));

    // explicit null: alamat cleared
    let updated = state
        .murid_repository
        .update(
            murid.id,
            &UpdateMurid {
                alamat: Some(None),
                ..Default::default()
            },
        )
        .await
        .expect("update failed")
        .expect("murid must exist");
    assert_eq!(updated.alamat, None);
    assert_eq!(updated.nama_orang_tua.as_deref(), Some("Ibu Sari"));
}

#[tokio::test]
async fn reapplying_the_same_patch_is_idempotent() {
    let state = test_state().await;

    let murid = seed_murid(&state, "NISN001", "Jane").await;
    let patch = UpdateMurid {
        nama: Some("Jane Dewi".to_string()),
        alamat: Some(Some("Jl. Melati 1".to_string())),
        ..Default::default()
    };

    let once = state
        .murid_repository
        .update(murid.id, &patch)
        .await
        .expect("update failed")
        .expect("murid must exist");
    let twice = state
        .murid_repository
        .update(murid.id, &patch)
        .await
        .expect("update failed")
        .expect("murid must exist");

    assert_eq!(once.nama, twice.nama);
    assert_eq!(once.alamat, twice.alamat);
    assert_eq!(once.created_at, twice.created_at);
}

#[tokio::test]
async fn updating_a_missing_row_is_none() {
    let state = test_state().await;

    let missing = state
        .murid_repository
        .update(
            4242,
            &UpdateMurid {
                nama: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update should not error");

    assert!(missing.is_none());
}

#[tokio::test]
async fn pagination_pages_are_disjoint_and_ordered() {
    let state = test_state().await;

    for i in 0..25 {
        seed_murid(&state, &format!("NISN{:03}", i), &format!("Murid {}", i)).await;
    }

    let first = state
        .murid_repository
        .list(&MuridListFilter::default(), &page(10, 0))
        .await
        .expect("list failed");
    let second = state
        .murid_repository
        .list(&MuridListFilter::default(), &page(10, 10))
        .await
        .expect("list failed");

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 10);

    let mut ids: Vec<i64> = first.iter().chain(second.iter()).map(|m| m.id).collect();
    assert!(
        ids.windows(2).all(|w| w[0] > w[1]),
        "newest-first order must hold across pages"
    );

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20, "pages must not overlap");
}

#[tokio::test]
async fn search_is_case_insensitive_and_filters_compose() {
    let state = test_state().await;

    let kelas = seed_kelas(&state, "X-A", "2024/2025").await;

    state
        .murid_repository
        .create(&NewMurid {
            pengguna_id: None,
            nisn: "NISN001".to_string(),
            nama: "Agus Salim".to_string(),
            jenis_kelamin: JenisKelamin::L,
            tanggal_lahir: None,
            alamat: None,
            kelas_id: Some(kelas.id),
            nama_orang_tua: None,
            no_telp_orang_tua: None,
        })
        .await
        .expect("create failed");
    state
        .murid_repository
        .create(&NewMurid {
            pengguna_id: None,
            nisn: "NISN002".to_string(),
            nama: "Dewi Lestari".to_string(),
            jenis_kelamin: JenisKelamin::P,
            tanggal_lahir: None,
            alamat: None,
            kelas_id: Some(kelas.id),
            nama_orang_tua: None,
            no_telp_orang_tua: None,
        })
        .await
        .expect("create failed");

    let hits = state
        .murid_repository
        .list(
            &MuridListFilter {
                search: Some("agus".to_string()),
                ..Default::default()
            },
            &page(10, 0),
        )
        .await
        .expect("list failed");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].nama, "Agus Salim");

    let girls_in_class = state
        .murid_repository
        .list(
            &MuridListFilter {
                kelas_id: Some(kelas.id),
                jenis_kelamin: Some(JenisKelamin::P),
                search: None,
            },
            &page(10, 0),
        )
        .await
        .expect("list failed");
    assert_eq!(girls_in_class.len(), 1);
    assert_eq!(girls_in_class[0].nama, "Dewi Lestari");
}

#[tokio::test]
async fn own_profile_view_carries_class_and_homeroom_details() {
    let state = test_state().await;

    // homeroom teacher with a linked account and photo
    let guru_account = seed_pengguna(&state, "guru_01", "rahasia1", Role::Guru, "Pak Budi").await;
    state
        .pengguna_repository
        .update(
            guru_account.id,
            &UpdatePengguna {
                foto: Some(Some("budi.jpg".to_string())),
                ..Default::default()
            },
        )
        .await
        .expect("update failed")
        .expect("pengguna must exist");
    let guru = state
        .guru_repository
        .find_by_pengguna_id(guru_account.id)
        .await
        .expect("lookup failed")
        .expect("guru row must exist");

    let kelas = seed_kelas(&state, "X-A", "2024/2025").await;
    state
        .kelas_repository
        .update(
            kelas.id,
            &UpdateKelas {
                wali_kelas_id: Some(Some(guru.id)),
                ..Default::default()
            },
        )
        .await
        .expect("kelas update failed");

    // student linked to an account and placed in the class
    let murid_account = seed_pengguna(&state, "murid_01", "rahasia1", Role::Murid, "Jane").await;
    let murid_id: i64 = sqlx::query_scalar("SELECT id FROM murid WHERE pengguna_id = ?")
        .bind(murid_account.id)
        .fetch_one(&state.db_pool)
        .await
        .expect("provisioned murid must exist");
    state
        .murid_repository
        .update(
            murid_id,
            &UpdateMurid {
                kelas_id: Some(Some(kelas.id)),
                ..Default::default()
            },
        )
        .await
        .expect("murid update failed");

    let me = state
        .murid_repository
        .find_me(murid_account.id)
        .await
        .expect("lookup failed")
        .expect("profile must resolve");

    assert_eq!(me.nama_kelas.as_deref(), Some("X-A"));
    assert_eq!(me.wali_kelas.as_deref(), Some("Pak Budi"));
    assert_eq!(me.wali_kelas_foto.as_deref(), Some("budi.jpg"));

    // a student without a class sees empty enrichment
    let loner_account = seed_pengguna(&state, "murid_02", "rahasia1", Role::Murid, "Solo").await;
    let loner = state
        .murid_repository
        .find_me(loner_account.id)
        .await
        .expect("lookup failed")
        .expect("profile must resolve");
    assert_eq!(loner.kelas_id, None);
    assert_eq!(loner.nama_kelas, None);
    assert_eq!(loner.wali_kelas, None);
}

#[tokio::test]
async fn deleting_a_class_detaches_its_students() {
    let state = test_state().await;

    let kelas = seed_kelas(&state, "X-A", "2024/2025").await;
    let murid = state
        .murid_repository
        .create(&NewMurid {
            pengguna_id: None,
            nisn: "NISN001".to_string(),
            nama: "Jane".to_string(),
            jenis_kelamin: JenisKelamin::P,
            tanggal_lahir: None,
            alamat: None,
            kelas_id: Some(kelas.id),
            nama_orang_tua: None,
            no_telp_orang_tua: None,
        })
        .await
        .expect("create failed");

    state
        .kelas_repository
        .delete(kelas.id)
        .await
        .expect("delete failed")
        .expect("kelas must exist");

    let after = state
        .murid_repository
        .find_by_id(murid.id)
        .await
        .expect("lookup failed")
        .expect("murid must survive");
    assert_eq!(after.kelas_id, None);
}
