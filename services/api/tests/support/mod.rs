//! Shared fixtures for the integration tests

#![allow(dead_code)]

use api::models::kelas::{Kelas, NewKelas};
use api::models::murid::{JenisKelamin, Murid, NewMurid};
use api::models::pengguna::{NewPengguna, Pengguna, Role};
use api::state::AppState;
use common::database;

/// Fresh application state over an in-memory database with the full
/// schema applied
pub async fn test_state() -> AppState {
    let pool = database::init_memory_pool()
        .await
        .expect("Failed to create in-memory pool");

    api::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to apply migrations");

    AppState::new(pool, 3600)
}

pub async fn seed_kelas(state: &AppState, nama_kelas: &str, tahun_ajaran: &str) -> Kelas {
    state
        .kelas_repository
        .create(&NewKelas {
            nama_kelas: nama_kelas.to_string(),
            tahun_ajaran: tahun_ajaran.to_string(),
            wali_kelas_id: None,
            jumlah_siswa: 0,
        })
        .await
        .expect("Failed to seed kelas")
}

pub async fn seed_murid(state: &AppState, nisn: &str, nama: &str) -> Murid {
    state
        .murid_repository
        .create(&NewMurid {
            pengguna_id: None,
            nisn: nisn.to_string(),
            nama: nama.to_string(),
            jenis_kelamin: JenisKelamin::L,
            tanggal_lahir: None,
            alamat: None,
            kelas_id: None,
            nama_orang_tua: None,
            no_telp_orang_tua: None,
        })
        .await
        .expect("Failed to seed murid")
}

pub async fn seed_pengguna(
    state: &AppState,
    username: &str,
    password: &str,
    role: Role,
    nama: &str,
) -> Pengguna {
    state
        .pengguna_repository
        .create(&NewPengguna {
            username: username.to_string(),
            password: password.to_string(),
            role,
            nama: nama.to_string(),
            foto: None,
        })
        .await
        .expect("Failed to seed pengguna")
}
