//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::repositories::{
    GuruRepository, KelasRepository, MuridRepository, NilaiRepository, PenggunaRepository,
    PermintaanRepository, SesiRepository, StatsRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub pengguna_repository: PenggunaRepository,
    pub guru_repository: GuruRepository,
    pub kelas_repository: KelasRepository,
    pub murid_repository: MuridRepository,
    pub permintaan_repository: PermintaanRepository,
    pub nilai_repository: NilaiRepository,
    pub sesi_repository: SesiRepository,
    pub stats_repository: StatsRepository,
    pub session_ttl_secs: i64,
}

impl AppState {
    pub fn new(pool: SqlitePool, session_ttl_secs: i64) -> Self {
        Self {
            pengguna_repository: PenggunaRepository::new(pool.clone()),
            guru_repository: GuruRepository::new(pool.clone()),
            kelas_repository: KelasRepository::new(pool.clone()),
            murid_repository: MuridRepository::new(pool.clone()),
            permintaan_repository: PermintaanRepository::new(pool.clone()),
            nilai_repository: NilaiRepository::new(pool.clone()),
            sesi_repository: SesiRepository::new(pool.clone()),
            stats_repository: StatsRepository::new(pool.clone()),
            db_pool: pool,
            session_ttl_secs,
        }
    }
}
