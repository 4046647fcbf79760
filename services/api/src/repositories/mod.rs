//! Repositories for database operations

pub mod guru;
pub mod kelas;
pub mod murid;
pub mod nilai;
pub mod pengguna;
pub mod permintaan;
pub mod sesi;
pub mod stats;

pub use guru::GuruRepository;
pub use kelas::KelasRepository;
pub use murid::MuridRepository;
pub use nilai::NilaiRepository;
pub use pengguna::PenggunaRepository;
pub use permintaan::PermintaanRepository;
pub use sesi::SesiRepository;
pub use stats::StatsRepository;
