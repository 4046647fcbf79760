//! Domain models, request payloads and response views

pub mod guru;
pub mod kelas;
pub mod murid;
pub mod nilai;
pub mod pengguna;
pub mod permintaan;
pub mod sesi;
pub mod stats;

/// Distinguishes an absent JSON field from an explicit `null`.
///
/// Wrap a nullable column's patch field in `Option<Option<T>>` with
/// `#[serde(default, deserialize_with = "crate::models::double_option")]`:
/// absent stays `None` (leave the column untouched), `null` becomes
/// `Some(None)` (clear it), a value becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
