//! Input validation
//!
//! Rejects malformed writes before they reach the repositories. Every
//! failure carries a stable machine code alongside the human message.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ApiError;
use crate::models::guru::{CreateGuruRequest, NewGuru, UpdateGuru, UpdateGuruRequest};
use crate::models::kelas::{CreateKelasRequest, NewKelas, UpdateKelas, UpdateKelasRequest};
use crate::models::murid::{
    CreateMuridRequest, JenisKelamin, NewMurid, UpdateMurid, UpdateMuridRequest,
};
use crate::models::pengguna::{
    CreatePenggunaRequest, NewPengguna, Role, UpdatePengguna, UpdatePenggunaRequest,
};
use crate::models::permintaan::StatusPermintaan;

/// Normalized pagination window
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Parse `limit`/`offset` query parameters: limit defaults to 10 and is
/// capped at 100, offset defaults to 0; garbage falls back to the default.
pub fn page(limit: Option<&str>, offset: Option<&str>) -> Page {
    let limit = limit
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(10)
        .clamp(0, 100);

    let offset = offset
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);

    Page { limit, offset }
}

/// Parse a numeric identifier taken from a query parameter
pub fn parse_id(raw: &str, code: &'static str, message: &'static str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation(code, message))
}

fn missing_required(fields: &[&str]) -> ApiError {
    ApiError::validation(
        "MISSING_REQUIRED_FIELDS",
        format!("Required fields are missing: {}", fields.join(", ")),
    )
}

/// Trim a required string; `None` lands in the missing list, a blank value
/// is a field-specific error.
fn required<'a>(
    value: Option<&'a str>,
    wire_name: &'static str,
    code: &'static str,
    missing: &mut Vec<&'static str>,
) -> Result<Option<&'a str>, ApiError> {
    match value {
        None => {
            missing.push(wire_name);
            Ok(None)
        }
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ApiError::validation(
                    code,
                    format!("{} must be a non-empty string", wire_name),
                ));
            }
            Ok(Some(trimmed))
        }
    }
}

/// Trim an updated string; blank values are rejected rather than cleared
/// because the column is NOT NULL.
fn updated(
    value: Option<&str>,
    wire_name: &'static str,
    code: &'static str,
) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ApiError::validation(
                    code,
                    format!("{} must be a non-empty string", wire_name),
                ));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Trim an optional nullable string; blank collapses to absent.
fn optional(value: Option<&str>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Trim a tri-state patch field; an explicit blank clears the column.
fn patched(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|inner| inner.as_deref().and_then(|raw| optional(Some(raw))))
}

pub fn parse_role(raw: &str) -> Result<Role, ApiError> {
    match raw {
        "admin" => Ok(Role::Admin),
        "guru" => Ok(Role::Guru),
        "murid" => Ok(Role::Murid),
        _ => Err(ApiError::validation(
            "INVALID_ROLE",
            "role must be one of \"admin\", \"guru\", \"murid\"",
        )),
    }
}

pub fn parse_jenis_kelamin(raw: &str) -> Result<JenisKelamin, ApiError> {
    match raw {
        "L" => Ok(JenisKelamin::L),
        "P" => Ok(JenisKelamin::P),
        _ => Err(ApiError::validation(
            "INVALID_GENDER",
            "jenisKelamin must be either \"L\" or \"P\"",
        )),
    }
}

/// Parse the decision of an enrollment resolution; pending is not a
/// decision.
pub fn parse_keputusan(raw: &str) -> Result<StatusPermintaan, ApiError> {
    match raw {
        "disetujui" => Ok(StatusPermintaan::Disetujui),
        "ditolak" => Ok(StatusPermintaan::Ditolak),
        _ => Err(ApiError::validation(
            "INVALID_STATUS",
            "status must be either \"disetujui\" or \"ditolak\"",
        )),
    }
}

fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"))
}

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.len() < 3 || username.len() > 32 {
        return Err(ApiError::validation(
            "INVALID_USERNAME",
            "username must be between 3 and 32 characters long",
        ));
    }

    if !username_regex().is_match(username) {
        return Err(ApiError::validation(
            "INVALID_USERNAME",
            "username can only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 6 {
        return Err(ApiError::validation(
            "INVALID_PASSWORD",
            "password must be at least 6 characters long",
        ));
    }

    Ok(())
}

pub fn validate_new_pengguna(req: &CreatePenggunaRequest) -> Result<NewPengguna, ApiError> {
    let mut missing = Vec::new();

    let username = required(
        req.username.as_deref(),
        "username",
        "INVALID_USERNAME",
        &mut missing,
    )?;
    let password = match req.password.as_deref() {
        None => {
            missing.push("password");
            None
        }
        Some(p) => Some(p),
    };
    let role = required(req.role.as_deref(), "role", "INVALID_ROLE", &mut missing)?;
    let nama = required(req.nama.as_deref(), "nama", "INVALID_NAMA", &mut missing)?;

    if !missing.is_empty() {
        return Err(missing_required(&missing));
    }

    let username = username.unwrap();
    let password = password.unwrap();
    let role = parse_role(role.unwrap())?;
    let nama = nama.unwrap();

    validate_username(username)?;
    validate_password(password)?;

    Ok(NewPengguna {
        username: username.to_string(),
        password: password.to_string(),
        role,
        nama: nama.to_string(),
        foto: optional(req.foto.as_deref()),
    })
}

pub fn validate_update_pengguna(req: &UpdatePenggunaRequest) -> Result<UpdatePengguna, ApiError> {
    let username = updated(req.username.as_deref(), "username", "INVALID_USERNAME")?;
    if let Some(username) = &username {
        validate_username(username)?;
    }

    Ok(UpdatePengguna {
        username,
        nama: updated(req.nama.as_deref(), "nama", "INVALID_NAMA")?,
        foto: patched(req.foto.clone()),
    })
}

pub fn validate_new_guru(req: &CreateGuruRequest) -> Result<NewGuru, ApiError> {
    let mut missing = Vec::new();

    let nip = required(req.nip.as_deref(), "nip", "INVALID_NIP", &mut missing)?;
    let nama = required(req.nama.as_deref(), "nama", "INVALID_NAMA", &mut missing)?;
    let mata_pelajaran = required(
        req.mata_pelajaran.as_deref(),
        "mataPelajaran",
        "INVALID_MATA_PELAJARAN",
        &mut missing,
    )?;

    if !missing.is_empty() {
        return Err(missing_required(&missing));
    }

    Ok(NewGuru {
        pengguna_id: req.pengguna_id,
        nip: nip.unwrap().to_string(),
        nama: nama.unwrap().to_string(),
        mata_pelajaran: mata_pelajaran.unwrap().to_string(),
        no_telp: optional(req.no_telp.as_deref()),
    })
}

pub fn validate_update_guru(req: &UpdateGuruRequest) -> Result<UpdateGuru, ApiError> {
    Ok(UpdateGuru {
        pengguna_id: req.pengguna_id,
        nip: updated(req.nip.as_deref(), "nip", "INVALID_NIP")?,
        nama: updated(req.nama.as_deref(), "nama", "INVALID_NAMA")?,
        mata_pelajaran: updated(
            req.mata_pelajaran.as_deref(),
            "mataPelajaran",
            "INVALID_MATA_PELAJARAN",
        )?,
        no_telp: patched(req.no_telp.clone()),
    })
}

pub fn validate_new_kelas(req: &CreateKelasRequest) -> Result<NewKelas, ApiError> {
    let mut missing = Vec::new();

    let nama_kelas = required(
        req.nama_kelas.as_deref(),
        "namaKelas",
        "INVALID_NAMA_KELAS",
        &mut missing,
    )?;
    let tahun_ajaran = required(
        req.tahun_ajaran.as_deref(),
        "tahunAjaran",
        "INVALID_TAHUN_AJARAN",
        &mut missing,
    )?;

    if !missing.is_empty() {
        return Err(missing_required(&missing));
    }

    let jumlah_siswa = req.jumlah_siswa.unwrap_or(0);
    if jumlah_siswa < 0 {
        return Err(ApiError::validation(
            "INVALID_JUMLAH_SISWA",
            "jumlahSiswa must be a non-negative number",
        ));
    }

    Ok(NewKelas {
        nama_kelas: nama_kelas.unwrap().to_string(),
        tahun_ajaran: tahun_ajaran.unwrap().to_string(),
        wali_kelas_id: req.wali_kelas_id,
        jumlah_siswa,
    })
}

pub fn validate_update_kelas(req: &UpdateKelasRequest) -> Result<UpdateKelas, ApiError> {
    if req.nama_kelas.is_none()
        && req.tahun_ajaran.is_none()
        && req.wali_kelas_id.is_none()
        && req.jumlah_siswa.is_none()
    {
        return Err(ApiError::validation(
            "NO_UPDATES",
            "No valid fields to update",
        ));
    }

    if let Some(jumlah_siswa) = req.jumlah_siswa {
        if jumlah_siswa < 0 {
            return Err(ApiError::validation(
                "INVALID_JUMLAH_SISWA",
                "jumlahSiswa must be a non-negative number",
            ));
        }
    }

    Ok(UpdateKelas {
        nama_kelas: updated(req.nama_kelas.as_deref(), "namaKelas", "INVALID_NAMA_KELAS")?,
        tahun_ajaran: updated(
            req.tahun_ajaran.as_deref(),
            "tahunAjaran",
            "INVALID_TAHUN_AJARAN",
        )?,
        wali_kelas_id: req.wali_kelas_id,
        jumlah_siswa: req.jumlah_siswa,
    })
}

pub fn validate_new_murid(req: &CreateMuridRequest) -> Result<NewMurid, ApiError> {
    let mut missing = Vec::new();

    let nisn = required(req.nisn.as_deref(), "nisn", "INVALID_NISN", &mut missing)?;
    let nama = required(req.nama.as_deref(), "nama", "INVALID_NAMA", &mut missing)?;
    let jenis_kelamin = required(
        req.jenis_kelamin.as_deref(),
        "jenisKelamin",
        "INVALID_GENDER",
        &mut missing,
    )?;

    if !missing.is_empty() {
        return Err(missing_required(&missing));
    }

    Ok(NewMurid {
        pengguna_id: req.pengguna_id,
        nisn: nisn.unwrap().to_string(),
        nama: nama.unwrap().to_string(),
        jenis_kelamin: parse_jenis_kelamin(jenis_kelamin.unwrap())?,
        tanggal_lahir: optional(req.tanggal_lahir.as_deref()),
        alamat: optional(req.alamat.as_deref()),
        kelas_id: req.kelas_id,
        nama_orang_tua: optional(req.nama_orang_tua.as_deref()),
        no_telp_orang_tua: optional(req.no_telp_orang_tua.as_deref()),
    })
}

pub fn validate_update_murid(req: &UpdateMuridRequest) -> Result<UpdateMurid, ApiError> {
    let jenis_kelamin = req
        .jenis_kelamin
        .as_deref()
        .map(parse_jenis_kelamin)
        .transpose()?;

    Ok(UpdateMurid {
        nisn: updated(req.nisn.as_deref(), "nisn", "INVALID_NISN")?,
        nama: updated(req.nama.as_deref(), "nama", "INVALID_NAMA")?,
        jenis_kelamin,
        tanggal_lahir: patched(req.tanggal_lahir.clone()),
        alamat: patched(req.alamat.clone()),
        kelas_id: req.kelas_id,
        nama_orang_tua: patched(req.nama_orang_tua.clone()),
        no_telp_orang_tua: patched(req.no_telp_orang_tua.clone()),
    })
}
