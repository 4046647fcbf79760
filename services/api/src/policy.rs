//! Authorization policy
//!
//! Every handler consults the same `(role, action, resource)` table instead
//! of branching on roles ad hoc.

use crate::error::ApiError;
use crate::models::pengguna::Role;
use crate::models::sesi::AuthPengguna;

/// What the caller is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    /// Submit a new enrollment request
    Submit,
    /// Approve or reject a pending enrollment request
    Resolve,
}

/// What the caller is trying to do it to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Pengguna,
    Guru,
    Kelas,
    Murid,
    PermintaanKelas,
    Nilai,
    Stats,
}

/// The policy table: maps (role, action, resource) to allow/deny
pub fn allowed(role: Role, action: Action, resource: Resource) -> bool {
    match role {
        Role::Admin => true,
        Role::Guru => matches!(
            (action, resource),
            (Action::Read, _) | (Action::Resolve, Resource::PermintaanKelas)
        ),
        Role::Murid => matches!(
            (action, resource),
            (
                Action::Read,
                Resource::Guru | Resource::Kelas | Resource::Murid | Resource::Nilai
            ) | (Action::Submit, Resource::PermintaanKelas)
        ),
    }
}

/// Policy check as a guard clause; denial is a 403
pub fn require(auth: &AuthPengguna, action: Action, resource: Resource) -> Result<(), ApiError> {
    if allowed(auth.role, action, resource) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_unrestricted() {
        for action in [
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::Submit,
            Action::Resolve,
        ] {
            assert!(allowed(Role::Admin, action, Resource::PermintaanKelas));
            assert!(allowed(Role::Admin, action, Resource::Pengguna));
        }
    }

    #[test]
    fn test_guru_reads_and_resolves_only() {
        assert!(allowed(Role::Guru, Action::Read, Resource::Murid));
        assert!(allowed(Role::Guru, Action::Read, Resource::Stats));
        assert!(allowed(
            Role::Guru,
            Action::Resolve,
            Resource::PermintaanKelas
        ));
        assert!(!allowed(Role::Guru, Action::Create, Resource::Murid));
        assert!(!allowed(Role::Guru, Action::Delete, Resource::Kelas));
        assert!(!allowed(
            Role::Guru,
            Action::Submit,
            Resource::PermintaanKelas
        ));
    }

    #[test]
    fn test_murid_reads_and_submits_only() {
        assert!(allowed(Role::Murid, Action::Read, Resource::Kelas));
        assert!(allowed(Role::Murid, Action::Read, Resource::Nilai));
        assert!(allowed(
            Role::Murid,
            Action::Submit,
            Resource::PermintaanKelas
        ));
        assert!(!allowed(Role::Murid, Action::Read, Resource::Pengguna));
        assert!(!allowed(Role::Murid, Action::Read, Resource::Stats));
        assert!(!allowed(
            Role::Murid,
            Action::Resolve,
            Resource::PermintaanKelas
        ));
        assert!(!allowed(Role::Murid, Action::Create, Resource::Murid));
    }
}
