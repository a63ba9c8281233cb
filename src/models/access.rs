//! Access API response DTOs

use crate::access::Role;
use serde::Serialize;

/// `GET /api/user/abilities`
#[derive(Debug, Serialize)]
pub struct UserAbilitiesResponse {
    pub role: String,
    pub abilities: Vec<String>,
}

/// Module entry with the caller's access decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleAccess {
    pub module: String,
    pub required: Vec<String>,
    pub accessible: bool,
}

/// Static grant-set of one role
#[derive(Debug, Clone, Serialize)]
pub struct RoleAbilities {
    pub role: Role,
    pub abilities: Vec<String>,
}
