//! 访问控制
//! 静态权限表、访问判定，以及"远端为准、静态表兜底"的两级能力解析

pub mod ability;
pub mod module;
pub mod resolver;
pub mod role;
pub mod session;
pub mod table;

pub use ability::{ability_set, has_ability, AbilitySet, ABILITIES};
pub use module::MODULE_ACCESS;
pub use resolver::{AbilityGrant, AbilityOrigin, AbilityResolver, AbilitySource, ResolvedAbilities};
pub use role::{Grant, Role, UnknownRole, ROLE_ABILITIES};
pub use session::{AbilitySession, SessionState};
pub use table::{PermissionTable, ValidationReport};

/// 内置表中角色的能力集合
pub fn abilities_for_role(role: &str) -> AbilitySet {
    PermissionTable::builtin().abilities_for_role(role)
}

/// 内置表中模块要求的能力集合
pub fn required_abilities_for_module(module: &str) -> AbilitySet {
    PermissionTable::builtin().required_abilities_for_module(module)
}

pub fn can_access_module(user_abilities: &AbilitySet, module: &str) -> bool {
    PermissionTable::builtin().can_access_module(user_abilities, module)
}

/// 检查内置表的一致性
pub fn validate_permissions() -> ValidationReport {
    PermissionTable::builtin().validate()
}
