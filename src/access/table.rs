//! 权限表与访问判定
//! 所有查询都是对静态数据的纯函数；未知角色/模块解析为空集合，默认拒绝

use super::ability::{AbilitySet, ABILITIES};
use super::module::MODULE_ACCESS;
use super::role::{Grant, Role, ROLE_ABILITIES};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

static BUILTIN: Lazy<PermissionTable> =
    Lazy::new(|| PermissionTable::new(ABILITIES, ROLE_ABILITIES, MODULE_ACCESS));

/// 一致性检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// 能力 / 角色 / 模块三张表
#[derive(Debug)]
pub struct PermissionTable {
    abilities: BTreeMap<&'static str, &'static str>,
    roles: BTreeMap<Role, Grant>,
    modules: BTreeMap<&'static str, &'static [&'static str]>,
}

impl PermissionTable {
    pub fn new(
        abilities: &'static [(&'static str, &'static str)],
        roles: &'static [(Role, Grant)],
        modules: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self {
            abilities: abilities.iter().copied().collect(),
            roles: roles.iter().copied().collect(),
            modules: modules.iter().copied().collect(),
        }
    }

    /// 编译进程序的内置权限表
    pub fn builtin() -> &'static PermissionTable {
        &BUILTIN
    }

    pub fn ability_description(&self, ability: &str) -> Option<&'static str> {
        self.abilities.get(ability).copied()
    }

    pub fn ability_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.abilities.keys().copied()
    }

    pub fn module_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }

    pub fn is_registered_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// 角色名对应的能力集合，未知角色返回空集合
    pub fn abilities_for_role(&self, role: &str) -> AbilitySet {
        match role.parse::<Role>() {
            Ok(role) => self.abilities_for(role),
            Err(_) => {
                tracing::debug!(role = %role, "Unknown role resolves to no abilities");
                AbilitySet::new()
            }
        }
    }

    pub fn abilities_for(&self, role: Role) -> AbilitySet {
        match self.roles.get(&role) {
            Some(Grant::Everything) => self.abilities.keys().map(|k| k.to_string()).collect(),
            Some(Grant::Only(keys)) => keys.iter().map(|k| k.to_string()).collect(),
            None => AbilitySet::new(),
        }
    }

    /// 模块要求的能力集合，未注册模块返回空集合（即无人可访问）
    pub fn required_abilities_for_module(&self, module: &str) -> AbilitySet {
        self.modules
            .get(module)
            .map(|keys| keys.iter().map(|k| k.to_string()).collect())
            .unwrap_or_default()
    }

    /// 用户能力与模块要求有交集时允许访问
    pub fn can_access_module(&self, user_abilities: &AbilitySet, module: &str) -> bool {
        self.modules
            .get(module)
            .is_some_and(|required| required.iter().any(|a| user_abilities.contains(*a)))
    }

    /// 扫描模块表和角色表，收集所有引用了不存在能力的条目
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        for (module, required) in &self.modules {
            for ability in required.iter() {
                if !self.abilities.contains_key(ability) {
                    errors.push(format!(
                        "Module \"{}\" references unknown ability \"{}\"",
                        module, ability
                    ));
                }
            }
        }

        for (role, grant) in &self.roles {
            if let Grant::Only(keys) = grant {
                for ability in keys.iter() {
                    if !self.abilities.contains_key(ability) {
                        errors.push(format!(
                            "Role \"{}\" references unknown ability \"{}\"",
                            role, ability
                        ));
                    }
                }
            }
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ability::ability_set;

    static BROKEN_ABILITIES: &[(&str, &str)] =
        &[("invoices.view", "View invoices"), ("invoices.create", "Create invoices")];
    static BROKEN_ROLES: &[(Role, Grant)] = &[
        (Role::Admin, Grant::Only(&["invoices.view", "invoices.approve"])),
        (Role::Viewer, Grant::Only(&["invoices.view", "reports.view"])),
        (Role::SuperAdmin, Grant::Everything),
    ];
    static BROKEN_MODULES: &[(&str, &[&str])] = &[
        ("invoices", &["invoices.view", "invoices.create"]),
        ("agents", &["agents.view"]),
    ];

    fn broken_table() -> PermissionTable {
        PermissionTable::new(BROKEN_ABILITIES, BROKEN_ROLES, BROKEN_MODULES)
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let report = PermissionTable::builtin().validate();
        assert!(report.is_valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_validate_collects_every_error() {
        let report = broken_table().validate();
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors.contains(
            &"Module \"agents\" references unknown ability \"agents.view\"".to_string()
        ));
        assert!(report.errors.contains(
            &"Role \"ADMIN\" references unknown ability \"invoices.approve\"".to_string()
        ));
        assert!(report.errors.contains(
            &"Role \"VIEWER\" references unknown ability \"reports.view\"".to_string()
        ));
    }

    #[test]
    fn test_validate_reports_modules_before_roles() {
        let report = broken_table().validate();
        assert!(report.errors[0].starts_with("Module"));
        assert!(report.errors[1..].iter().all(|e| e.starts_with("Role")));
    }

    #[test]
    fn test_everything_grant_expands_to_master_keys() {
        let table = broken_table();
        let abilities = table.abilities_for(Role::SuperAdmin);
        assert_eq!(abilities, ability_set(["invoices.view", "invoices.create"]));
    }

    #[test]
    fn test_role_missing_from_table_has_no_abilities() {
        assert!(broken_table().abilities_for(Role::Accountant).is_empty());
    }

    #[test]
    fn test_can_access_module_or_semantics() {
        let table = PermissionTable::builtin();
        assert!(table.can_access_module(&ability_set(["invoices.create"]), "invoices"));
        assert!(table.can_access_module(&ability_set(["invoices.view"]), "invoices"));
        assert!(!table.can_access_module(&ability_set(["orders.view"]), "invoices"));
    }

    #[test]
    fn test_unregistered_module_is_locked() {
        let table = PermissionTable::builtin();
        let everything = table.abilities_for(Role::SuperAdmin);
        assert!(table.required_abilities_for_module("no-such-module").is_empty());
        assert!(!table.can_access_module(&everything, "no-such-module"));
        assert!(!table.is_registered_module("no-such-module"));
    }

    #[test]
    fn test_ability_description_lookup() {
        let table = PermissionTable::builtin();
        assert_eq!(table.ability_description("invoices.create"), Some("Create invoices"));
        assert_eq!(table.ability_description("invoices.approve"), None);
    }
}
