//! 权限解析器集成测试
//! 在内置权限表上穷举角色与模块

use bizportal::access::{
    abilities_for_role, can_access_module, has_ability, required_abilities_for_module,
    validate_permissions, AbilitySet, PermissionTable, Role, ABILITIES, MODULE_ACCESS,
};

fn set(items: &[&str]) -> AbilitySet {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_builtin_table_is_consistent() {
    let report = validate_permissions();
    assert!(report.is_valid, "errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[test]
fn test_every_required_ability_is_registered() {
    let table = PermissionTable::builtin();
    for (module, _) in MODULE_ACCESS {
        for ability in required_abilities_for_module(module) {
            assert!(
                table.ability_description(&ability).is_some(),
                "{module} requires unregistered ability {ability}"
            );
        }
    }
}

#[test]
fn test_every_role_ability_is_registered() {
    let keys: AbilitySet = ABILITIES.iter().map(|(key, _)| key.to_string()).collect();
    for role in Role::ALL {
        let abilities = abilities_for_role(role.as_str());
        assert!(abilities.is_subset(&keys), "{role} has unregistered abilities");
    }
}

#[test]
fn test_super_admin_holds_every_ability() {
    let all: AbilitySet = ABILITIES.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(abilities_for_role("SUPER_ADMIN"), all);
}

#[test]
fn test_super_admin_reaches_every_module() {
    let abilities = abilities_for_role("SUPER_ADMIN");
    for (module, _) in MODULE_ACCESS {
        assert!(can_access_module(&abilities, module), "SUPER_ADMIN denied {module}");
    }
    assert!(can_access_module(&abilities, "ecommerce-settings"));
}

#[test]
fn test_access_is_any_of_required() {
    // 对每个模块，单独持有任意一个所需能力即可访问
    for (module, required) in MODULE_ACCESS {
        for ability in *required {
            assert!(can_access_module(&set(&[ability]), module));
        }
    }
}

#[test]
fn test_empty_abilities_deny_every_registered_module() {
    let empty = AbilitySet::new();
    for (module, _) in MODULE_ACCESS {
        assert!(!can_access_module(&empty, module));
    }
    assert!(!can_access_module(&empty, "dashboard"));
}

#[test]
fn test_unregistered_module_always_denied() {
    let abilities = abilities_for_role("SUPER_ADMIN");
    assert!(!can_access_module(&abilities, "not-a-module"));
    assert!(!can_access_module(&abilities, ""));
    assert!(required_abilities_for_module("not-a-module").is_empty());
}

#[test]
fn test_unknown_role_has_no_abilities() {
    assert!(abilities_for_role("NOT_A_ROLE").is_empty());
    assert!(abilities_for_role("").is_empty());
    assert!(abilities_for_role("viewer").is_empty());
}

#[test]
fn test_lookups_are_idempotent() {
    for role in Role::ALL {
        assert_eq!(abilities_for_role(role.as_str()), abilities_for_role(role.as_str()));
    }
    for (module, _) in MODULE_ACCESS {
        assert_eq!(
            required_abilities_for_module(module),
            required_abilities_for_module(module)
        );
    }
}

#[test]
fn test_viewer_is_read_only() {
    let viewer = abilities_for_role("VIEWER");
    assert!(has_ability(&viewer, "products.view"));
    assert!(!has_ability(&viewer, "products.create"));
    assert!(viewer.iter().all(|ability| ability.ends_with(".view")));

    assert!(can_access_module(&viewer, "dashboard"));
    assert!(!can_access_module(&viewer, "roles"));
    assert!(!can_access_module(&viewer, "ecommerce-settings"));
}

#[test]
fn test_admin_cannot_manage_roles() {
    let admin = abilities_for_role("ADMIN");
    assert!(!has_ability(&admin, "roles.manage"));
    assert!(has_ability(&admin, "roles.view"));
    assert!(can_access_module(&admin, "roles"));
    assert!(can_access_module(&admin, "ecommerce-settings"));
}

#[test]
fn test_role_grants_are_nested_under_super_admin() {
    let everything = abilities_for_role("SUPER_ADMIN");
    for role in Role::ALL {
        assert!(abilities_for_role(role.as_str()).is_subset(&everything));
    }
}

#[test]
fn test_every_role_sees_dashboard() {
    for role in Role::ALL {
        let abilities = abilities_for_role(role.as_str());
        assert!(can_access_module(&abilities, "dashboard"), "{role} denied dashboard");
    }
}

#[test]
fn test_accountant_modules() {
    let accountant = abilities_for_role("ACCOUNTANT");
    assert!(can_access_module(&accountant, "invoices"));
    assert!(can_access_module(&accountant, "payments"));
    assert!(!can_access_module(&accountant, "inventory"));
    assert!(!can_access_module(&accountant, "agents"));
}

#[test]
fn test_support_agent_reaches_agents_by_run_ability() {
    let support = abilities_for_role("SUPPORT_AGENT");
    assert!(support.contains("agents.run"));
    assert!(can_access_module(&support, "agents"));
    assert!(can_access_module(&set(&["agents.run"]), "agents"));
}
