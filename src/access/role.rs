//! 角色定义与角色能力表
//! 静态角色表只是远端能力拉取失败时的降级来源

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    SalesManager,
    SalesRep,
    InventoryManager,
    Accountant,
    SupportAgent,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::SalesManager,
        Role::SalesRep,
        Role::InventoryManager,
        Role::Accountant,
        Role::SupportAgent,
        Role::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::SalesManager => "SALES_MANAGER",
            Role::SalesRep => "SALES_REP",
            Role::InventoryManager => "INVENTORY_MANAGER",
            Role::Accountant => "ACCOUNTANT",
            Role::SupportAgent => "SUPPORT_AGENT",
            Role::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知角色
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// 角色授予的能力
#[derive(Debug, Clone, Copy)]
pub enum Grant {
    /// 主表中的全部能力
    Everything,
    Only(&'static [&'static str]),
}

pub const ROLE_ABILITIES: &[(Role, Grant)] = &[
    (Role::SuperAdmin, Grant::Everything),
    (
        Role::Admin,
        Grant::Only(&[
            "dashboard.view",
            "customers.view",
            "customers.create",
            "customers.edit",
            "customers.delete",
            "leads.view",
            "leads.create",
            "leads.edit",
            "leads.delete",
            "leads.convert",
            "opportunities.view",
            "opportunities.create",
            "opportunities.edit",
            "opportunities.delete",
            "quotes.view",
            "quotes.create",
            "quotes.edit",
            "quotes.send",
            "orders.view",
            "orders.create",
            "orders.edit",
            "orders.cancel",
            "orders.fulfill",
            "invoices.view",
            "invoices.create",
            "invoices.edit",
            "invoices.delete",
            "invoices.send",
            "payments.view",
            "payments.record",
            "payments.refund",
            "products.view",
            "products.create",
            "products.edit",
            "products.delete",
            "inventory.view",
            "inventory.adjust",
            "inventory.transfer",
            "suppliers.view",
            "suppliers.manage",
            "messages.view",
            "messages.send",
            "tasks.view",
            "tasks.create",
            "tasks.edit",
            "tasks.delete",
            "tasks.assign",
            "agents.view",
            "agents.create",
            "agents.edit",
            "agents.delete",
            "agents.run",
            "reports.view",
            "reports.export",
            "users.view",
            "users.create",
            "users.edit",
            "users.delete",
            "roles.view",
            "settings.view",
            "settings.edit",
            "ecommerce.view",
            "ecommerce.manage",
        ]),
    ),
    (
        Role::SalesManager,
        Grant::Only(&[
            "dashboard.view",
            "customers.view",
            "customers.create",
            "customers.edit",
            "customers.delete",
            "leads.view",
            "leads.create",
            "leads.edit",
            "leads.delete",
            "leads.convert",
            "opportunities.view",
            "opportunities.create",
            "opportunities.edit",
            "opportunities.delete",
            "quotes.view",
            "quotes.create",
            "quotes.edit",
            "quotes.send",
            "orders.view",
            "orders.create",
            "orders.edit",
            "invoices.view",
            "products.view",
            "inventory.view",
            "messages.view",
            "messages.send",
            "tasks.view",
            "tasks.create",
            "tasks.edit",
            "tasks.delete",
            "tasks.assign",
            "agents.view",
            "agents.run",
            "reports.view",
            "reports.export",
            "users.view",
        ]),
    ),
    (
        Role::SalesRep,
        Grant::Only(&[
            "dashboard.view",
            "customers.view",
            "customers.create",
            "customers.edit",
            "leads.view",
            "leads.create",
            "leads.edit",
            "leads.convert",
            "opportunities.view",
            "opportunities.create",
            "opportunities.edit",
            "quotes.view",
            "quotes.create",
            "quotes.edit",
            "quotes.send",
            "orders.view",
            "orders.create",
            "products.view",
            "inventory.view",
            "messages.view",
            "messages.send",
            "tasks.view",
            "tasks.create",
            "tasks.edit",
            "agents.view",
        ]),
    ),
    (
        Role::InventoryManager,
        Grant::Only(&[
            "dashboard.view",
            "products.view",
            "products.create",
            "products.edit",
            "products.delete",
            "inventory.view",
            "inventory.adjust",
            "inventory.transfer",
            "suppliers.view",
            "suppliers.manage",
            "orders.view",
            "orders.edit",
            "orders.fulfill",
            "messages.view",
            "messages.send",
            "tasks.view",
            "tasks.create",
            "tasks.edit",
            "reports.view",
            "ecommerce.view",
        ]),
    ),
    (
        Role::Accountant,
        Grant::Only(&[
            "dashboard.view",
            "customers.view",
            "quotes.view",
            "orders.view",
            "invoices.view",
            "invoices.create",
            "invoices.edit",
            "invoices.delete",
            "invoices.send",
            "payments.view",
            "payments.record",
            "payments.refund",
            "products.view",
            "reports.view",
            "reports.export",
            "settings.view",
        ]),
    ),
    (
        Role::SupportAgent,
        Grant::Only(&[
            "dashboard.view",
            "customers.view",
            "customers.edit",
            "orders.view",
            "products.view",
            "messages.view",
            "messages.send",
            "tasks.view",
            "tasks.create",
            "tasks.edit",
            "agents.view",
            "agents.run",
        ]),
    ),
    (
        Role::Viewer,
        Grant::Only(&[
            "dashboard.view",
            "customers.view",
            "leads.view",
            "opportunities.view",
            "quotes.view",
            "orders.view",
            "invoices.view",
            "products.view",
            "inventory.view",
            "messages.view",
            "tasks.view",
            "reports.view",
        ]),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_unknown_role() {
        let err = "NOT_A_ROLE".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("NOT_A_ROLE".to_string()));
        // 大小写敏感
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_matches_as_str() {
        let json = serde_json::to_string(&Role::SalesManager).unwrap();
        assert_eq!(json, "\"SALES_MANAGER\"");
    }

    #[test]
    fn test_every_role_has_a_grant() {
        for role in Role::ALL {
            assert!(ROLE_ABILITIES.iter().any(|(r, _)| *r == role), "missing grant for {role}");
        }
    }
}
