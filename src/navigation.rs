//! 侧边栏导航树
//! 每个条目携带图标标签和可选的门控模块

use serde::Serialize;

/// 图标标签，由视图层选择具体渲染
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavIcon {
    LayoutDashboard,
    Users,
    UserPlus,
    Target,
    FileText,
    ShoppingCart,
    Receipt,
    CreditCard,
    Package,
    Warehouse,
    Truck,
    MessageSquare,
    CheckSquare,
    Bot,
    BarChart,
    Briefcase,
    Boxes,
    Shield,
    Settings,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<&'static str>,
    pub icon: NavIcon,
    /// 为 None 时条目本身不受门控
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    fn link(
        key: &'static str,
        title: &'static str,
        href: &'static str,
        icon: NavIcon,
        module: &'static str,
    ) -> Self {
        Self {
            key,
            title,
            href: Some(href),
            icon,
            module: Some(module),
            children: Vec::new(),
        }
    }

    fn group(key: &'static str, title: &'static str, icon: NavIcon, children: Vec<NavItem>) -> Self {
        Self {
            key,
            title,
            href: None,
            icon,
            module: None,
            children,
        }
    }

    /// 条目及其子条目引用的所有模块
    pub fn modules(&self) -> Vec<&'static str> {
        let mut modules: Vec<&'static str> = self.module.into_iter().collect();
        for child in &self.children {
            modules.extend(child.modules());
        }
        modules
    }
}

/// 管理后台的导航树
pub fn default_navigation() -> Vec<NavItem> {
    vec![
        NavItem::link("dashboard", "Dashboard", "/admin", NavIcon::LayoutDashboard, "dashboard"),
        NavItem::group(
            "crm",
            "CRM",
            NavIcon::Users,
            vec![
                NavItem::link("customers", "Customers", "/admin/customers", NavIcon::Users, "customers"),
                NavItem::link("leads", "Leads", "/admin/leads", NavIcon::UserPlus, "leads"),
                NavItem::link(
                    "opportunities",
                    "Opportunities",
                    "/admin/opportunities",
                    NavIcon::Target,
                    "opportunities",
                ),
            ],
        ),
        NavItem::group(
            "sales",
            "Sales",
            NavIcon::Briefcase,
            vec![
                NavItem::link("quotes", "Quotes", "/admin/quotes", NavIcon::FileText, "quotes"),
                NavItem::link("orders", "Orders", "/admin/orders", NavIcon::ShoppingCart, "orders"),
                NavItem::link("invoices", "Invoices", "/admin/invoices", NavIcon::Receipt, "invoices"),
                NavItem::link("payments", "Payments", "/admin/payments", NavIcon::CreditCard, "payments"),
            ],
        ),
        NavItem::group(
            "catalog",
            "Catalog",
            NavIcon::Boxes,
            vec![
                NavItem::link("products", "Products", "/admin/products", NavIcon::Package, "products"),
                NavItem::link(
                    "inventory",
                    "Inventory",
                    "/admin/inventory",
                    NavIcon::Warehouse,
                    "inventory",
                ),
                NavItem::link("suppliers", "Suppliers", "/admin/suppliers", NavIcon::Truck, "suppliers"),
            ],
        ),
        NavItem::link("messages", "Messages", "/admin/messages", NavIcon::MessageSquare, "messages"),
        NavItem::link("tasks", "Tasks", "/admin/tasks", NavIcon::CheckSquare, "tasks"),
        NavItem::link("agents", "Agents", "/admin/agents", NavIcon::Bot, "agents"),
        NavItem::link("reports", "Reports", "/admin/reports", NavIcon::BarChart, "reports"),
        NavItem::group(
            "administration",
            "Administration",
            NavIcon::Shield,
            vec![
                NavItem::link("users", "Users", "/admin/users", NavIcon::Users, "users"),
                NavItem::link("roles", "Roles", "/admin/roles", NavIcon::Shield, "roles"),
                NavItem::link("settings", "Settings", "/admin/settings", NavIcon::Settings, "settings"),
                NavItem::link(
                    "ecommerce-settings",
                    "E-commerce",
                    "/admin/settings/ecommerce",
                    NavIcon::Store,
                    "ecommerce-settings",
                ),
            ],
        ),
    ]
}

/// 过滤导航树
///
/// 有模块的条目按 `gate` 判定；没有模块的分组只在至少保留一个子条目时显示。
pub fn visible_navigation(items: &[NavItem], gate: &dyn Fn(&str) -> bool) -> Vec<NavItem> {
    items
        .iter()
        .filter_map(|item| {
            if let Some(module) = item.module {
                if !gate(module) {
                    return None;
                }
            }

            let children = visible_navigation(&item.children, gate);
            if item.module.is_none() && !item.children.is_empty() && children.is_empty() {
                return None;
            }

            Some(NavItem {
                children,
                ..item.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::PermissionTable;

    fn keys(items: &[NavItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.key).collect()
    }

    #[test]
    fn test_navigation_modules_are_registered() {
        let table = PermissionTable::builtin();
        for item in default_navigation() {
            for module in item.modules() {
                assert!(table.is_registered_module(module), "unregistered module: {module}");
            }
        }
    }

    #[test]
    fn test_allow_all_keeps_whole_tree() {
        let nav = default_navigation();
        assert_eq!(visible_navigation(&nav, &|_| true), nav);
    }

    #[test]
    fn test_deny_all_hides_everything() {
        assert!(visible_navigation(&default_navigation(), &|_| false).is_empty());
    }

    #[test]
    fn test_group_kept_with_partial_children() {
        let visible = visible_navigation(&default_navigation(), &|m| m == "orders");
        assert_eq!(keys(&visible), vec!["sales"]);
        assert_eq!(keys(&visible[0].children), vec!["orders"]);
    }

    #[test]
    fn test_icon_serializes_kebab_case() {
        let json = serde_json::to_value(NavIcon::LayoutDashboard).unwrap();
        assert_eq!(json, "layout-dashboard");
        let item = serde_json::to_value(&default_navigation()[0]).unwrap();
        assert_eq!(item["icon"], "layout-dashboard");
        assert!(item.get("children").is_none());
    }
}
