//! 模块访问表
//! 每个模块对应一组能力，拥有其中任意一个即可访问（逻辑或）

pub const MODULE_ACCESS: &[(&str, &[&str])] = &[
    ("dashboard", &["dashboard.view"]),
    ("customers", &["customers.view"]),
    ("leads", &["leads.view"]),
    ("opportunities", &["opportunities.view"]),
    ("quotes", &["quotes.view"]),
    ("orders", &["orders.view"]),
    ("invoices", &["invoices.view", "invoices.create"]),
    ("payments", &["payments.view"]),
    ("products", &["products.view"]),
    ("inventory", &["inventory.view"]),
    ("suppliers", &["suppliers.view"]),
    ("messages", &["messages.view"]),
    ("tasks", &["tasks.view"]),
    ("agents", &["agents.view", "agents.run"]),
    ("reports", &["reports.view"]),
    ("users", &["users.view"]),
    ("roles", &["roles.view", "roles.manage"]),
    ("settings", &["settings.view"]),
    ("ecommerce-settings", &["ecommerce.manage", "settings.edit"]),
];
