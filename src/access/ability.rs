//! 能力主表
//! 键格式为 `<resource>.<action>`，值为描述。扁平集合，没有层级

use std::collections::BTreeSet;

/// 用户的有效能力集合
pub type AbilitySet = BTreeSet<String>;

/// 所有能力及其描述
pub const ABILITIES: &[(&str, &str)] = &[
    // Dashboard
    ("dashboard.view", "View the dashboard"),
    // CRM
    ("customers.view", "View customers"),
    ("customers.create", "Create customers"),
    ("customers.edit", "Edit customers"),
    ("customers.delete", "Delete customers"),
    ("leads.view", "View leads"),
    ("leads.create", "Create leads"),
    ("leads.edit", "Edit leads"),
    ("leads.delete", "Delete leads"),
    ("leads.convert", "Convert leads into customers"),
    ("opportunities.view", "View opportunities"),
    ("opportunities.create", "Create opportunities"),
    ("opportunities.edit", "Edit opportunities"),
    ("opportunities.delete", "Delete opportunities"),
    // Sales
    ("quotes.view", "View quotes"),
    ("quotes.create", "Create quotes"),
    ("quotes.edit", "Edit quotes"),
    ("quotes.send", "Send quotes to customers"),
    ("orders.view", "View orders"),
    ("orders.create", "Create orders"),
    ("orders.edit", "Edit orders"),
    ("orders.cancel", "Cancel orders"),
    ("orders.fulfill", "Fulfill orders"),
    ("invoices.view", "View invoices"),
    ("invoices.create", "Create invoices"),
    ("invoices.edit", "Edit invoices"),
    ("invoices.delete", "Delete invoices"),
    ("invoices.send", "Send invoices to customers"),
    ("payments.view", "View payments"),
    ("payments.record", "Record payments"),
    ("payments.refund", "Refund payments"),
    // Catalog and stock
    ("products.view", "View products"),
    ("products.create", "Create products"),
    ("products.edit", "Edit products"),
    ("products.delete", "Delete products"),
    ("inventory.view", "View inventory levels"),
    ("inventory.adjust", "Adjust inventory levels"),
    ("inventory.transfer", "Transfer stock between locations"),
    ("suppliers.view", "View suppliers"),
    ("suppliers.manage", "Create, edit and delete suppliers"),
    // Messaging
    ("messages.view", "View conversations"),
    ("messages.send", "Send messages"),
    // Tasks and agents
    ("tasks.view", "View tasks"),
    ("tasks.create", "Create tasks"),
    ("tasks.edit", "Edit tasks"),
    ("tasks.delete", "Delete tasks"),
    ("tasks.assign", "Assign tasks to users"),
    ("agents.view", "View agents"),
    ("agents.create", "Create agents"),
    ("agents.edit", "Edit agents"),
    ("agents.delete", "Delete agents"),
    ("agents.run", "Run agents"),
    // Reporting
    ("reports.view", "View reports"),
    ("reports.export", "Export reports"),
    // Administration
    ("users.view", "View users"),
    ("users.create", "Create users"),
    ("users.edit", "Edit users"),
    ("users.delete", "Delete users"),
    ("roles.view", "View roles"),
    ("roles.manage", "Manage roles and their abilities"),
    ("settings.view", "View company settings"),
    ("settings.edit", "Edit company settings"),
    ("ecommerce.view", "View storefront settings"),
    ("ecommerce.manage", "Manage storefront settings"),
];

/// 普通集合成员检查
pub fn has_ability(user_abilities: &AbilitySet, ability: &str) -> bool {
    user_abilities.contains(ability)
}

/// 从字符串切片构建能力集合
pub fn ability_set<I, S>(abilities: I) -> AbilitySet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    abilities.into_iter().map(Into::into).collect()
}
