//! 访问检查服务
//! 服务端以静态权限表为准，按会话中的角色判定

use crate::{
    access::{AbilitySet, PermissionTable, Role},
    auth::AuthContext,
    error::AppError,
    models::{ModuleAccess, RoleAbilities},
    navigation::{default_navigation, visible_navigation, NavItem},
};

pub struct AccessService {
    table: &'static PermissionTable,
}

impl AccessService {
    pub fn new(table: &'static PermissionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'static PermissionTable {
        self.table
    }

    /// 会话角色的能力集合，未知角色为空
    pub fn abilities_for(&self, auth_context: &AuthContext) -> AbilitySet {
        self.table.abilities_for_role(&auth_context.role)
    }

    /// 检查用户是否拥有能力
    pub fn check_ability(&self, auth_context: &AuthContext, ability: &str) -> bool {
        self.abilities_for(auth_context).contains(ability)
    }

    /// 检查能力，如果没有则返回错误
    pub fn require_ability(&self, auth_context: &AuthContext, ability: &str) -> Result<(), AppError> {
        if !self.check_ability(auth_context, ability) {
            tracing::warn!(
                user_id = %auth_context.user_id,
                role = %auth_context.role,
                ability = %ability,
                "Permission denied"
            );
            metrics::counter!("portal_access_denied_total", "ability" => ability.to_string())
                .increment(1);
            return Err(AppError::Forbidden);
        }

        Ok(())
    }

    pub fn can_access_module(&self, auth_context: &AuthContext, module: &str) -> bool {
        self.table
            .can_access_module(&self.abilities_for(auth_context), module)
    }

    /// 所有已注册模块及其访问结果
    pub fn module_overview(&self, auth_context: &AuthContext) -> Vec<ModuleAccess> {
        let abilities = self.abilities_for(auth_context);

        self.table
            .module_names()
            .map(|module| ModuleAccess {
                module: module.to_string(),
                required: self
                    .table
                    .required_abilities_for_module(module)
                    .into_iter()
                    .collect(),
                accessible: self.table.can_access_module(&abilities, module),
            })
            .collect()
    }

    /// 用户可见的导航树
    pub fn visible_navigation(&self, auth_context: &AuthContext) -> Vec<NavItem> {
        let abilities = self.abilities_for(auth_context);
        visible_navigation(&default_navigation(), &|module| {
            self.table.can_access_module(&abilities, module)
        })
    }

    /// 角色能力表
    pub fn role_table(&self) -> Vec<RoleAbilities> {
        Role::ALL
            .into_iter()
            .map(|role| RoleAbilities {
                role,
                abilities: self.table.abilities_for(role).into_iter().collect(),
            })
            .collect()
    }
}
