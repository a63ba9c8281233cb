//! 列表查询参数
//! 未设置的字段不会出现在查询串中

use crate::models::Stage;
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct OpportunityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// 空白搜索词视为未设置
pub(crate) fn normalize_search(search: &mut Option<String>) {
    if search.as_deref().is_some_and(|s| s.trim().is_empty()) {
        *search = None;
    } else if let Some(s) = search {
        *s = s.trim().to_string();
    }
}

impl ProductQuery {
    pub(crate) fn normalized(&self) -> Self {
        let mut query = self.clone();
        normalize_search(&mut query.search);
        query
    }
}

impl OpportunityQuery {
    pub(crate) fn normalized(&self) -> Self {
        let mut query = self.clone();
        normalize_search(&mut query.search);
        query
    }
}
