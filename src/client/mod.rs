//! REST API 客户端
//! 每次调用独立发出，不重试；失败由调用方转为提示消息

mod error;
mod query;

pub use error::ClientError;
pub use query::{OpportunityQuery, ProductQuery};

use crate::access::{AbilityGrant, AbilitySource};
use crate::config::ClientConfig;
use crate::models::{AddToCartRequest, Cart, Opportunity, Page, Product};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<Secret<String>>,
}

impl ApiClient {
    /// 创建新的客户端
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    /// 替换 Bearer 令牌
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Secret::new(token.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 当前用户的能力列表
    pub async fn fetch_abilities(&self) -> Result<AbilityGrant, ClientError> {
        self.send(self.request(Method::GET, "/api/user/abilities")).await
    }

    /// 商城商品列表
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>, ClientError> {
        query
            .validate()
            .map_err(|e| ClientError::InvalidQuery(e.to_string()))?;

        let req = self
            .request(Method::GET, "/api/public/shop/products")
            .query(&query.normalized());
        self.send(req).await
    }

    /// 商机列表
    pub async fn list_opportunities(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Page<Opportunity>, ClientError> {
        query
            .validate()
            .map_err(|e| ClientError::InvalidQuery(e.to_string()))?;

        let req = self
            .request(Method::GET, "/api/opportunities")
            .query(&query.normalized());
        self.send(req).await
    }

    /// 加入购物车，返回服务端的最新购物车
    pub async fn add_to_cart(&self, product_id: Uuid, quantity: u32) -> Result<Cart, ClientError> {
        if quantity == 0 {
            return Err(ClientError::InvalidQuery("quantity must be at least 1".to_string()));
        }

        let req = self
            .request(Method::POST, "/api/public/shop/cart")
            .json(&AddToCartRequest {
                product_id,
                quantity,
            });
        self.send(req).await
    }

    /// 当前购物车
    pub async fn get_cart(&self) -> Result<Cart, ClientError> {
        self.send(self.request(Method::GET, "/api/public/shop/cart")).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(url = %response.url(), "Request unauthenticated");
            return Err(ClientError::Unauthenticated);
        }

        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_response_body(status, &body);
            tracing::warn!(url = %url, status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AbilitySource for ApiClient {
    async fn fetch_abilities(&self) -> Result<AbilityGrant, ClientError> {
        ApiClient::fetch_abilities(self).await
    }
}
