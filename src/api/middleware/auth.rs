use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{info, trace};

use crate::api::services::helpers::error_from_abbr;
use crate::api::services::types::{AbbreviationQuery, ListMode};
use crate::config::get_config;
use crate::errors::AbbrError;

/// 管理操作鉴权中间件
///
/// token 为空时所有操作放行；否则分页列表、PUT 更新和 DELETE 需要
/// `Authorization: Bearer <token>`。
#[derive(Clone)]
pub struct AdminAuth {
    token: Arc<str>,
}

impl AdminAuth {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            token: Arc::from(token.as_ref()),
        }
    }

    pub fn from_config() -> Self {
        Self::new(&get_config().api.admin_token)
    }

    pub fn is_enabled(&self) -> bool {
        !self.token.is_empty()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            token: self.token.clone(),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    token: Arc<str>,
}

impl<S> AdminAuthMiddleware<S> {
    /// 是否为管理操作
    fn requires_admin(req: &ServiceRequest) -> bool {
        match *req.method() {
            Method::DELETE => true,
            Method::PUT => !req.path().trim_end_matches('/').ends_with("/increment-copy"),
            // 参数解析失败交给处理器返回 400
            Method::GET => web::Query::<AbbreviationQuery>::from_query(req.query_string())
                .map(|q| q.mode() == ListMode::Page)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
    }

    /// 常量时间比较
    fn constant_time_compare(a: &str, b: &str) -> bool {
        a.as_bytes().ct_eq(b.as_bytes()).into()
    }

    fn handle_unauthorized<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!(
            "Admin authentication failed for {} {}",
            req.method(),
            req.path()
        );
        let response = error_from_abbr(&AbbrError::unauthorized("Unauthorized"));
        req.into_response(response.map_into_right_body())
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let token = self.token.clone();

        Box::pin(async move {
            if token.is_empty() || !Self::requires_admin(&req) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let authorized = Self::extract_bearer_token(&req)
                .is_some_and(|provided| Self::constant_time_compare(provided, &token));

            if !authorized {
                return Ok(Self::handle_unauthorized(req));
            }

            trace!("Admin authentication successful via Bearer token");
            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(AdminAuthMiddleware::<()>::constant_time_compare("secret", "secret"));
        assert!(!AdminAuthMiddleware::<()>::constant_time_compare("secret", "secreT"));
        assert!(!AdminAuthMiddleware::<()>::constant_time_compare("secret", "secret2"));
    }

    #[test]
    fn test_is_enabled() {
        assert!(!AdminAuth::new("").is_enabled());
        assert!(AdminAuth::new("t").is_enabled());
    }
}
