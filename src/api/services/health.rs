use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace};

use crate::services::AbbreviationService;

use super::helpers::json_response;
use super::types::HealthResponse;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

/// Health Service
///
/// 只做一次 COUNT，超时 5 秒视为不健康。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<Arc<AbbreviationService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let entries = match tokio::time::timeout(Duration::from_secs(5), service.count()).await {
            Ok(Ok(count)) => Some(count),
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                None
            }
            Err(_) => {
                error!("Storage health check timeout");
                None
            }
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let is_healthy = entries.is_some();

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}s",
            start_time.elapsed(),
            if is_healthy { "healthy" } else { "unhealthy" },
            uptime_seconds
        );

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        json_response(
            status,
            &HealthResponse {
                success: is_healthy,
                status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
                entries,
                uptime_seconds,
                timestamp: now,
            },
        )
    }

    // 活跃性检查，不访问存储
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
