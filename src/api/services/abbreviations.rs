//! `/abbreviations` 处理器

use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::{AbbreviationService, HOT_LIMIT, PageRequest, RECENT_LIMIT};

use super::helpers::{api_result, error_from_abbr, json_response, ok_response};
use super::types::{
    AbbreviationQuery, IdQuery, ListMode, NewAbbreviation, PageResponse, ResolveResponse,
    UpdateAbbreviation,
};

/// GET /abbreviations
///
/// 按 q → type=hot → page → 默认列表 的优先级分派。
pub async fn list_abbreviations(
    query: web::Query<AbbreviationQuery>,
    service: web::Data<Arc<AbbreviationService>>,
) -> impl Responder {
    trace!("GET /abbreviations {:?}", query);

    match query.mode() {
        ListMode::Resolve(q) => match service.resolve(q).await {
            Ok(resolution) => {
                trace!(
                    "resolved {} matches, {} unmatched",
                    resolution.matches.len(),
                    resolution.unmatched.len()
                );
                json_response(
                    actix_web::http::StatusCode::OK,
                    &ResolveResponse {
                        success: true,
                        found_results: resolution.matches,
                        not_found_keywords: resolution.unmatched,
                    },
                )
            }
            Err(e) => error_from_abbr(&e),
        },
        ListMode::Hot => api_result(service.hot(HOT_LIMIT).await),
        ListMode::Page => {
            let req = PageRequest {
                page: query.page,
                page_size: query.page_size,
                search: query.admin_search.clone(),
            };
            match service.page(req).await {
                Ok(page) => json_response(
                    actix_web::http::StatusCode::OK,
                    &PageResponse {
                        success: true,
                        data: page.items,
                        total: page.total,
                    },
                ),
                Err(e) => error_from_abbr(&e),
            }
        }
        ListMode::Recent => api_result(service.recent(RECENT_LIMIT).await),
    }
}

/// POST /abbreviations
pub async fn create_abbreviation(
    body: web::Json<NewAbbreviation>,
    service: web::Data<Arc<AbbreviationService>>,
) -> impl Responder {
    api_result(service.add(&body.abbreviation, &body.full_name).await)
}

/// PUT /abbreviations
pub async fn update_abbreviation(
    body: web::Json<UpdateAbbreviation>,
    service: web::Data<Arc<AbbreviationService>>,
) -> impl Responder {
    api_result(
        service
            .update(&body.id, &body.abbreviation, &body.full_name)
            .await,
    )
}

/// DELETE /abbreviations?id=
pub async fn delete_abbreviation(
    query: web::Query<IdQuery>,
    service: web::Data<Arc<AbbreviationService>>,
) -> HttpResponse {
    match service.delete(&query.id).await {
        Ok(()) => ok_response(),
        Err(e) => error_from_abbr(&e),
    }
}

/// PUT /abbreviations/increment-copy?id=
pub async fn increment_copy(
    query: web::Query<IdQuery>,
    service: web::Data<Arc<AbbreviationService>>,
) -> HttpResponse {
    match service.increment_copy(&query.id).await {
        Ok(()) => {
            info!("copy count incremented for {}", query.id.trim());
            ok_response()
        }
        Err(e) => error_from_abbr(&e),
    }
}

/// 词条路由 `/abbreviations`
///
/// 包含：
/// - GET /abbreviations - 解析 / 热门 / 分页 / 最新
/// - POST /abbreviations - 新增
/// - PUT /abbreviations - 更新（管理）
/// - DELETE /abbreviations?id= - 删除（管理）
/// - PUT /abbreviations/increment-copy?id= - 复制计数
///
/// 管理鉴权由调用方通过 `.wrap(AdminAuth)` 挂载。
pub fn abbreviation_routes() -> actix_web::Scope {
    web::scope("/abbreviations")
        .route("/increment-copy", web::put().to(increment_copy))
        .route("", web::get().to(list_abbreviations))
        .route("", web::post().to(create_abbreviation))
        .route("", web::put().to(update_abbreviation))
        .route("", web::delete().to(delete_abbreviation))
}
