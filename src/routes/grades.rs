use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::grades::requests::{BulkGradeRequest, GradeListQuery};
use crate::services::GradeService;
use crate::utils::bulk_json_error_handler;

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn ingest_grades(
    req: HttpRequest,
    payload: web::Json<BulkGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.ingest_grades(&req, payload.into_inner()).await
}

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .service(
                // 批量录入使用固定的 {error} 信封，解析失败也不例外
                web::resource("/bulk")
                    .app_data(web::JsonConfig::default().error_handler(bulk_json_error_handler))
                    .route(web::post().to(ingest_grades)),
            )
            .service(web::resource("").route(web::get().to(list_grades))),
    );
}
