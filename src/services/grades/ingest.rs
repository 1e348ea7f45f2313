//! 批量成绩录入
//!
//! POST /api/v1/grades/bulk
//!
//! 两个严格先后的副作用：先批量写入成绩行，成功后再触发存储端
//! 百分位重算。两步之间没有应用层事务；写入失败时不会尝试重算，
//! 重算失败时成绩行已提交，只标记该测评百分位过期，等待对账。
//! 任何失败都统一为 400 + `{"error": ...}` 信封。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::GradeService;
use crate::config::AppConfig;
use crate::models::grades::requests::{BulkGradeRequest, NewGradeRecord};
use crate::models::grades::responses::{BulkGradeError, BulkGradeResponse};

pub async fn ingest_grades(
    service: &GradeService,
    request: &HttpRequest,
    payload: BulkGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let default_max_score = AppConfig::get().grading.default_max_score;

    let assessment_id = payload.assessment_id;

    // 展开为待持久化行：满分取配置默认值（调用方无法覆盖），
    // 可选字段缺省落库为 NULL
    let rows: Vec<NewGradeRecord> = payload
        .grades
        .into_iter()
        .map(|entry| NewGradeRecord {
            student_id: entry.student_id,
            assessment_id: assessment_id.clone(),
            score: entry.score,
            max_score: default_max_score,
            feedback: entry.feedback,
            subtopic_performance: entry.subtopic_performance,
        })
        .collect();

    // 第一步：批量写入。失败则短路，百分位保持批次前的状态。
    let inserted = match storage.bulk_insert_grades(rows).await {
        Ok(count) => count,
        Err(e) => {
            error!("测评 {} 批量写入成绩失败: {}", assessment_id, e);
            return Ok(HttpResponse::BadRequest().json(BulkGradeError {
                error: e.to_string(),
            }));
        }
    };

    // 第二步：对该测评的全部成绩（不只是本批次）重算百分位。
    // 此时成绩行已提交，失败只标记过期，不做补偿回滚。
    if let Err(e) = storage.recompute_percentiles(&assessment_id).await {
        error!("测评 {} 百分位重算失败: {}", assessment_id, e);
        if let Err(mark_err) = storage.mark_percentiles_stale(&assessment_id).await {
            warn!("测评 {} 标记百分位过期失败: {}", assessment_id, mark_err);
        }
        return Ok(HttpResponse::BadRequest().json(BulkGradeError {
            error: e.to_string(),
        }));
    }

    Ok(HttpResponse::Ok().json(BulkGradeResponse {
        success: true,
        grades_inserted: inserted,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use actix_web::http::Method;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::errors::{GradebookError, Result};
    use crate::middlewares::build_cors;
    use crate::models::attendance::{
        requests::AttendanceListQuery, responses::AttendanceListResponse,
    };
    use crate::models::courses::{
        entities::Course, requests::CourseListQuery, responses::CourseListResponse,
    };
    use crate::models::grades::requests::{GradeListQuery, NewGradeRecord};
    use crate::models::grades::responses::GradeListResponse;
    use crate::models::students::{
        entities::Student, requests::StudentListQuery, responses::StudentListResponse,
    };
    use crate::models::teachers::{
        entities::Teacher, requests::TeacherListQuery, responses::TeacherListResponse,
    };
    use crate::storage::Storage;

    #[derive(Default)]
    struct MockStorage {
        rows: Mutex<Vec<NewGradeRecord>>,
        recompute_called: AtomicBool,
        stale_marked: AtomicBool,
        fail_insert: bool,
        fail_recompute: bool,
    }

    #[async_trait::async_trait]
    impl Storage for MockStorage {
        async fn get_student_by_id(&self, _id: i64) -> Result<Option<Student>> {
            unimplemented!("not used by ingest tests")
        }

        async fn list_students_with_pagination(
            &self,
            _query: StudentListQuery,
        ) -> Result<StudentListResponse> {
            unimplemented!("not used by ingest tests")
        }

        async fn get_teacher_by_id(&self, _id: i64) -> Result<Option<Teacher>> {
            unimplemented!("not used by ingest tests")
        }

        async fn list_teachers_with_pagination(
            &self,
            _query: TeacherListQuery,
        ) -> Result<TeacherListResponse> {
            unimplemented!("not used by ingest tests")
        }

        async fn get_course_by_id(&self, _id: i64) -> Result<Option<Course>> {
            unimplemented!("not used by ingest tests")
        }

        async fn list_courses_with_pagination(
            &self,
            _query: CourseListQuery,
        ) -> Result<CourseListResponse> {
            unimplemented!("not used by ingest tests")
        }

        async fn list_attendance_with_pagination(
            &self,
            _query: AttendanceListQuery,
        ) -> Result<AttendanceListResponse> {
            unimplemented!("not used by ingest tests")
        }

        async fn bulk_insert_grades(&self, rows: Vec<NewGradeRecord>) -> Result<usize> {
            if self.fail_insert {
                return Err(GradebookError::database_operation("insert rejected"));
            }
            let count = rows.len();
            self.rows.lock().expect("mock lock").extend(rows);
            Ok(count)
        }

        async fn recompute_percentiles(&self, _assessment_id: &str) -> Result<()> {
            self.recompute_called.store(true, Ordering::SeqCst);
            if self.fail_recompute {
                return Err(GradebookError::percentile_recompute("recompute rejected"));
            }
            Ok(())
        }

        async fn mark_percentiles_stale(&self, _assessment_id: &str) -> Result<()> {
            self.stale_marked.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn list_grades_with_pagination(
            &self,
            _query: GradeListQuery,
        ) -> Result<GradeListResponse> {
            unimplemented!("not used by ingest tests")
        }
    }

    async fn post_bulk(mock: Arc<MockStorage>, body: Value) -> (u16, Value) {
        let storage: Arc<dyn Storage> = mock;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(crate::routes::configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/grades/bulk")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let bytes = test::read_body(resp).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_web::test]
    async fn test_empty_batch_succeeds_and_still_recomputes() {
        let mock = Arc::new(MockStorage::default());
        let (status, body) =
            post_bulk(mock.clone(), json!({"assessment_id": "A1", "grades": []})).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["grades_inserted"], 0);
        // 空批次也要触发重算：写入步骤平凡成功
        assert!(mock.recompute_called.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_max_score_always_comes_from_config_default() {
        let mock = Arc::new(MockStorage::default());
        // 调用方试图传入 max_score，必须被忽略
        let (status, body) = post_bulk(
            mock.clone(),
            json!({
                "assessment_id": "A1",
                "grades": [
                    {"student_id": "S001", "score": 42.0, "max_score": 50},
                    {"student_id": "S002", "score": 88.0}
                ]
            }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["grades_inserted"], 2);
        let rows = mock.rows.lock().expect("mock lock");
        assert_eq!(rows.len(), 2);
        for row in rows.iter() {
            assert_eq!(row.max_score, 100.0);
        }
    }

    #[actix_web::test]
    async fn test_optional_fields_persist_as_absent() {
        let mock = Arc::new(MockStorage::default());
        let (status, _) = post_bulk(
            mock.clone(),
            json!({
                "assessment_id": "A1",
                "grades": [{"student_id": "S001", "score": 60.0}]
            }),
        )
        .await;

        assert_eq!(status, 200);
        let rows = mock.rows.lock().expect("mock lock");
        assert!(rows[0].feedback.is_none());
        assert!(rows[0].subtopic_performance.is_none());
    }

    #[actix_web::test]
    async fn test_insert_failure_skips_recompute() {
        let mock = Arc::new(MockStorage {
            fail_insert: true,
            ..Default::default()
        });
        let (status, body) = post_bulk(
            mock.clone(),
            json!({
                "assessment_id": "A1",
                "grades": [{"student_id": "S001", "score": 60.0}]
            }),
        )
        .await;

        assert_eq!(status, 400);
        assert!(body["error"].as_str().expect("error message").contains("insert rejected"));
        assert!(!mock.recompute_called.load(Ordering::SeqCst));
        assert!(!mock.stale_marked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_recompute_failure_keeps_rows_and_marks_stale() {
        let mock = Arc::new(MockStorage {
            fail_recompute: true,
            ..Default::default()
        });
        let (status, body) = post_bulk(
            mock.clone(),
            json!({
                "assessment_id": "A1",
                "grades": [{"student_id": "S001", "score": 60.0}]
            }),
        )
        .await;

        // 响应仍是错误信封，但成绩行已提交，没有补偿回滚
        assert_eq!(status, 400);
        assert!(body["error"].as_str().expect("error message").contains("recompute rejected"));
        assert_eq!(mock.rows.lock().expect("mock lock").len(), 1);
        assert!(mock.stale_marked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_malformed_body_never_touches_storage() {
        let mock = Arc::new(MockStorage::default());
        // grades 字段整体缺失
        let (status, body) = post_bulk(mock.clone(), json!({"assessment_id": "A1"})).await;

        assert_eq!(status, 400);
        assert!(body["error"].is_string());
        assert!(mock.rows.lock().expect("mock lock").is_empty());
        assert!(!mock.recompute_called.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_cors_preflight_answers_without_body_processing() {
        let mock = Arc::new(MockStorage::default());
        let storage: Arc<dyn Storage> = mock.clone();
        let config = crate::config::AppConfig::get();

        let app = test::init_service(
            App::new()
                .wrap(build_cors(&config.cors))
                .app_data(web::Data::new(storage))
                .configure(crate::routes::configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/grades/bulk")
            .insert_header(("Origin", "https://example.edu"))
            .insert_header(("Access-Control-Request-Method", "POST"))
            .insert_header(("Access-Control-Request-Headers", "authorization,apikey"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let allow_headers = resp
            .headers()
            .get("access-control-allow-headers")
            .expect("allow-headers present")
            .to_str()
            .expect("ascii header")
            .to_lowercase();
        assert!(allow_headers.contains("authorization"));
        assert!(allow_headers.contains("apikey"));
        // 预检不会触碰存储
        assert!(mock.rows.lock().expect("mock lock").is_empty());
        assert!(!mock.recompute_called.load(Ordering::SeqCst));
    }
}
