//! 成绩存储操作
//!
//! 批量写入与百分位重算。百分位完全在数据库内计算，
//! 应用层只触发并观察成败。

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::percentile_status;
use crate::errors::{GradebookError, Result};
use crate::models::{
    PaginationInfo,
    grades::{
        entities::GradeType,
        requests::{GradeListQuery, NewGradeRecord},
        responses::GradeListResponse,
    },
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, Statement,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 批量写入成绩行
    ///
    /// 按 (assessment_id, student_id) upsert：重复提交覆盖旧行而不是产生重复。
    /// 同一批次内重复出现的学生只保留最后一条；返回实际写入的行数。
    /// 空集合直接返回 0，不触发数据库交互。
    pub async fn bulk_insert_grades_impl(&self, rows: Vec<NewGradeRecord>) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        // 批次内去重：单条 ON CONFLICT 语句不能两次命中同一行（PostgreSQL），
        // 后出现的条目覆盖先出现的
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut deduped: Vec<NewGradeRecord> = Vec::with_capacity(rows.len());
        for row in rows {
            match positions.get(&row.student_id) {
                Some(&i) => deduped[i] = row,
                None => {
                    positions.insert(row.student_id.clone(), deduped.len());
                    deduped.push(row);
                }
            }
        }

        let now = chrono::Utc::now().timestamp();
        let count = deduped.len();

        let models: Vec<ActiveModel> = deduped
            .into_iter()
            .map(|row| ActiveModel {
                student_id: Set(row.student_id),
                assessment_id: Set(row.assessment_id),
                course_id: Set(None),
                grade_type: Set(GradeType::Assignment.to_string()),
                score: Set(row.score),
                max_score: Set(row.max_score),
                weight: Set(1.0),
                graded_at: Set(now),
                feedback: Set(row.feedback),
                subtopic_performance: Set(row.subtopic_performance),
                percentile: Set(None),
                ..Default::default()
            })
            .collect();

        Grades::insert_many(models)
            .on_conflict(
                OnConflict::columns([Column::AssessmentId, Column::StudentId])
                    .update_columns([
                        Column::Score,
                        Column::MaxScore,
                        Column::GradeType,
                        Column::Weight,
                        Column::GradedAt,
                        Column::Feedback,
                        Column::SubtopicPerformance,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("批量写入成绩失败: {e}")))?;

        Ok(count)
    }

    /// 重算一个测评的百分位
    ///
    /// 以该测评当前的全部成绩为总体（不限于新写入的批次），
    /// 把每行的 percentile 更新为严格低于其得分的比例。
    /// 成功后清除该测评的过期标记。
    pub async fn recompute_percentiles_impl(&self, assessment_id: &str) -> Result<()> {
        let backend = self.db.get_database_backend();

        // 内层用派生表而不是直接引用目标表，兼容 MySQL 的 UPDATE 限制
        let sql = match backend {
            DatabaseBackend::Postgres => {
                r#"UPDATE grades SET percentile = (
                    SELECT 100.0 * SUM(CASE WHEN g2.score < grades.score THEN 1 ELSE 0 END) / COUNT(*)
                    FROM (SELECT score FROM grades WHERE assessment_id = $1) AS g2
                ) WHERE assessment_id = $2"#
            }
            _ => {
                r#"UPDATE grades SET percentile = (
                    SELECT 100.0 * SUM(CASE WHEN g2.score < grades.score THEN 1 ELSE 0 END) / COUNT(*)
                    FROM (SELECT score FROM grades WHERE assessment_id = ?) AS g2
                ) WHERE assessment_id = ?"#
            }
        };

        self.db
            .execute_raw(Statement::from_sql_and_values(
                backend,
                sql,
                [assessment_id.into(), assessment_id.into()],
            ))
            .await
            .map_err(|e| {
                GradebookError::percentile_recompute(format!(
                    "测评 {assessment_id} 百分位重算失败: {e}"
                ))
            })?;

        // 重算成功，清除过期标记（如果有）
        percentile_status::Entity::delete_by_id(assessment_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| {
                GradebookError::database_operation(format!("清除百分位过期标记失败: {e}"))
            })?;

        Ok(())
    }

    /// 标记测评的百分位已过期
    pub async fn mark_percentiles_stale_impl(&self, assessment_id: &str) -> Result<()> {
        let model = percentile_status::ActiveModel {
            assessment_id: Set(assessment_id.to_string()),
            stale_since: Set(chrono::Utc::now().timestamp()),
        };

        percentile_status::Entity::insert(model)
            .on_conflict(
                OnConflict::column(percentile_status::Column::AssessmentId)
                    .update_column(percentile_status::Column::StaleSince)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                GradebookError::database_operation(format!("标记百分位过期失败: {e}"))
            })?;

        Ok(())
    }

    /// 列出成绩（分页）
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Grades::find();

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 测评筛选
        if let Some(assessment_id) = query.assessment_id {
            select = select.filter(Column::AssessmentId.eq(assessment_id));
        }

        // 排序
        select = select.order_by_desc(Column::GradedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade_record()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::entity::grades::{Column, Entity as Grades, Model};
    use crate::entity::percentile_status;
    use crate::models::grades::requests::NewGradeRecord;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ColumnTrait, ConnectOptions, Database, EntityTrait, QueryFilter};

    // 内存库必须限制为单连接，否则每个池连接各自一个空库
    async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.expect("in-memory sqlite");
        Migrator::up(&db, None).await.expect("migrations");
        SeaOrmStorage { db }
    }

    fn row(student_id: &str, score: f64) -> NewGradeRecord {
        NewGradeRecord {
            student_id: student_id.to_string(),
            assessment_id: "A1".to_string(),
            score,
            max_score: 100.0,
            feedback: None,
            subtopic_performance: None,
        }
    }

    async fn fetch_assessment(storage: &SeaOrmStorage, assessment_id: &str) -> Vec<Model> {
        Grades::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .all(&storage.db)
            .await
            .expect("fetch grades")
    }

    #[tokio::test]
    async fn test_resubmission_updates_in_place() {
        let storage = memory_storage().await;

        let first = storage
            .bulk_insert_grades_impl(vec![row("S001", 50.0), row("S002", 70.0)])
            .await
            .expect("first batch");
        assert_eq!(first, 2);

        // 重新提交同一测评的 S001，应覆盖旧行而不是新增
        let second = storage
            .bulk_insert_grades_impl(vec![row("S001", 80.0)])
            .await
            .expect("second batch");
        assert_eq!(second, 1);

        let rows = fetch_assessment(&storage, "A1").await;
        assert_eq!(rows.len(), 2);
        let s001 = rows
            .iter()
            .find(|m| m.student_id == "S001")
            .expect("S001 present");
        assert_eq!(s001.score, 80.0);
    }

    #[tokio::test]
    async fn test_duplicate_student_in_batch_last_entry_wins() {
        let storage = memory_storage().await;

        let written = storage
            .bulk_insert_grades_impl(vec![
                row("S001", 50.0),
                row("S002", 70.0),
                row("S001", 90.0),
            ])
            .await
            .expect("batch with duplicate student");
        assert_eq!(written, 2);

        let rows = fetch_assessment(&storage, "A1").await;
        assert_eq!(rows.len(), 2);
        let s001 = rows
            .iter()
            .find(|m| m.student_id == "S001")
            .expect("S001 present");
        assert_eq!(s001.score, 90.0);
    }

    #[tokio::test]
    async fn test_recompute_percentiles_over_whole_assessment() {
        let storage = memory_storage().await;

        storage
            .bulk_insert_grades_impl(vec![
                row("S001", 10.0),
                row("S002", 20.0),
                row("S003", 30.0),
            ])
            .await
            .expect("batch");

        // 预置一个过期标记，验证重算成功后被清除
        storage
            .mark_percentiles_stale_impl("A1")
            .await
            .expect("mark stale");

        storage
            .recompute_percentiles_impl("A1")
            .await
            .expect("recompute");

        let rows = fetch_assessment(&storage, "A1").await;
        for (student_id, expected) in [("S001", 0.0), ("S002", 100.0 / 3.0), ("S003", 200.0 / 3.0)]
        {
            let percentile = rows
                .iter()
                .find(|m| m.student_id == student_id)
                .expect("row present")
                .percentile
                .expect("percentile computed");
            assert!(
                (percentile - expected).abs() < 0.01,
                "{student_id}: {percentile} != {expected}"
            );
        }

        let marker = percentile_status::Entity::find_by_id("A1".to_string())
            .one(&storage.db)
            .await
            .expect("fetch marker");
        assert!(marker.is_none());
    }
}
