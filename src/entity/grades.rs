//! 成绩实体
//!
//! student_id 与 assessment_id 是外部系统分配的不透明字符串标识，
//! (assessment_id, student_id) 上有唯一索引，批量录入按该键 upsert。

use sea_orm::entity::prelude::*;

use crate::models::grades::entities::{GradeRecord, GradeType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: String,
    pub assessment_id: String,
    #[sea_orm(nullable)]
    pub course_id: Option<i64>,
    pub grade_type: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub graded_at: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub subtopic_performance: Option<Json>,
    #[sea_orm(nullable)]
    pub percentile: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_record(self) -> GradeRecord {
        GradeRecord {
            id: self.id,
            student_id: self.student_id,
            assessment_id: self.assessment_id,
            course_id: self.course_id,
            grade_type: self.grade_type.parse().unwrap_or(GradeType::Assignment),
            score: self.score,
            max_score: self.max_score,
            weight: self.weight,
            graded_at: chrono::DateTime::from_timestamp(self.graded_at, 0).unwrap_or_default(),
            feedback: self.feedback,
            subtopic_performance: self.subtopic_performance,
            percentile: self.percentile,
        }
    }
}
