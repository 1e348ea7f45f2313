//! 考勤实体

use sea_orm::entity::prelude::*;

use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub date: i64,
    pub status: String,
    pub duration_minutes: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance_record(self) -> AttendanceRecord {
        AttendanceRecord {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            date: chrono::DateTime::from_timestamp(self.date, 0).unwrap_or_default(),
            status: self
                .status
                .parse()
                .unwrap_or(AttendanceStatus::Absent),
            duration_minutes: self.duration_minutes,
            notes: self.notes,
        }
    }
}
