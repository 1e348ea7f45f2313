use serde::Deserialize;
use ts_rs::TS;

// 课程列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department: Option<String>,
    pub teacher_id: Option<i64>,
    pub semester: Option<i32>,
    pub year: Option<i32>,
    pub search: Option<String>,
}
