use serde::Deserialize;
use ts_rs::TS;

// 学生列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department: Option<String>,
    pub enrollment_year: Option<i32>,
    pub search: Option<String>,
}
