use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    // 学生ID
    pub id: i64,
    // 学号（成绩行引用的外部标识）
    pub student_code: String,
    // 名
    pub first_name: String,
    // 姓
    pub last_name: String,
    // 邮箱
    pub email: String,
    // 院系
    pub department: String,
    // 入学年份
    pub enrollment_year: i32,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
