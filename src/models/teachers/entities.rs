use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    // 教师ID
    pub id: i64,
    // 工号
    pub teacher_code: String,
    // 名
    pub first_name: String,
    // 姓
    pub last_name: String,
    // 邮箱
    pub email: String,
    // 院系
    pub department: String,
    // 专业方向
    pub specialization: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
