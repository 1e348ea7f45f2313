use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程代码
    pub course_code: String,
    // 课程名称
    pub name: String,
    // 开课院系
    pub department: String,
    // 学分
    pub credits: i32,
    // 授课教师ID
    pub teacher_id: i64,
    // 学期
    pub semester: i32,
    // 学年
    pub year: i32,
}
