use std::sync::Arc;

use crate::models::{
    attendance::{requests::AttendanceListQuery, responses::AttendanceListResponse},
    courses::{entities::Course, requests::CourseListQuery, responses::CourseListResponse},
    grades::{
        requests::{GradeListQuery, NewGradeRecord},
        responses::GradeListResponse,
    },
    students::{entities::Student, requests::StudentListQuery, responses::StudentListResponse},
    teachers::{entities::Teacher, requests::TeacherListQuery, responses::TeacherListResponse},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生查询方法
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;

    /// 教师查询方法
    // 通过ID获取教师信息
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 列出教师
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;

    /// 课程查询方法
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;

    /// 考勤查询方法
    // 列出考勤记录
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;

    /// 成绩方法
    // 批量写入一个测评的成绩行（按 (assessment_id, student_id) upsert），
    // 返回写入的行数；空集合不触发数据库交互
    async fn bulk_insert_grades(&self, rows: Vec<NewGradeRecord>) -> Result<usize>;
    // 在存储端对整个测评的成绩群体重算百分位，成功时清除过期标记
    async fn recompute_percentiles(&self, assessment_id: &str) -> Result<()>;
    // 重算失败后标记该测评的百分位已过期，等待对账
    async fn mark_percentiles_stale(&self, assessment_id: &str) -> Result<()>;
    // 列出成绩
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
