//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::students::{Column, Entity as Students};
use crate::errors::{GradebookError, Result};
use crate::models::{
    PaginationInfo,
    students::{entities::Student, requests::StudentListQuery, responses::StudentListResponse},
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出学生（分页）
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Students::find();

        // 院系筛选
        if let Some(department) = query.department {
            select = select.filter(Column::Department.eq(department));
        }

        // 入学年份筛选
        if let Some(year) = query.enrollment_year {
            select = select.filter(Column::EnrollmentYear.eq(year));
        }

        // 关键词搜索：学号、姓名、邮箱
        if let Some(search) = query.search.filter(|s| !s.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(Column::StudentCode.contains(&search))
                    .add(Column::FirstName.contains(&search))
                    .add(Column::LastName.contains(&search))
                    .add(Column::Email.contains(&search)),
            );
        }

        select = select.order_by_asc(Column::StudentCode);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
