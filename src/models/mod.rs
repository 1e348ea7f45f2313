pub mod attendance;
pub mod common;
pub mod courses;
pub mod grades;
pub mod students;
pub mod teachers;

pub use common::error_code::ErrorCode;
pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 应用启动时间，用于统计启动耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
