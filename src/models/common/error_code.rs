// 业务错误码
//
// 前两位大致对应 HTTP 状态，后三位区分具体业务场景。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,

    NotFound = 40400,
    StudentNotFound = 40401,
    TeacherNotFound = 40402,
    CourseNotFound = 40403,

    InternalServerError = 50000,
}
