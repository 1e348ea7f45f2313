use super::entities::GradeRecord;
use crate::models::common::pagination::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 批量录入成功响应
//
// 线上前端依赖这个精确形状（success + grades_inserted），
// 不走统一的 ApiResponse 信封。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeResponse {
    pub success: bool,
    pub grades_inserted: usize,
}

// 批量录入失败响应，所有失败类别统一为一条消息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeError {
    pub error: String,
}

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<GradeRecord>,
}
