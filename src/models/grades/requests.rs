use serde::Deserialize;
use ts_rs::TS;

// 批量录入成绩请求
//
// assessment_id 与 grades 均为必填；grades 允许为空数组。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeRequest {
    pub assessment_id: String,
    pub grades: Vec<BulkGradeEntry>,
}

// 批量录入中的单个学生条目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeEntry {
    pub student_id: String,
    pub score: f64,
    pub feedback: Option<String>,
    pub subtopic_performance: Option<serde_json::Value>,
}

// 成绩列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<String>,
    pub assessment_id: Option<String>,
}

// 展开后的待持久化成绩行（服务层 → 存储层）
#[derive(Debug, Clone, PartialEq)]
pub struct NewGradeRecord {
    pub student_id: String,
    pub assessment_id: String,
    pub score: f64,
    pub max_score: f64,
    pub feedback: Option<String>,
    pub subtopic_performance: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_none() {
        let entry: BulkGradeEntry =
            serde_json::from_str(r#"{"student_id": "S001", "score": 87.5}"#).expect("valid entry");
        assert_eq!(entry.student_id, "S001");
        assert_eq!(entry.score, 87.5);
        assert!(entry.feedback.is_none());
        assert!(entry.subtopic_performance.is_none());
    }

    #[test]
    fn test_empty_grades_array_is_valid() {
        let req: BulkGradeRequest =
            serde_json::from_str(r#"{"assessment_id": "A1", "grades": []}"#).expect("valid");
        assert_eq!(req.assessment_id, "A1");
        assert!(req.grades.is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        // grades 缺失
        let missing_grades: Result<BulkGradeRequest, _> =
            serde_json::from_str(r#"{"assessment_id": "A1"}"#);
        assert!(missing_grades.is_err());

        // assessment_id 缺失
        let missing_assessment: Result<BulkGradeRequest, _> =
            serde_json::from_str(r#"{"grades": []}"#);
        assert!(missing_assessment.is_err());

        // 条目缺 score
        let missing_score: Result<BulkGradeEntry, _> =
            serde_json::from_str(r#"{"student_id": "S001"}"#);
        assert!(missing_score.is_err());
    }

    #[test]
    fn test_subtopic_performance_is_opaque() {
        let entry: BulkGradeEntry = serde_json::from_str(
            r#"{"student_id": "S001", "score": 60, "subtopic_performance": {"algebra": 0.4, "geometry": [1, 2]}}"#,
        )
        .expect("valid entry");
        let payload = entry.subtopic_performance.expect("payload kept");
        assert_eq!(payload["algebra"], 0.4);
    }
}
