use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩类型
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum GradeType {
    Assignment, // 作业
    Quiz,       // 小测
    Midterm,    // 期中
    Final,      // 期末
}

impl GradeType {
    pub const ASSIGNMENT: &'static str = "assignment";
    pub const QUIZ: &'static str = "quiz";
    pub const MIDTERM: &'static str = "midterm";
    pub const FINAL: &'static str = "final";
}

impl<'de> Deserialize<'de> for GradeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的成绩类型: '{s}'. 支持的类型: assignment, quiz, midterm, final"
            ))
        })
    }
}

impl std::str::FromStr for GradeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GradeType::ASSIGNMENT => Ok(GradeType::Assignment),
            GradeType::QUIZ => Ok(GradeType::Quiz),
            GradeType::MIDTERM => Ok(GradeType::Midterm),
            GradeType::FINAL => Ok(GradeType::Final),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for GradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GradeType::Assignment => Self::ASSIGNMENT,
            GradeType::Quiz => Self::QUIZ,
            GradeType::Midterm => Self::MIDTERM,
            GradeType::Final => Self::FINAL,
        };
        write!(f, "{s}")
    }
}

// 成绩记录
//
// score 只有相对于 max_score 才有意义；weight 表示对课程总评的贡献，
// 录入路径不做校验。percentile 由存储端重算，应用层只读。
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeRecord {
    // 成绩ID
    pub id: i64,
    // 学号（外部标识）
    pub student_id: String,
    // 测评标识
    pub assessment_id: String,
    // 课程ID（可选）
    pub course_id: Option<i64>,
    // 成绩类型
    pub grade_type: GradeType,
    // 得分
    pub score: f64,
    // 满分
    pub max_score: f64,
    // 权重
    pub weight: f64,
    // 评分时间
    pub graded_at: chrono::DateTime<chrono::Utc>,
    // 评语
    pub feedback: Option<String>,
    // 子知识点表现（不透明 JSON）
    pub subtopic_performance: Option<serde_json::Value>,
    // 百分位（存储端计算）
    pub percentile: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_type_roundtrip() {
        for s in ["assignment", "quiz", "midterm", "final"] {
            let t: GradeType = s.parse().expect("known grade type");
            assert_eq!(t.to_string(), s);
        }
    }

    #[test]
    fn test_grade_type_rejects_unknown() {
        assert!("project".parse::<GradeType>().is_err());
        let parsed: Result<GradeType, _> = serde_json::from_str("\"project\"");
        assert!(parsed.is_err());
    }
}
