//! 分数校验
//!
//! 在成绩进入求和与统计之前拒绝非法输入。

use crate::errors::{GradelyError, Result};

/// 校验单个分数：必须是有限数值，且位于 [0, max_score]
pub fn validate_score(score: f64, max_score: f64) -> Result<()> {
    if !score.is_finite() {
        return Err(GradelyError::invalid_score("score must be a finite number"));
    }
    if score < 0.0 {
        return Err(GradelyError::invalid_score(format!(
            "score {score} must not be negative"
        )));
    }
    if score > max_score {
        return Err(GradelyError::invalid_score(format!(
            "score {score} exceeds maximum {max_score}"
        )));
    }
    Ok(())
}
