//! 评分引擎
//!
//! 纯函数实现的成绩计算核心：
//! - `total`: 各考核项得分求和（上限 100）
//! - `scale`: 按评分等级表划分字母等级
//! - `stats`: 班级成绩统计
//! - `validate`: 分数与考核项校验
//!
//! 本模块不持有任何状态，也不访问存储，可在任意并发上下文中直接调用。

pub mod scale;
pub mod stats;
pub mod total;
pub mod validate;

pub use scale::{GradeBand, GradingScale};
pub use stats::{BandCount, ClassStatistics, aggregate};
pub use total::{
    AssessmentDefinition, MAX_TOTAL, ScoreBreakdown, ScoreRecord, compute_total,
    compute_total_checked, student_totals,
};
pub use validate::validate_score;

/// 及格线（百分制）
pub const PASSING_THRESHOLD: f64 = 60.0;

/// 是否及格
///
/// 只看总分，与字母等级无关。
pub fn has_passed(total: f64) -> bool {
    total >= PASSING_THRESHOLD
}

/// 保留两位小数（四舍五入，远离零）
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
