//! 班级成绩统计

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{GradingScale, has_passed, round2};

/// 单个等级的人数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct BandCount {
    pub label: String,
    pub count: i64,
}

/// 班级统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ClassStatistics {
    pub student_count: i64,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    pub pass_rate: f64,
    pub passed_count: i64,
    pub failed_count: i64,
    /// 按等级表顺序列出，包含人数为 0 的等级
    pub distribution: Vec<BandCount>,
}

/// 汇总一组学生总分
///
/// 空输入返回全 0 的统计结果，分布中仍列出每个等级。
pub fn aggregate(totals: &[f64], scale: &GradingScale) -> ClassStatistics {
    let mut distribution: Vec<BandCount> = scale
        .labels()
        .map(|label| BandCount {
            label: label.to_string(),
            count: 0,
        })
        .collect();

    if totals.is_empty() {
        return ClassStatistics {
            student_count: 0,
            average: 0.0,
            highest: 0.0,
            lowest: 0.0,
            pass_rate: 0.0,
            passed_count: 0,
            failed_count: 0,
            distribution,
        };
    }

    for &total in totals {
        distribution[scale.classify_index(total)].count += 1;
    }

    let count = totals.len() as f64;
    let sum: f64 = totals.iter().sum();
    let highest = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let passed_count = totals.iter().filter(|&&t| has_passed(t)).count() as i64;
    let failed_count = totals.len() as i64 - passed_count;

    ClassStatistics {
        student_count: totals.len() as i64,
        average: round2(sum / count),
        highest,
        lowest,
        pass_rate: round2(passed_count as f64 / count * 100.0),
        passed_count,
        failed_count,
        distribution,
    }
}
