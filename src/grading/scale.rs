//! 评分等级表

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use super::MAX_TOTAL;
use crate::errors::{GradelyError, Result};

/// 内置默认等级表：(等级, 最低分, 最高分, 绩点)
const DEFAULT_BANDS: [(&str, f64, f64, f64); 12] = [
    ("A", 90.0, 100.0, 4.0),
    ("A-", 87.0, 89.0, 3.7),
    ("B+", 84.0, 86.0, 3.3),
    ("B", 80.0, 83.0, 3.0),
    ("B-", 77.0, 79.0, 2.7),
    ("C+", 74.0, 76.0, 2.3),
    ("C", 70.0, 73.0, 2.0),
    ("C-", 67.0, 69.0, 1.7),
    ("D+", 64.0, 66.0, 1.3),
    ("D", 62.0, 63.0, 1.0),
    ("D-", 60.0, 61.0, 0.7),
    ("F", 0.0, 59.0, 0.0),
];

/// 等级区间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradeBand {
    pub label: String,
    pub min_score: f64,
    pub max_score: f64,
    pub grade_point: f64,
}

impl GradeBand {
    pub fn new(label: impl Into<String>, min_score: f64, max_score: f64, grade_point: f64) -> Self {
        Self {
            label: label.into(),
            min_score,
            max_score,
            grade_point,
        }
    }

    /// 总分是否落在闭区间 [min_score, max_score] 内
    pub fn contains(&self, total: f64) -> bool {
        self.min_score <= total && total <= self.max_score
    }
}

/// 经过校验的等级表
///
/// 区间按最低分从高到低排列，覆盖 [0, 100] 且互不重叠。
#[derive(Debug, Clone, PartialEq)]
pub struct GradingScale {
    bands: Vec<GradeBand>,
}

impl GradingScale {
    /// 校验并构建等级表
    pub fn new(mut bands: Vec<GradeBand>) -> Result<Self> {
        if bands.is_empty() {
            return Err(GradelyError::invalid_grading_scale(
                "grading scale must contain at least one band",
            ));
        }

        let mut labels = HashSet::new();
        for band in &bands {
            if band.label.trim().is_empty() {
                return Err(GradelyError::invalid_grading_scale(
                    "band label must not be empty",
                ));
            }
            if !labels.insert(band.label.as_str()) {
                return Err(GradelyError::invalid_grading_scale(format!(
                    "duplicate band label '{}'",
                    band.label
                )));
            }
            if !band.min_score.is_finite() || !band.max_score.is_finite() {
                return Err(GradelyError::invalid_grading_scale(format!(
                    "band '{}' has a non-numeric bound",
                    band.label
                )));
            }
            if band.min_score > band.max_score {
                return Err(GradelyError::invalid_grading_scale(format!(
                    "band '{}' has min_score {} above max_score {}",
                    band.label, band.min_score, band.max_score
                )));
            }
        }

        // 升序检查相邻区间
        bands.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));

        let lowest = &bands[0];
        if lowest.min_score != 0.0 {
            return Err(GradelyError::invalid_grading_scale(format!(
                "lowest band '{}' must start at 0, starts at {}",
                lowest.label, lowest.min_score
            )));
        }
        let highest = &bands[bands.len() - 1];
        if highest.max_score != MAX_TOTAL {
            return Err(GradelyError::invalid_grading_scale(format!(
                "highest band '{}' must end at {}, ends at {}",
                highest.label, MAX_TOTAL, highest.max_score
            )));
        }

        for pair in bands.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.min_score <= lower.max_score {
                return Err(GradelyError::invalid_grading_scale(format!(
                    "bands '{}' and '{}' overlap",
                    lower.label, upper.label
                )));
            }
            // 两区间之间不得夹有整数总分
            if upper.min_score > lower.max_score.floor() + 1.0 {
                return Err(GradelyError::invalid_grading_scale(format!(
                    "gap between bands '{}' and '{}'",
                    lower.label, upper.label
                )));
            }
        }

        bands.reverse();
        Ok(Self { bands })
    }

    /// 内置默认等级表
    pub fn default_scale() -> Self {
        let bands = DEFAULT_BANDS
            .iter()
            .map(|&(label, min, max, point)| GradeBand::new(label, min, max, point))
            .collect();
        Self { bands }
    }

    /// 未配置等级表时回退到默认表
    pub fn resolve(configured: Vec<GradeBand>) -> Result<Self> {
        if configured.is_empty() {
            Ok(Self::default_scale())
        } else {
            Self::new(configured)
        }
    }

    /// 按从高到低的顺序返回所有区间
    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bands.iter().map(|b| b.label.as_str())
    }

    /// 返回总分对应区间在 `bands()` 中的下标
    ///
    /// 对任意输入都有结果：先找精确包含该分数的区间；
    /// 否则取最低分不超过该分数的最高区间（超过 100 即为最高档）；
    /// 负数或 NaN 落到最低档。
    pub fn classify_index(&self, total: f64) -> usize {
        if let Some(idx) = self.bands.iter().position(|b| b.contains(total)) {
            return idx;
        }
        self.bands
            .iter()
            .position(|b| total >= b.min_score)
            .unwrap_or(self.bands.len() - 1)
    }

    pub fn classify(&self, total: f64) -> &GradeBand {
        &self.bands[self.classify_index(total)]
    }

    pub fn classify_label(&self, total: f64) -> &str {
        &self.classify(total).label
    }
}

impl Default for GradingScale {
    fn default() -> Self {
        Self::default_scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_bands() -> Vec<GradeBand> {
        GradingScale::default_scale().bands().to_vec()
    }

    #[test]
    fn test_default_scale_table() {
        let scale = GradingScale::default_scale();
        let rows: Vec<(&str, f64, f64)> = scale
            .bands()
            .iter()
            .map(|b| (b.label.as_str(), b.min_score, b.max_score))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A", 90.0, 100.0),
                ("A-", 87.0, 89.0),
                ("B+", 84.0, 86.0),
                ("B", 80.0, 83.0),
                ("B-", 77.0, 79.0),
                ("C+", 74.0, 76.0),
                ("C", 70.0, 73.0),
                ("C-", 67.0, 69.0),
                ("D+", 64.0, 66.0),
                ("D", 62.0, 63.0),
                ("D-", 60.0, 61.0),
                ("F", 0.0, 59.0),
            ]
        );
    }

    #[test]
    fn test_default_scale_passes_validation() {
        let validated = GradingScale::new(default_bands()).unwrap();
        assert_eq!(validated, GradingScale::default_scale());
    }

    #[test]
    fn test_every_integer_total_matches_exactly_one_band() {
        let scale = GradingScale::default_scale();
        for total in 0..=100 {
            let matches = scale
                .bands()
                .iter()
                .filter(|b| b.contains(total as f64))
                .count();
            assert_eq!(matches, 1, "total {total} matched {matches} bands");
        }
    }

    #[test]
    fn test_band_boundaries() {
        let scale = GradingScale::default_scale();
        assert_eq!(scale.classify_label(100.0), "A");
        assert_eq!(scale.classify_label(90.0), "A");
        assert_eq!(scale.classify_label(89.0), "A-");
        assert_eq!(scale.classify_label(83.0), "B");
        assert_eq!(scale.classify_label(80.0), "B");
        assert_eq!(scale.classify_label(61.0), "D-");
        assert_eq!(scale.classify_label(60.0), "D-");
        assert_eq!(scale.classify_label(59.0), "F");
        assert_eq!(scale.classify_label(0.0), "F");
    }

    #[test]
    fn test_total_above_top_band_clamps_to_top() {
        let scale = GradingScale::default_scale();
        let top = scale.classify_label(100.0).to_string();
        for total in [100.4, 101.0, 150.0, f64::INFINITY] {
            assert_eq!(scale.classify_label(total), top);
        }
    }

    #[test]
    fn test_negative_total_falls_back_to_lowest() {
        let scale = GradingScale::default_scale();
        let bottom = scale.classify_label(0.0).to_string();
        for total in [-0.5, -1.0, -100.0, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(scale.classify_label(total), bottom);
        }
    }

    #[test]
    fn test_fractional_total_between_bands_rounds_down() {
        let scale = GradingScale::default_scale();
        assert_eq!(scale.classify_label(89.5), "A-");
        assert_eq!(scale.classify_label(59.9), "F");
        assert_eq!(scale.classify_label(83.99), "B");
    }

    #[test]
    fn test_classify_is_deterministic() {
        let scale = GradingScale::default_scale();
        let first = scale.classify_label(77.0).to_string();
        for _ in 0..10 {
            assert_eq!(scale.classify_label(77.0), first);
        }
    }

    #[test]
    fn test_new_sorts_unordered_bands() {
        let scale = GradingScale::new(vec![
            GradeBand::new("F", 0.0, 49.0, 0.0),
            GradeBand::new("A", 70.0, 100.0, 5.0),
            GradeBand::new("C", 50.0, 69.0, 3.0),
        ])
        .unwrap();
        let labels: Vec<&str> = scale.labels().collect();
        assert_eq!(labels, vec!["A", "C", "F"]);
        assert_eq!(scale.classify(55.0).grade_point, 3.0);
    }

    #[test]
    fn test_resolve_empty_uses_default() {
        let scale = GradingScale::resolve(vec![]).unwrap();
        assert_eq!(scale, GradingScale::default_scale());
    }

    #[test]
    fn test_rejects_overlapping_bands() {
        let err = GradingScale::new(vec![
            GradeBand::new("P", 50.0, 100.0, 1.0),
            GradeBand::new("F", 0.0, 50.0, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, GradelyError::InvalidGradingScale(_)));
        assert!(err.message().contains("overlap"));
    }

    #[test]
    fn test_rejects_gap_between_bands() {
        let err = GradingScale::new(vec![
            GradeBand::new("P", 52.0, 100.0, 1.0),
            GradeBand::new("F", 0.0, 50.0, 0.0),
        ])
        .unwrap_err();
        assert!(err.message().contains("gap"));
    }

    #[test]
    fn test_rejects_fractional_gap_hiding_an_integer() {
        let err = GradingScale::new(vec![
            GradeBand::new("P", 60.2, 100.0, 1.0),
            GradeBand::new("F", 0.0, 59.5, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, GradelyError::InvalidGradingScale(_)));
        assert!(err.message().contains("gap"));

        // 区间间隙内没有整数时仍然合法
        let scale = GradingScale::new(vec![
            GradeBand::new("P", 60.0, 100.0, 1.0),
            GradeBand::new("F", 0.0, 59.5, 0.0),
        ])
        .unwrap();
        for total in 0..=100 {
            let matches = scale
                .bands()
                .iter()
                .filter(|b| b.contains(total as f64))
                .count();
            assert_eq!(matches, 1, "total {total} matched {matches} bands");
        }
        assert_eq!(scale.classify_label(60.0), "P");
    }

    #[test]
    fn test_rejects_incomplete_coverage() {
        let err = GradingScale::new(vec![GradeBand::new("P", 10.0, 100.0, 1.0)]).unwrap_err();
        assert!(err.message().contains("start at 0"));

        let err = GradingScale::new(vec![GradeBand::new("P", 0.0, 90.0, 1.0)]).unwrap_err();
        assert!(err.message().contains("end at 100"));
    }

    #[test]
    fn test_rejects_duplicate_labels_and_inverted_bounds() {
        let err = GradingScale::new(vec![
            GradeBand::new("X", 50.0, 100.0, 1.0),
            GradeBand::new("X", 0.0, 49.0, 0.0),
        ])
        .unwrap_err();
        assert!(err.message().contains("duplicate"));

        let err = GradingScale::new(vec![GradeBand::new("X", 100.0, 0.0, 1.0)]).unwrap_err();
        assert!(err.message().contains("above max_score"));
    }

    #[test]
    fn test_rejects_empty_scale() {
        assert!(GradingScale::new(vec![]).is_err());
    }
}
