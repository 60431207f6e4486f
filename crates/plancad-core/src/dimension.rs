//! 两点尺寸标注的测量

use crate::geometry::Segment;
use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 尺寸标注测量结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionMeasure {
    /// 标注起点
    pub start: Point2,
    /// 标注终点
    pub end: Point2,
    /// 像素长度
    pub length: f64,
    /// 实际长度（米）
    pub meters: f64,
    /// 标注方向角（度）
    pub angle: f64,
}

impl DimensionMeasure {
    /// 测量两点间的标注
    pub fn between(start: Point2, end: Point2, pixels_per_meter: f64) -> Self {
        let segment = Segment::new(start, end);
        let length = segment.length();
        Self {
            start,
            end,
            length,
            meters: length / pixels_per_meter,
            angle: segment.angle_degrees(),
        }
    }

    /// 显示文本，如 `2.35 m`
    pub fn label(&self) -> String {
        format!("{:.2} m", self.meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_horizontal_dimension() {
        let dim = DimensionMeasure::between(Point2::new(0.0, 0.0), Point2::new(80.0, 0.0), 40.0);
        assert!(approx_eq(dim.length, 80.0));
        assert!(approx_eq(dim.meters, 2.0));
        assert!(approx_eq(dim.angle, 0.0));
        assert_eq!(dim.label(), "2.00 m");
    }

    #[test]
    fn test_diagonal_dimension() {
        let dim = DimensionMeasure::between(Point2::new(0.0, 0.0), Point2::new(30.0, 40.0), 40.0);
        assert_eq!(dim.label(), "1.25 m");
        assert!((dim.angle - 53.130_102_354_155_98).abs() < 1e-9);
    }
}
