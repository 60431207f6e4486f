//! 建筑符号：门、窗、楼梯
//!
//! 门窗只关心默认宽度，放置由 [`crate::placement`] 决定；
//! 楼梯按踏步深度约 0.3 米划分踏步线。

use crate::geometry::Segment;
use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 可吸附到墙体的符号类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Door,
    Window,
}

impl SymbolKind {
    /// 默认宽度（米）
    pub fn default_width_meters(&self) -> f64 {
        match self {
            SymbolKind::Door => 0.8,
            SymbolKind::Window => 1.2,
        }
    }

    /// 默认宽度（像素）
    pub fn default_width(&self, pixels_per_meter: f64) -> f64 {
        self.default_width_meters() * pixels_per_meter
    }

    pub fn name(&self) -> &'static str {
        match self {
            SymbolKind::Door => "door",
            SymbolKind::Window => "window",
        }
    }
}

/// 踏步深度（米）
const STEP_DEPTH_METERS: f64 = 0.3;

/// 楼梯踏步布局（局部坐标，原点为左上角）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairLayout {
    pub width: f64,
    pub height: f64,
    pub step_count: usize,
    pub step_depth: f64,
}

impl StairLayout {
    pub fn new(width: f64, height: f64, pixels_per_meter: f64) -> Self {
        let steps = (height / (pixels_per_meter * STEP_DEPTH_METERS)).floor();
        let step_count = if steps.is_finite() && steps >= 1.0 {
            steps as usize
        } else {
            1
        };
        Self {
            width,
            height,
            step_count,
            step_depth: height / step_count as f64,
        }
    }

    /// 内部踏步线（共 `step_count - 1` 条）
    pub fn tread_lines(&self) -> Vec<Segment> {
        (1..self.step_count)
            .map(|i| {
                let y = i as f64 * self.step_depth;
                Segment::new(Point2::new(0.0, y), Point2::new(self.width, y))
            })
            .collect()
    }

    /// 上行方向线，从底部第一级中点指向顶部最后一级中点
    pub fn direction_line(&self) -> Segment {
        let x = self.width / 2.0;
        Segment::new(
            Point2::new(x, self.height - self.step_depth / 2.0),
            Point2::new(x, self.step_depth / 2.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_symbol_widths() {
        assert!(approx_eq(SymbolKind::Door.default_width(40.0), 32.0));
        assert!(approx_eq(SymbolKind::Window.default_width(40.0), 48.0));
    }

    #[test]
    fn test_stair_layout() {
        let stairs = StairLayout::new(40.0, 60.0, 40.0);
        assert_eq!(stairs.step_count, 5);
        assert!(approx_eq(stairs.step_depth, 12.0));

        let treads = stairs.tread_lines();
        assert_eq!(treads.len(), 4);
        assert!(approx_eq(treads[0].p1.y, 12.0));
        assert!(approx_eq(treads[3].p2.x, 40.0));

        let dir = stairs.direction_line();
        assert!(approx_eq(dir.p1.y, 54.0));
        assert!(approx_eq(dir.p2.y, 6.0));
    }

    #[test]
    fn test_short_stairs_have_one_step() {
        let stairs = StairLayout::new(40.0, 5.0, 40.0);
        assert_eq!(stairs.step_count, 1);
        assert!(stairs.tread_lines().is_empty());
    }
}
