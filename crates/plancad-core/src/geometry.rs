//! 几何图元定义
//!
//! 支持的基本图元：
//! - 线段 (Segment)
//! - 矩形 (Rect)
//! - 圆 (Circle)

use crate::math::{BoundingBox2, Point2, Vector2};
use crate::transform::Transform2D;
use serde::{Deserialize, Serialize};

/// 线段（墙体的一条边）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point2,
    pub p2: Point2,
}

impl Segment {
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// 方向向量 `p2 - p1`（未归一化）
    pub fn delta(&self) -> Vector2 {
        self.p2 - self.p1
    }

    /// 长度的平方
    pub fn length_squared(&self) -> f64 {
        self.delta().norm_squared()
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    /// 两端点重合的退化线段
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() == 0.0
    }

    /// 点在线段所在直线上的投影参数 `t`（以线段长度为单位，未截断）
    ///
    /// 退化线段返回 `None`。
    pub fn project(&self, point: &Point2) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        Some((point - self.p1).dot(&self.delta()) / self.length_squared())
    }

    /// 线段上指定参数处的点
    pub fn point_at(&self, t: f64) -> Point2 {
        self.p1 + self.delta() * t
    }

    /// 线段上距离 `point` 最近的点及其参数 `t ∈ [0, 1]`
    ///
    /// 超出端点的投影被截断到端点，而不是落在延长线上。
    pub fn closest_point(&self, point: &Point2) -> Option<(Point2, f64)> {
        let t = self.project(point)?.clamp(0.0, 1.0);
        Some((self.point_at(t), t))
    }

    /// 线段方向角（度），`atan2(dy, dx)`
    pub fn angle_degrees(&self) -> f64 {
        let d = self.delta();
        d.y.atan2(d.x).to_degrees()
    }

    /// 用变换映射两个端点
    pub fn transformed(&self, transform: &Transform2D) -> Self {
        Self {
            p1: transform.transform_point(&self.p1),
            p2: transform.transform_point(&self.p2),
        }
    }
}

/// 以中心和半宽/半高描述的矩形（局部坐标，Y 向下）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Point2,
    pub half_width: f64,
    pub half_height: f64,
}

impl Rect {
    pub fn new(center: Point2, half_width: f64, half_height: f64) -> Self {
        Self {
            center,
            half_width,
            half_height,
        }
    }

    /// 由宽高创建
    pub fn from_size(center: Point2, width: f64, height: f64) -> Self {
        Self::new(center, width / 2.0, height / 2.0)
    }

    /// 四个角点，顺序为 左上、右上、右下、左下
    pub fn corners(&self) -> [Point2; 4] {
        let (cx, cy) = (self.center.x, self.center.y);
        let (hw, hh) = (self.half_width, self.half_height);
        [
            Point2::new(cx - hw, cy - hh),
            Point2::new(cx + hw, cy - hh),
            Point2::new(cx + hw, cy + hh),
            Point2::new(cx - hw, cy + hh),
        ]
    }

    /// 四条边：上、右、下、左
    pub fn edges(&self) -> [Segment; 4] {
        let [tl, tr, br, bl] = self.corners();
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let r = self.radius.abs();
        BoundingBox2::new(
            Point2::new(self.center.x - r, self.center.y - r),
            Point2::new(self.center.x + r, self.center.y + r),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq, EPSILON};

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((seg.length() - 5.0).abs() < EPSILON);
        assert!(approx_eq(seg.length_squared(), 25.0));
    }

    #[test]
    fn test_closest_point_interior() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));
        let (p, t) = seg.closest_point(&Point2::new(50.0, 10.0)).unwrap();
        assert!(points_approx_eq(&p, &Point2::new(50.0, 0.0)));
        assert!(approx_eq(t, 0.5));
    }

    #[test]
    fn test_closest_point_clamped() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));

        assert!(approx_eq(seg.project(&Point2::new(150.0, 0.0)).unwrap(), 1.5));
        let (p, t) = seg.closest_point(&Point2::new(150.0, 0.0)).unwrap();
        assert!(points_approx_eq(&p, &Point2::new(100.0, 0.0)));
        assert!(approx_eq(t, 1.0));

        let (p, t) = seg.closest_point(&Point2::new(-20.0, 5.0)).unwrap();
        assert!(points_approx_eq(&p, &Point2::new(0.0, 0.0)));
        assert!(approx_eq(t, 0.0));
    }

    #[test]
    fn test_degenerate_segment() {
        let seg = Segment::new(Point2::new(5.0, 5.0), Point2::new(5.0, 5.0));
        assert!(seg.is_degenerate());
        assert!(seg.project(&Point2::new(0.0, 0.0)).is_none());
        assert!(seg.closest_point(&Point2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_segment_angle() {
        let down = Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0));
        assert!(approx_eq(down.angle_degrees(), 90.0));

        let left = Segment::new(Point2::new(0.0, 0.0), Point2::new(-10.0, 0.0));
        assert!(approx_eq(left.angle_degrees(), 180.0));
    }

    #[test]
    fn test_rect_edges_order() {
        let rect = Rect::from_size(Point2::new(0.0, 0.0), 20.0, 10.0);
        let [top, right, bottom, left] = rect.edges();

        assert!(points_approx_eq(&top.p1, &Point2::new(-10.0, -5.0)));
        assert!(points_approx_eq(&top.p2, &Point2::new(10.0, -5.0)));
        assert!(points_approx_eq(&right.p2, &Point2::new(10.0, 5.0)));
        assert!(points_approx_eq(&bottom.p2, &Point2::new(-10.0, 5.0)));
        assert!(points_approx_eq(&left.p2, &Point2::new(-10.0, -5.0)));
    }
}
