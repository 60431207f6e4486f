//! 门窗放置与网格捕捉
//!
//! 指针按下时，若最近墙体点距离小于吸附容差，则符号吸附到墙上并沿墙方向旋转；
//! 否则在指针位置自由放置，角度为 0。

use crate::math::Point2;
use crate::proximity::{find_closest_wall_point, WallHit};
use crate::wall::WallShape;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 放置配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// 吸附容差（像素）
    pub snap_tolerance: f64,
    /// 网格间距（像素）
    pub grid_size: f64,
    /// 是否启用网格捕捉
    pub grid_snap: bool,
    /// 每米对应的像素数
    pub pixels_per_meter: f64,
}

impl PlacementConfig {
    /// 默认比例：40 像素 = 1 米
    pub const DEFAULT_PIXELS_PER_METER: f64 = 40.0;
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 20.0,
            grid_size: Self::DEFAULT_PIXELS_PER_METER / 2.0,
            grid_snap: true,
            pixels_per_meter: Self::DEFAULT_PIXELS_PER_METER,
        }
    }
}

/// 将坐标值捕捉到最近的网格线
pub fn snap_to_grid(value: f64, config: &PlacementConfig) -> f64 {
    if config.grid_snap && config.grid_size > 0.0 {
        (value / config.grid_size).round() * config.grid_size
    } else {
        value
    }
}

/// 将点的两个坐标分别捕捉到网格
pub fn snap_point_to_grid(point: Point2, config: &PlacementConfig) -> Point2 {
    Point2::new(snap_to_grid(point.x, config), snap_to_grid(point.y, config))
}

/// 放置结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// 符号插入点
    pub position: Point2,
    /// 符号旋转角（度）
    pub angle: f64,
    /// 吸附到的墙体点（自由放置时为 `None`）
    pub wall: Option<WallHit>,
}

impl Placement {
    /// 在指针处自由放置
    pub fn freestanding(position: Point2) -> Self {
        Self {
            position,
            angle: 0.0,
            wall: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.wall.is_some()
    }
}

/// 决定门窗符号的放置位置与方向
pub fn place_symbol(pointer: Point2, walls: &[WallShape], config: &PlacementConfig) -> Placement {
    match find_closest_wall_point(pointer, walls) {
        Some(hit) if hit.distance < config.snap_tolerance => {
            debug!(distance = hit.distance, angle = hit.angle, "symbol snapped to wall");
            Placement {
                position: hit.point,
                angle: hit.angle,
                wall: Some(hit),
            }
        }
        hit => {
            debug!(
                nearest = ?hit.map(|h| h.distance),
                tolerance = config.snap_tolerance,
                "symbol placed freestanding"
            );
            Placement::freestanding(pointer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};
    use crate::transform::Transform2D;

    fn walls() -> Vec<WallShape> {
        vec![WallShape::polyline(
            &[Point2::new(0.0, 0.0), Point2::new(0.0, 200.0)],
            Transform2D::identity(),
        )]
    }

    #[test]
    fn test_snaps_within_tolerance() {
        let config = PlacementConfig::default();
        let placement = place_symbol(Point2::new(12.0, 80.0), &walls(), &config);

        assert!(placement.is_snapped());
        assert!(points_approx_eq(&placement.position, &Point2::new(0.0, 80.0)));
        assert!(approx_eq(placement.angle, 90.0));
    }

    #[test]
    fn test_freestanding_at_tolerance() {
        let config = PlacementConfig::default();
        let pointer = Point2::new(20.0, 80.0);
        let placement = place_symbol(pointer, &walls(), &config);

        assert!(!placement.is_snapped());
        assert!(points_approx_eq(&placement.position, &pointer));
        assert!(approx_eq(placement.angle, 0.0));
    }

    #[test]
    fn test_freestanding_without_walls() {
        let placement = place_symbol(Point2::new(5.0, 5.0), &[], &PlacementConfig::default());
        assert_eq!(placement, Placement::freestanding(Point2::new(5.0, 5.0)));
    }

    #[test]
    fn test_grid_snap() {
        let config = PlacementConfig::default();
        assert!(approx_eq(snap_to_grid(29.0, &config), 20.0));
        assert!(approx_eq(snap_to_grid(31.0, &config), 40.0));
        assert!(approx_eq(snap_to_grid(-11.0, &config), -20.0));

        let p = snap_point_to_grid(Point2::new(9.0, 51.0), &config);
        assert!(points_approx_eq(&p, &Point2::new(0.0, 60.0)));
    }

    #[test]
    fn test_grid_snap_disabled() {
        let config = PlacementConfig {
            grid_snap: false,
            ..Default::default()
        };
        assert!(approx_eq(snap_to_grid(29.0, &config), 29.0));
    }

    #[test]
    fn test_config_partial_json() {
        let config: PlacementConfig = serde_json::from_str(r#"{"snap_tolerance": 8.5}"#).unwrap();
        assert!(approx_eq(config.snap_tolerance, 8.5));
        assert!(approx_eq(config.grid_size, 20.0));
        assert!(config.grid_snap);
    }
}
