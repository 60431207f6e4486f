//! 最近墙体点查询
//!
//! 给定指针位置与一组墙体类图形，找出所有墙段上距离指针最近的点、
//! 该墙段的方向角与距离。用于门窗放置时吸附到墙上。
//!
//! 查询本身不做距离阈值判断，阈值由调用方决定（见 [`crate::placement`]）。

use crate::geometry::Segment;
use crate::math::Point2;
use crate::wall::WallShape;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 查询结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallHit {
    /// 墙段上的最近点（世界坐标）
    pub point: Point2,
    /// 墙段方向角（度）
    pub angle: f64,
    /// 指针到最近点的距离
    pub distance: f64,
}

/// 在单条线段上求最近点
///
/// 退化线段返回 `None`。
pub fn closest_on_segment(pointer: &Point2, segment: &Segment) -> Option<WallHit> {
    let (point, _) = segment.closest_point(pointer)?;
    Some(WallHit {
        point,
        angle: segment.angle_degrees(),
        distance: (pointer - point).norm(),
    })
}

/// 在一组线段中求最近点，距离相同时保留先出现的
pub fn closest_on_segments(
    pointer: &Point2,
    segments: impl IntoIterator<Item = Segment>,
) -> Option<WallHit> {
    let mut best: Option<WallHit> = None;
    for segment in segments {
        let Some(hit) = closest_on_segment(pointer, &segment) else {
            continue;
        };
        if best.is_none_or(|b| hit.distance < b.distance) {
            best = Some(hit);
        }
    }
    best
}

/// 查找所有结构墙体上距离 `pointer` 最近的点
///
/// 非结构图形（家具、标注、网格）被忽略；没有可用墙段时返回 `None`。
pub fn find_closest_wall_point(pointer: Point2, walls: &[WallShape]) -> Option<WallHit> {
    let structural = walls.iter().filter(|w| w.is_structural());
    let segments = structural.flat_map(|w| w.world_segments());

    let hit = closest_on_segments(&pointer, segments);
    trace!(
        x = pointer.x,
        y = pointer.y,
        walls = walls.len(),
        hit = ?hit,
        "closest wall point query"
    );
    hit
}
