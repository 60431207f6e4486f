//! plancad 几何引擎
//!
//! 为平面图编辑器提供墙体吸附与符号放置所需的几何计算。
//!
//! # 架构设计
//!
//! 核心不持有任何场景状态，所有查询都以参数形式接收图形：
//! - `WallShape`: 已解析世界变换的墙体/房间
//! - `find_closest_wall_point`: 最近墙体点查询
//! - `place_symbol`: 门窗吸附决策
//!
//! # 示例
//!
//! ```rust
//! use plancad_core::prelude::*;
//!
//! let wall = WallShape::polyline(
//!     &[Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)],
//!     Transform2D::identity(),
//! );
//!
//! let hit = find_closest_wall_point(Point2::new(50.0, 10.0), &[wall]).unwrap();
//! assert!((hit.distance - 10.0).abs() < 1e-9);
//! ```

pub mod dimension;
pub mod geometry;
pub mod math;
pub mod placement;
pub mod proximity;
pub mod symbol;
pub mod transform;
pub mod wall;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::dimension::DimensionMeasure;
    pub use crate::geometry::{Circle, Rect, Segment};
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::placement::{place_symbol, Placement, PlacementConfig};
    pub use crate::proximity::{find_closest_wall_point, WallHit};
    pub use crate::symbol::{StairLayout, SymbolKind};
    pub use crate::transform::Transform2D;
    pub use crate::wall::{ShapeCategory, WallMember, WallShape};
}
