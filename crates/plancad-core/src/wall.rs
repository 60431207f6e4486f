//! 墙体类图形
//!
//! 只有墙体（`Wall`）和房间（`Room`）两类结构图形参与门窗吸附，
//! 家具、标注、网格线等一律不参与。

use crate::geometry::{Rect, Segment};
use crate::math::Point2;
use crate::transform::Transform2D;
use serde::{Deserialize, Serialize};

/// 场景对象的结构分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeCategory {
    /// 墙体（多段墙线）
    #[default]
    Wall,
    /// 房间（矩形轮廓）
    Room,
    /// 家具与符号（门、窗、楼梯）
    Furniture,
    /// 尺寸标注
    Dimension,
    /// 网格线
    Grid,
    /// 临时辅助线
    Construction,
}

impl ShapeCategory {
    /// 是否为结构图形（参与吸附查询）
    pub fn is_structural(&self) -> bool {
        matches!(self, ShapeCategory::Wall | ShapeCategory::Room)
    }

    /// 是否导出到DXF
    pub fn is_exportable(&self) -> bool {
        !matches!(
            self,
            ShapeCategory::Dimension | ShapeCategory::Grid | ShapeCategory::Construction
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeCategory::Wall => "wall",
            ShapeCategory::Room => "room",
            ShapeCategory::Furniture => "furniture",
            ShapeCategory::Dimension => "dimension",
            ShapeCategory::Grid => "grid",
            ShapeCategory::Construction => "construction",
        }
    }
}

/// 墙体的组成图元（局部坐标）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WallMember {
    /// 矩形墙体，分解为上、右、下、左四条边
    Rectangle(Rect),
    /// 单条直线墙段
    Segment(Segment),
}

impl WallMember {
    /// 局部坐标下的线段
    fn local_segments(&self) -> Vec<Segment> {
        match self {
            WallMember::Rectangle(rect) => rect.edges().to_vec(),
            WallMember::Segment(seg) => vec![*seg],
        }
    }
}

/// 墙体类图形
///
/// `transform` 必须是已解析的世界变换（自身与所有父级变换的乘积），
/// 查询时不再遍历场景层级。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallShape {
    pub category: ShapeCategory,
    pub transform: Transform2D,
    pub members: Vec<WallMember>,
}

impl WallShape {
    pub fn new(category: ShapeCategory, transform: Transform2D, members: Vec<WallMember>) -> Self {
        Self {
            category,
            transform,
            members,
        }
    }

    /// 由折线点序列组成的墙体，相邻点构成一段
    pub fn polyline(points: &[Point2], transform: Transform2D) -> Self {
        let members = points
            .windows(2)
            .map(|w| WallMember::Segment(Segment::new(w[0], w[1])))
            .collect();
        Self::new(ShapeCategory::Wall, transform, members)
    }

    /// 是否参与吸附查询
    pub fn is_structural(&self) -> bool {
        self.category.is_structural()
    }

    /// 世界坐标下的全部线段（含退化线段）
    pub fn world_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.members
            .iter()
            .flat_map(|m| m.local_segments())
            .map(move |seg| seg.transformed(&self.transform))
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        self.members
            .iter()
            .map(|m| match m {
                WallMember::Rectangle(_) => 4,
                WallMember::Segment(_) => 1,
            })
            .sum()
    }
}
