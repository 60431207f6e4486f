//! 2D仿射变换
//!
//! 支持平移、旋转、缩放及其组合。场景中的每个对象都以
//! “位置 + 角度 + 缩放”描述自身，由 [`Transform2D::from_placement`] 组合成
//! 局部坐标到世界坐标的变换。

use crate::math::{Matrix3, Point2};
use serde::{Deserialize, Serialize};

/// 2D仿射变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    matrix: Matrix3,
}

impl Transform2D {
    /// 创建单位变换
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// 创建平移变换
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            matrix: Matrix3::new(
                1.0, 0.0, dx,
                0.0, 1.0, dy,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// 创建旋转变换（绕原点，弧度）
    ///
    /// 在Y轴向下的场景坐标中，正角度在屏幕上表现为顺时针。
    pub fn rotation(angle: f64) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            matrix: Matrix3::new(
                cos, -sin, 0.0,
                sin, cos, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// 创建缩放变换（绕原点）
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            matrix: Matrix3::new(
                sx, 0.0, 0.0,
                0.0, sy, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// 从对象摆放参数创建变换：先缩放，再旋转（角度制），最后平移到 `position`
    pub fn from_placement(position: Point2, angle_degrees: f64, sx: f64, sy: f64) -> Self {
        Self::translation(position.x, position.y)
            .then(&Self::rotation(angle_degrees.to_radians()))
            .then(&Self::scale(sx, sy))
    }

    /// 组合两个变换（self 在后，other 在前）
    ///
    /// 父级变换与子级变换的组合写作 `parent.then(&child)`。
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// 变换一个点
    pub fn transform_point(&self, point: &Point2) -> Point2 {
        let v = self.matrix * nalgebra::Vector3::new(point.x, point.y, 1.0);
        Point2::new(v.x, v.y)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}
