//! 平面图场景数据模型
//!
//! 场景由画布一侧序列化而来：每个对象带有结构分类、世界摆放参数
//! （位置、角度、缩放）以及若干局部坐标图元。嵌套分组在交给核心之前
//! 已由画布解析为世界摆放参数。

use crate::dxf_io::{self, DxfEntity};
use crate::error::FileError;
use plancad_core::geometry::{Circle, Rect, Segment};
use plancad_core::math::{BoundingBox2, Point2};
use plancad_core::placement::{place_symbol, Placement, PlacementConfig};
use plancad_core::symbol::{StairLayout, SymbolKind};
use plancad_core::transform::Transform2D;
use plancad_core::wall::{ShapeCategory, WallMember, WallShape};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// 当前场景文件格式版本
pub const FORMAT_VERSION: u32 = 1;

/// 门扇与窗线的厚度（像素）
const SYMBOL_DEPTH: f64 = 5.0;

/// 对象的世界摆放参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectPlacement {
    pub position: Point2,
    /// 旋转角（度），屏幕上顺时针为正
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ObjectPlacement {
    pub fn at(position: Point2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn transform(&self) -> Transform2D {
        Transform2D::from_placement(self.position, self.angle, self.scale_x, self.scale_y)
    }
}

impl Default for ObjectPlacement {
    fn default() -> Self {
        Self {
            position: Point2::origin(),
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// 对象内的局部图元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Line { start: Point2, end: Point2 },
    Rect { center: Point2, width: f64, height: f64 },
    Circle { center: Point2, radius: f64 },
    Polyline { points: Vec<Point2>, closed: bool },
}

/// 场景对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub category: ShapeCategory,
    #[serde(default)]
    pub placement: ObjectPlacement,
    pub members: Vec<Primitive>,
}

impl SceneObject {
    pub fn new(category: ShapeCategory, placement: ObjectPlacement, members: Vec<Primitive>) -> Self {
        Self {
            category,
            placement,
            members,
        }
    }

    /// 门窗符号，摆放参数取自放置结果
    ///
    /// 门以插入点为门扇左端，窗以插入点为中心画三条平行线。
    pub fn symbol(kind: SymbolKind, placement: &Placement, pixels_per_meter: f64) -> Self {
        let width = kind.default_width(pixels_per_meter);
        let members = match kind {
            SymbolKind::Door => vec![Primitive::Rect {
                center: Point2::new(width / 2.0, 0.0),
                width,
                height: SYMBOL_DEPTH,
            }],
            SymbolKind::Window => [-SYMBOL_DEPTH, 0.0, SYMBOL_DEPTH]
                .into_iter()
                .map(|y| Primitive::Line {
                    start: Point2::new(-width / 2.0, y),
                    end: Point2::new(width / 2.0, y),
                })
                .collect(),
        };
        Self::new(
            ShapeCategory::Furniture,
            ObjectPlacement::at(placement.position).with_angle(placement.angle),
            members,
        )
    }

    /// 楼梯符号：外框、踏步线与上行方向线，`origin` 为左上角
    pub fn stairs(origin: Point2, angle: f64, layout: &StairLayout) -> Self {
        let mut members = vec![Primitive::Rect {
            center: Point2::new(layout.width / 2.0, layout.height / 2.0),
            width: layout.width,
            height: layout.height,
        }];
        members.extend(
            layout
                .tread_lines()
                .into_iter()
                .chain(std::iter::once(layout.direction_line()))
                .map(|seg| Primitive::Line {
                    start: seg.p1,
                    end: seg.p2,
                }),
        );
        Self::new(
            ShapeCategory::Furniture,
            ObjectPlacement::at(origin).with_angle(angle),
            members,
        )
    }

    /// 转为墙体类图形；非结构对象返回 `None`
    pub fn to_wall_shape(&self) -> Option<WallShape> {
        if !self.category.is_structural() {
            return None;
        }

        let mut members = Vec::new();
        for primitive in &self.members {
            match primitive {
                Primitive::Line { start, end } => {
                    members.push(WallMember::Segment(Segment::new(*start, *end)));
                }
                Primitive::Rect {
                    center,
                    width,
                    height,
                } => {
                    members.push(WallMember::Rectangle(Rect::from_size(*center, *width, *height)));
                }
                Primitive::Polyline { points, closed } => {
                    members.extend(
                        points
                            .windows(2)
                            .map(|w| WallMember::Segment(Segment::new(w[0], w[1]))),
                    );
                    if *closed && points.len() > 2 {
                        if let (Some(last), Some(first)) = (points.last(), points.first()) {
                            members.push(WallMember::Segment(Segment::new(*last, *first)));
                        }
                    }
                }
                Primitive::Circle { .. } => {}
            }
        }

        Some(WallShape::new(self.category, self.placement.transform(), members))
    }

    /// 按导出规则转为 DXF 实体（坐标已变换到世界坐标）
    pub fn to_dxf_entities(&self) -> Vec<DxfEntity> {
        if !self.category.is_exportable() {
            return Vec::new();
        }

        let transform = self.placement.transform();
        let world = |p: &Point2| transform.transform_point(p);

        self.members
            .iter()
            .map(|primitive| match primitive {
                Primitive::Line { start, end } => DxfEntity::line(world(start), world(end)),
                Primitive::Rect {
                    center,
                    width,
                    height,
                } => {
                    let corners = Rect::from_size(*center, *width, *height).corners();
                    DxfEntity::closed_polyline(corners.iter().map(world).collect())
                }
                Primitive::Circle { center, radius } => {
                    DxfEntity::circle(world(center), radius * self.placement.scale_x)
                }
                Primitive::Polyline { points, closed } => DxfEntity::Polyline {
                    vertices: points.iter().map(world).collect(),
                    closed: *closed,
                },
            })
            .collect()
    }

    /// 导入的实体统一放到墙体分类，摆放参数为单位变换
    pub fn from_dxf_entity(entity: DxfEntity) -> Self {
        let primitive = match entity {
            DxfEntity::Line { start, end } => Primitive::Line { start, end },
            DxfEntity::Polyline { vertices, closed } => Primitive::Polyline {
                points: vertices,
                closed,
            },
            DxfEntity::Circle { center, radius } => Primitive::Circle { center, radius },
        };
        Self::new(ShapeCategory::Wall, ObjectPlacement::default(), vec![primitive])
    }

    /// 世界坐标包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        let transform = self.placement.transform();
        let mut bbox = BoundingBox2::empty();
        for primitive in &self.members {
            let points: Vec<Point2> = match primitive {
                Primitive::Line { start, end } => vec![*start, *end],
                Primitive::Rect {
                    center,
                    width,
                    height,
                } => Rect::from_size(*center, *width, *height).corners().to_vec(),
                Primitive::Circle { center, radius } => {
                    let bbox = Circle::new(*center, *radius).bounding_box();
                    vec![
                        bbox.min,
                        Point2::new(bbox.max.x, bbox.min.y),
                        bbox.max,
                        Point2::new(bbox.min.x, bbox.max.y),
                    ]
                }
                Primitive::Polyline { points, .. } => points.clone(),
            };
            for p in &points {
                bbox.expand_to_include(&transform.transform_point(p));
            }
        }
        bbox
    }
}

/// 平面图场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 文件格式版本
    #[serde(default = "default_version")]
    pub version: u32,

    /// 所有对象，按绘制顺序
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

impl Scene {
    /// 创建空场景
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION,
            objects: Vec::new(),
        }
    }

    /// 添加对象
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// 获取对象数量
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// 参与吸附查询的墙体图形
    pub fn wall_shapes(&self) -> Vec<WallShape> {
        self.objects
            .iter()
            .filter_map(SceneObject::to_wall_shape)
            .collect()
    }

    /// 待导出的 DXF 实体
    pub fn export_entities(&self) -> Vec<DxfEntity> {
        self.objects
            .iter()
            .flat_map(SceneObject::to_dxf_entities)
            .collect()
    }

    /// 将导入的实体加入场景，返回新增对象数量
    pub fn insert_imported(&mut self, entities: Vec<DxfEntity>) -> usize {
        let count = entities.len();
        self.objects
            .extend(entities.into_iter().map(SceneObject::from_dxf_entity));
        count
    }

    /// 按吸附规则放置门窗并加入场景
    pub fn insert_symbol(
        &mut self,
        pointer: Point2,
        kind: SymbolKind,
        config: &PlacementConfig,
    ) -> Placement {
        let placement = place_symbol(pointer, &self.wall_shapes(), config);
        self.add_object(SceneObject::symbol(kind, &placement, config.pixels_per_meter));
        placement
    }

    /// 计算所有对象的包围盒
    pub fn bounds(&self) -> Option<BoundingBox2> {
        let bbox = self
            .objects
            .iter()
            .map(SceneObject::bounding_box)
            .fold(BoundingBox2::empty(), |acc, b| acc.union(&b));
        (!bbox.is_empty()).then_some(bbox)
    }

    pub fn from_json_str(json: &str) -> Result<Self, FileError> {
        let scene: Scene = serde_json::from_str(json)?;
        if scene.version > FORMAT_VERSION {
            return Err(FileError::InvalidFormat(format!(
                "scene version {} is newer than supported version {}",
                scene.version, FORMAT_VERSION
            )));
        }
        Ok(scene)
    }

    pub fn to_json_string(&self) -> Result<String, FileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_json(path: &Path) -> Result<Self, FileError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn save_json(&self, path: &Path) -> Result<(), FileError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// 从文件加载
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();

        let scene = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path)?,
            Some("dxf") => {
                let mut scene = Self::new();
                scene.insert_imported(dxf_io::import_file(path)?);
                scene
            }
            _ => {
                return Err(FileError::InvalidFormat(
                    "Unknown file extension".to_string(),
                ))
            }
        };

        info!(path = %path.display(), objects = scene.object_count(), "opened scene");
        Ok(scene)
    }

    /// 另存为
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.save_json(path)?,
            Some("dxf") => dxf_io::export_file(path, &self.export_entities())?,
            _ => {
                return Err(FileError::InvalidFormat(
                    "Unknown file extension".to_string(),
                ))
            }
        }

        debug!(path = %path.display(), "saved scene");
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
