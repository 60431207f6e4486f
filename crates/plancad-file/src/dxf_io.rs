//! DXF文件导入/导出
//!
//! 读写 AutoCAD R12 (`AC1009`) ASCII DXF 的一个实体子集：
//! - `LINE`（读写）
//! - `LWPOLYLINE`（读写）
//! - `CIRCLE`（仅写出）
//!
//! 写出使用固定文件头手工拼接；读入交给 `dxf` crate，其他实体类型被跳过。
//! 场景坐标 Y 轴向下，DXF 坐标 Y 轴向上：写出时 Y 取反，读入时再取反一次。

use crate::error::FileError;
use plancad_core::geometry::Circle;
use plancad_core::math::{BoundingBox2, Point2};
use dxf::entities::EntityType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// 可交换的扁平几何实体（场景坐标，变换已烘焙）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DxfEntity {
    Line { start: Point2, end: Point2 },
    Polyline { vertices: Vec<Point2>, closed: bool },
    Circle { center: Point2, radius: f64 },
}

impl DxfEntity {
    pub fn line(start: Point2, end: Point2) -> Self {
        DxfEntity::Line { start, end }
    }

    /// 闭合多段线（矩形导出为 4 个顶点）
    pub fn closed_polyline(vertices: Vec<Point2>) -> Self {
        DxfEntity::Polyline {
            vertices,
            closed: true,
        }
    }

    pub fn circle(center: Point2, radius: f64) -> Self {
        DxfEntity::Circle { center, radius }
    }

    /// DXF 实体类型名
    pub fn type_name(&self) -> &'static str {
        match self {
            DxfEntity::Line { .. } => "LINE",
            DxfEntity::Polyline { .. } => "LWPOLYLINE",
            DxfEntity::Circle { .. } => "CIRCLE",
        }
    }

    /// 所有坐标均为有限值
    pub fn is_finite(&self) -> bool {
        let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        match self {
            DxfEntity::Line { start, end } => finite(start) && finite(end),
            DxfEntity::Polyline { vertices, .. } => vertices.iter().all(finite),
            DxfEntity::Circle { center, radius } => finite(center) && radius.is_finite(),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            DxfEntity::Line { start, end } => BoundingBox2::from_points([*start, *end]),
            DxfEntity::Polyline { vertices, .. } => {
                BoundingBox2::from_points(vertices.iter().copied())
            }
            DxfEntity::Circle { center, radius } => Circle::new(*center, *radius).bounding_box(),
        }
    }
}

/// 固定文件头：版本 AC1009，单一线型 CONTINUOUS，随后打开 ENTITIES 段
const HEADER: &str = "\
0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1009\n0\nENDSEC\n\
0\nSECTION\n2\nTABLES\n\
0\nTABLE\n2\nLTYPE\n70\n1\n\
0\nLTYPE\n2\nCONTINUOUS\n3\nSolid line\n72\n65\n73\n0\n40\n0.0\n\
0\nENDTAB\n0\nENDSEC\n\
0\nSECTION\n2\nENTITIES\n";

const FOOTER: &str = "0\nENDSEC\n0\nEOF\n";

/// 场景 Y 与 DXF Y 互换（负零写作零）
#[inline]
fn flip_y(y: f64) -> f64 {
    if y == 0.0 {
        0.0
    } else {
        -y
    }
}

/// 数值的最短往返十进制表示
fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn write_pair(out: &mut String, code: i32, value: &str) {
    out.push_str(&code.to_string());
    out.push('\n');
    out.push_str(value);
    out.push('\n');
}

fn write_number(out: &mut String, code: i32, value: f64) {
    write_pair(out, code, &format_number(value));
}

/// 写出一个点：X 用 `code`，Y 用 `code + 10`，Y 取反
fn write_point(out: &mut String, code: i32, point: &Point2) {
    write_number(out, code, point.x);
    write_number(out, code + 10, flip_y(point.y));
}

fn write_entity(out: &mut String, entity: &DxfEntity) {
    write_pair(out, 0, entity.type_name());
    write_pair(out, 8, "0");

    match entity {
        DxfEntity::Line { start, end } => {
            write_point(out, 10, start);
            write_point(out, 11, end);
        }
        DxfEntity::Polyline { vertices, closed } => {
            write_pair(out, 90, &vertices.len().to_string());
            write_pair(out, 70, if *closed { "1" } else { "0" });
            for vertex in vertices {
                write_point(out, 10, vertex);
            }
        }
        DxfEntity::Circle { center, radius } => {
            write_point(out, 10, center);
            write_number(out, 40, *radius);
        }
    }
}

/// 将实体序列导出为 DXF 文本
///
/// 含 NaN 或无穷坐标的实体无法被 DXF 读取器解析，跳过并告警。
pub fn export_scene(entities: &[DxfEntity]) -> String {
    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + entities.len() * 64);
    out.push_str(HEADER);
    let mut written = 0;
    for entity in entities {
        if entity.is_finite() {
            write_entity(&mut out, entity);
            written += 1;
        } else {
            warn!(entity = entity.type_name(), "skipping entity with non-finite coordinates");
        }
    }
    out.push_str(FOOTER);

    debug!(entities = written, bytes = out.len(), "exported DXF");
    out
}

/// 导出到DXF文件
pub fn export_file(path: &Path, entities: &[DxfEntity]) -> Result<(), FileError> {
    std::fs::write(path, export_scene(entities))?;
    Ok(())
}

/// 从DXF文本导入 LINE / LWPOLYLINE 实体
///
/// 任何格式错误都使整个文档失败，不返回部分结果。
pub fn import_scene(text: &str) -> Result<Vec<DxfEntity>, FileError> {
    import_bytes(text.as_bytes())
}

/// 从DXF文件导入
///
/// 按原始字节读取，文本编码由文件头中的 `$DWGCODEPAGE` 决定。
pub fn import_file(path: &Path) -> Result<Vec<DxfEntity>, FileError> {
    let bytes = std::fs::read(path)?;
    import_bytes(&bytes)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 从原始字节导入，允许开头带 UTF-8 BOM
pub fn import_bytes(bytes: &[u8]) -> Result<Vec<DxfEntity>, FileError> {
    let mut reader = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if reader.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    ensure_terminated(reader)?;

    let drawing =
        dxf::Drawing::load(&mut reader).map_err(|e| FileError::Parse(e.to_string()))?;

    let mut skipped = 0;
    let entities: Vec<DxfEntity> = drawing
        .entities()
        .filter_map(|entity| {
            let converted = convert_dxf_entity(entity);
            if converted.is_none() {
                skipped += 1;
            }
            converted
        })
        .collect();

    debug!(entities = entities.len(), skipped, "imported DXF");
    Ok(entities)
}

/// 文档必须以 `EOF` 标记结束，否则视为被截断
fn ensure_terminated(bytes: &[u8]) -> Result<(), FileError> {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace() && *b != 0)
        .map_or(0, |i| i + 1);
    if bytes[..end].ends_with(b"EOF") {
        Ok(())
    } else {
        Err(FileError::Parse(
            "document is truncated: missing EOF marker".to_string(),
        ))
    }
}

/// 转换单个 DXF 实体，不支持的类型返回 `None`
fn convert_dxf_entity(entity: &dxf::entities::Entity) -> Option<DxfEntity> {
    match &entity.specific {
        EntityType::Line(line) => Some(DxfEntity::Line {
            start: Point2::new(line.p1.x, flip_y(line.p1.y)),
            end: Point2::new(line.p2.x, flip_y(line.p2.y)),
        }),
        EntityType::LwPolyline(poly) => Some(DxfEntity::Polyline {
            vertices: poly
                .vertices
                .iter()
                .map(|v| Point2::new(v.x, flip_y(v.y)))
                .collect(),
            closed: poly.is_closed(),
        }),
        _ => None,
    }
}
