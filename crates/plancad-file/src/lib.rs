//! plancad 文件格式处理
//!
//! 支持：
//! - `.json` 场景文档（画布序列化格式）
//! - `.dxf` 导入/导出（R12 实体子集）

pub mod document;
pub mod dxf_io;
pub mod error;

pub use document::{ObjectPlacement, Primitive, Scene, SceneObject};
pub use dxf_io::{export_scene, import_scene, DxfEntity};
pub use error::FileError;
