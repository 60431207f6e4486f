//! plancad 命令行入口
//! 对场景文件执行墙体吸附、门窗放置、尺寸测量以及 DXF 导入导出

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use plancad_core::placement::snap_point_to_grid;
use plancad_core::prelude::*;
use plancad_file::{dxf_io, Scene, SceneObject};

#[derive(Parser, Debug)]
#[command(name = "plancad", version, about = "Floor-plan wall snapping and DXF tool")]
struct Cli {
    /// 放置配置文件（JSON）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 查询距指针最近的墙体点
    Snap {
        scene: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// 计算门窗放置位置，可写回场景
    Place {
        scene: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(long, value_enum, default_value_t = KindArg::Door)]
        kind: KindArg,
        #[arg(long)]
        write: bool,
    },
    /// 在场景中添加楼梯，`x`/`y` 为左上角
    Stairs {
        scene: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        width: f64,
        height: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle: f64,
    },
    /// 测量两点间的尺寸（端点捕捉到网格）
    Measure {
        #[arg(allow_negative_numbers = true)]
        x1: f64,
        #[arg(allow_negative_numbers = true)]
        y1: f64,
        #[arg(allow_negative_numbers = true)]
        x2: f64,
        #[arg(allow_negative_numbers = true)]
        y2: f64,
    },
    /// 将场景导出为 DXF
    Export { scene: PathBuf, output: PathBuf },
    /// 导入 DXF，追加到场景文件（不存在则新建）
    Import { input: PathBuf, scene: PathBuf },
    /// 显示文件概要
    Info { file: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum KindArg {
    Door,
    Window,
}

impl From<KindArg> for SymbolKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Door => SymbolKind::Door,
            KindArg::Window => SymbolKind::Window,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PlacementConfig> {
    let Some(path) = path else {
        return Ok(PlacementConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(?config, "loaded placement config");
    Ok(config)
}

fn open_scene(path: &Path) -> Result<Scene> {
    Scene::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn save_scene(scene: &Scene, path: &Path) -> Result<()> {
    scene
        .save_as(path)
        .with_context(|| format!("failed to save {}", path.display()))
}

fn snap(scene: &Path, pointer: Point2) -> Result<()> {
    let walls = open_scene(scene)?.wall_shapes();
    match find_closest_wall_point(pointer, &walls) {
        Some(hit) => println!(
            "point=({:.3}, {:.3}) angle={:.3} distance={:.3}",
            hit.point.x, hit.point.y, hit.angle, hit.distance
        ),
        None => println!("no wall"),
    }
    Ok(())
}

/// 求门窗放置结果；`write` 时把符号加入场景
fn place_in_scene(
    scene: &mut Scene,
    pointer: Point2,
    kind: SymbolKind,
    write: bool,
    config: &PlacementConfig,
) -> Placement {
    if write {
        scene.insert_symbol(pointer, kind, config)
    } else {
        place_symbol(pointer, &scene.wall_shapes(), config)
    }
}

fn place(
    scene_path: &Path,
    pointer: Point2,
    kind: SymbolKind,
    write: bool,
    config: &PlacementConfig,
) -> Result<()> {
    let mut scene = open_scene(scene_path)?;
    let placement = place_in_scene(&mut scene, pointer, kind, write, config);

    println!(
        "{} at ({:.3}, {:.3}) angle={:.3} {}",
        kind.name(),
        placement.position.x,
        placement.position.y,
        placement.angle,
        if placement.is_snapped() { "snapped" } else { "freestanding" }
    );

    if write {
        save_scene(&scene, scene_path)?;
        info!(path = %scene_path.display(), kind = kind.name(), "symbol written");
    }
    Ok(())
}

fn stairs(
    scene_path: &Path,
    corner: Point2,
    size: (f64, f64),
    angle: f64,
    config: &PlacementConfig,
) -> Result<()> {
    let mut scene = open_scene(scene_path)?;
    let origin = snap_point_to_grid(corner, config);
    let layout = StairLayout::new(size.0, size.1, config.pixels_per_meter);
    scene.add_object(SceneObject::stairs(origin, angle, &layout));
    save_scene(&scene, scene_path)?;

    println!(
        "stairs at ({:.3}, {:.3}) with {} steps",
        origin.x, origin.y, layout.step_count
    );
    Ok(())
}

fn measure(start: Point2, end: Point2, config: &PlacementConfig) -> DimensionMeasure {
    DimensionMeasure::between(
        snap_point_to_grid(start, config),
        snap_point_to_grid(end, config),
        config.pixels_per_meter,
    )
}

fn export(scene: &Path, output: &Path) -> Result<()> {
    let entities = open_scene(scene)?.export_entities();
    dxf_io::export_file(output, &entities)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("exported {} entities to {}", entities.len(), output.display());
    Ok(())
}

fn import(input: &Path, scene_path: &Path) -> Result<()> {
    let entities = dxf_io::import_file(input)
        .with_context(|| format!("failed to import {}", input.display()))?;

    let mut scene = if scene_path.exists() {
        open_scene(scene_path)?
    } else {
        Scene::new()
    };
    let added = scene.insert_imported(entities);
    save_scene(&scene, scene_path)?;

    println!("imported {} entities into {}", added, scene_path.display());
    Ok(())
}

fn show_info(file: &Path, config: &PlacementConfig) -> Result<()> {
    let scene = open_scene(file)?;
    let entities = scene.export_entities();

    println!("objects: {}", scene.object_count());
    for category in [
        ShapeCategory::Wall,
        ShapeCategory::Room,
        ShapeCategory::Furniture,
        ShapeCategory::Dimension,
    ] {
        let count = scene.objects.iter().filter(|o| o.category == category).count();
        if count > 0 {
            println!("  {}: {}", category.name(), count);
        }
    }

    let walls = scene.wall_shapes();
    let segments: usize = walls.iter().map(WallShape::segment_count).sum();
    println!("wall segments: {segments}");

    for type_name in ["LINE", "LWPOLYLINE", "CIRCLE"] {
        let count = entities.iter().filter(|e| e.type_name() == type_name).count();
        println!("{type_name}: {count}");
    }
    match scene.bounds() {
        Some(bbox) => println!(
            "bounds: ({:.3}, {:.3}) - ({:.3}, {:.3}), {:.2} m x {:.2} m",
            bbox.min.x,
            bbox.min.y,
            bbox.max.x,
            bbox.max.y,
            bbox.width() / config.pixels_per_meter,
            bbox.height() / config.pixels_per_meter
        ),
        None => println!("bounds: empty"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Snap { scene, x, y } => snap(&scene, Point2::new(x, y)),
        Command::Place {
            scene,
            x,
            y,
            kind,
            write,
        } => place(&scene, Point2::new(x, y), kind.into(), write, &config),
        Command::Stairs {
            scene,
            x,
            y,
            width,
            height,
            angle,
        } => stairs(&scene, Point2::new(x, y), (width, height), angle, &config),
        Command::Measure { x1, y1, x2, y2 } => {
            let dim = measure(Point2::new(x1, y1), Point2::new(x2, y2), &config);
            println!("{} angle={:.3}", dim.label(), dim.angle);
            Ok(())
        }
        Command::Export { scene, output } => export(&scene, &output),
        Command::Import { input, scene } => import(&input, &scene),
        Command::Info { file } => show_info(&file, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plancad_core::math::points_approx_eq;
    use plancad_file::{ObjectPlacement, Primitive};

    fn scene_with_wall() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(
            ShapeCategory::Wall,
            ObjectPlacement::default(),
            vec![Primitive::Line {
                start: Point2::new(0.0, 0.0),
                end: Point2::new(100.0, 0.0),
            }],
        ));
        scene
    }

    #[test]
    fn test_freestanding_place_keeps_pointer() {
        let mut scene = scene_with_wall();
        let config = PlacementConfig::default();
        let pointer = Point2::new(13.0, 47.0);

        let placement = place_in_scene(&mut scene, pointer, SymbolKind::Door, false, &config);
        assert!(!placement.is_snapped());
        assert_eq!(placement.position, pointer);
        assert_eq!(placement.angle, 0.0);
        assert_eq!(scene.object_count(), 1);

        let written = place_in_scene(&mut scene, pointer, SymbolKind::Door, true, &config);
        assert_eq!(written, placement);
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.objects[1].placement.position, pointer);
    }

    #[test]
    fn test_snapped_place_uses_wall_point() {
        let mut scene = scene_with_wall();
        let placement = place_in_scene(
            &mut scene,
            Point2::new(13.0, 7.0),
            SymbolKind::Window,
            true,
            &PlacementConfig::default(),
        );
        assert!(placement.is_snapped());
        assert!(points_approx_eq(&placement.position, &Point2::new(13.0, 0.0)));
        assert_eq!(scene.objects[1].placement.position, placement.position);
    }

    #[test]
    fn test_measure_snaps_endpoints() {
        let config = PlacementConfig::default();
        let dim = measure(Point2::new(1.0, 2.0), Point2::new(79.0, -3.0), &config);
        assert_eq!(dim.start, Point2::new(0.0, 0.0));
        assert_eq!(dim.end, Point2::new(80.0, 0.0));
        assert_eq!(dim.label(), "2.00 m");

        let free = PlacementConfig {
            grid_snap: false,
            ..PlacementConfig::default()
        };
        let dim = measure(Point2::new(1.0, 2.0), Point2::new(79.0, 2.0), &free);
        assert_eq!(dim.label(), "1.95 m");
    }
}
