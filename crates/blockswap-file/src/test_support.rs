//! 测试用图纸构造

use crate::document::Document;
use blockswap_core::block::Placement;
use blockswap_core::math::Point2;
use dxf::entities::{Circle, Entity, EntityType, Insert, Line};
use std::path::{Path, PathBuf};

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
    let mut line = Line::default();
    line.p1 = dxf::Point::new(x1, y1, 0.0);
    line.p2 = dxf::Point::new(x2, y2, 0.0);
    Entity::new(EntityType::Line(line))
}

pub fn circle(radius: f64) -> Entity {
    let mut circle = Circle::default();
    circle.radius = radius;
    Entity::new(EntityType::Circle(circle))
}

/// 添加块定义
pub fn add_block(drawing: &mut dxf::Drawing, name: &str, entities: Vec<Entity>) {
    let mut block = dxf::Block::default();
    block.name = name.to_string();
    block.entities = entities;
    drawing.add_block(block);
}

/// 源图纸：块 `name`（一条线）在模型空间中插入 `placements` 次，另有一条普通线
pub fn source_drawing(name: &str, placements: usize) -> dxf::Drawing {
    let mut drawing = dxf::Drawing::new();
    add_block(&mut drawing, name, vec![line(0.0, 0.0, 10.0, 0.0)]);
    add_block(&mut drawing, "Other", vec![line(0.0, 0.0, 0.0, 5.0)]);
    drawing.add_entity(line(0.0, 0.0, 100.0, 100.0));

    let mut document = Document::from_drawing(drawing);
    for i in 0..placements {
        document.add_placement(&Placement::new(name, Point2::new(i as f64 * 20.0, 50.0)));
    }
    document.add_placement(&Placement::new("Other", Point2::new(-20.0, -20.0)));

    document.into_drawing()
}

/// 图纸空间中插入块 `name`
pub fn add_paper_space_insert(drawing: &mut dxf::Drawing, name: &str) {
    let mut insert = Insert::default();
    insert.name = name.to_string();
    let mut entity = Entity::new(EntityType::Insert(insert));
    entity.common.is_in_paper_space = true;
    drawing.add_entity(entity);
}

/// 模板图纸：块 `name` 由一个圆组成
pub fn template_drawing(name: &str) -> dxf::Drawing {
    let mut drawing = dxf::Drawing::new();
    add_block(&mut drawing, name, vec![circle(5.0), circle(2.5)]);
    drawing
}

pub fn write_drawing(dir: &Path, file_name: &str, drawing: &dxf::Drawing) -> PathBuf {
    let path = dir.join(file_name);
    drawing.save_file(&path).unwrap();
    path
}
