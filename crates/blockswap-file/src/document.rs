//! DXF文档数据模型
//!
//! 在 `dxf::Drawing` 之上提供块表和模型空间块参照的编辑操作。
//! 图纸空间实体不属于模型空间，所有操作都不会触及。

use crate::error::FileError;
use blockswap_core::block::{BlockName, Placement};
use dxf::entities::{Entity, EntityType, Insert};
use std::path::Path;

/// DXF文档
pub struct Document {
    drawing: dxf::Drawing,
}

impl Document {
    /// 包装已有图纸
    pub fn from_drawing(drawing: dxf::Drawing) -> Self {
        Self { drawing }
    }

    /// 从文件加载
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileError> {
        Ok(Self::from_drawing(crate::dxf_io::load(path.as_ref())?))
    }

    /// 另存为
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        crate::dxf_io::save(&self.drawing, path.as_ref())
    }

    // ===== 块参照 =====

    /// 引用指定块的块参照数量（模型空间和图纸空间）
    pub fn reference_count(&self, name: &BlockName) -> usize {
        self.drawing
            .entities()
            .filter_map(insert_of)
            .filter(|insert| name.matches(&insert.name))
            .count()
    }

    /// 删除模型空间中引用指定块的所有块参照，返回删除数量
    pub fn remove_placements(&mut self, name: &BlockName) -> usize {
        let indices: Vec<usize> = self
            .drawing
            .entities()
            .enumerate()
            .filter_map(|(index, entity)| {
                model_space_insert(entity)
                    .filter(|insert| name.matches(&insert.name))
                    .map(|_| index)
            })
            .collect();

        // 从后往前删除，保持前面的索引有效
        let mut removed = 0;
        for index in indices.into_iter().rev() {
            if self.drawing.remove_entity(index).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// 在模型空间插入一个块参照
    pub fn add_placement(&mut self, placement: &Placement) {
        let mut insert = Insert::default();
        insert.name = placement.block_name.clone();
        insert.location = dxf::Point::new(placement.insertion_point.x, placement.insertion_point.y, 0.0);
        self.drawing.add_entity(Entity::new(EntityType::Insert(insert)));
    }

    // ===== 块表 =====

    /// 获取块定义
    pub fn block(&self, name: &BlockName) -> Option<&dxf::Block> {
        self.drawing.blocks().find(|block| name.matches(&block.name))
    }

    /// 删除块定义，返回删除的定义数量
    ///
    /// 仍被块参照引用的定义只能在随后以同名定义替换时删除。
    pub fn remove_block(&mut self, name: &BlockName) -> usize {
        let indices: Vec<usize> = self
            .drawing
            .blocks()
            .enumerate()
            .filter(|(_, block)| name.matches(&block.name))
            .map(|(index, _)| index)
            .collect();

        let mut removed = 0;
        for index in indices.into_iter().rev() {
            if self.drawing.remove_block(index).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// 以同名新定义复制另一文档中的块
    ///
    /// 只复制实体；基点为原点。复制的实体清除句柄，由目标图纸重新分配。
    pub fn copy_block_from(&mut self, source: &dxf::Block) {
        let mut block = dxf::Block::default();
        block.name = source.name.clone();
        block.entities = source
            .entities
            .iter()
            .map(|entity| {
                let mut entity = entity.clone();
                entity.common.handle = dxf::Handle::empty();
                entity
            })
            .collect();
        self.drawing.add_block(block);
    }
}

#[cfg(test)]
impl Document {
    pub fn new() -> Self {
        Self::from_drawing(dxf::Drawing::new())
    }

    pub fn drawing(&self) -> &dxf::Drawing {
        &self.drawing
    }

    pub fn into_drawing(self) -> dxf::Drawing {
        self.drawing
    }

    /// 模型空间中的所有块参照（按实体顺序）
    pub fn placements(&self) -> Vec<Placement> {
        self.drawing
            .entities()
            .filter_map(model_space_insert)
            .map(|insert| {
                Placement::new(
                    insert.name.clone(),
                    blockswap_core::math::Point2::new(insert.location.x, insert.location.y),
                )
            })
            .collect()
    }

    pub fn placement_count(&self, name: &BlockName) -> usize {
        self.placements()
            .iter()
            .filter(|p| p.references(name))
            .count()
    }

    pub fn contains_block(&self, name: &BlockName) -> bool {
        self.block(name).is_some()
    }

    pub fn block_names(&self) -> Vec<&str> {
        self.drawing.blocks().map(|b| b.name.as_str()).collect()
    }
}

fn insert_of(entity: &Entity) -> Option<&Insert> {
    match &entity.specific {
        EntityType::Insert(insert) => Some(insert),
        _ => None,
    }
}

/// 模型空间中的 INSERT 实体
fn model_space_insert(entity: &Entity) -> Option<&Insert> {
    if entity.common.is_in_paper_space {
        return None;
    }
    insert_of(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{add_paper_space_insert, source_drawing, template_drawing};
    use blockswap_core::math::Point2;

    fn door() -> BlockName {
        BlockName::new("Door").unwrap()
    }

    #[test]
    fn test_remove_placements_counts_matches() {
        let mut document = Document::from_drawing(source_drawing("Door", 3));

        assert_eq!(document.placement_count(&door()), 3);
        assert_eq!(document.remove_placements(&door()), 3);
        assert_eq!(document.placement_count(&door()), 0);

        // 其他块参照和普通实体保留
        let remaining = document.placements();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].block_name, "Other");
        assert_eq!(document.drawing().entities().count(), 2);
    }

    #[test]
    fn test_remove_placements_ignores_case() {
        let mut document = Document::from_drawing(source_drawing("DOOR", 2));
        assert_eq!(document.remove_placements(&door()), 2);
    }

    #[test]
    fn test_paper_space_inserts_untouched() {
        let mut drawing = source_drawing("Door", 1);
        add_paper_space_insert(&mut drawing, "Door");

        let mut document = Document::from_drawing(drawing);
        assert_eq!(document.reference_count(&door()), 2);
        assert_eq!(document.remove_placements(&door()), 1);
        assert_eq!(document.drawing().entities().count(), 3);
        assert_eq!(document.reference_count(&door()), 1);
    }

    #[test]
    fn test_remove_and_copy_block() {
        let mut document = Document::from_drawing(source_drawing("Door", 1));
        let template = Document::from_drawing(template_drawing("Door"));

        document.remove_placements(&door());
        assert_eq!(document.remove_block(&door()), 1);
        assert!(!document.contains_block(&door()));
        assert!(document.block_names().contains(&"Other"));

        document.copy_block_from(template.block(&door()).unwrap());
        let block = document.block(&door()).unwrap();
        assert_eq!(block.entities.len(), 2);
        assert!(block
            .entities
            .iter()
            .all(|e| matches!(e.specific, EntityType::Circle(_))));
    }

    #[test]
    fn test_add_placement_at_point() {
        let mut document = Document::new();
        document.add_placement(&Placement::new("Door", Point2::new(3.0, 4.0)));

        let placements = document.placements();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].insertion_point, Point2::new(3.0, 4.0));
    }
}
