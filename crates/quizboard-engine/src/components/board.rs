//! The tile grid for the current round.
//!
//! Built wholesale from round data and rebuilt wholesale on round
//! advance. Layout is recomputed every frame from grid cardinality and
//! the current viewport, so the grid follows a resize without any tile
//! being recreated.

use std::fmt;

use crate::api::game::FrameContext;
use crate::assets::game_data::Category;
use crate::core::geometry::Rect;
use crate::core::lifetime::Lifetime;
use crate::renderer::traits::Painter;
use crate::components::tile::{Tile, TileState};

/// Scene draw order for the board entity.
pub const BOARD_DRAW_ORDER: i32 = 0;

/// A command addressed a tile the grid cannot resolve. Dropped loudly
/// instead of drawing a corrupt grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    UnknownCategory(String),
    UnknownLabel { category: String, label: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(category) => {
                write!(f, "no category \"{category}\" on the board")
            }
            Self::UnknownLabel { category, label } => {
                write!(f, "category \"{category}\" has no tile labeled \"{label}\"")
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[derive(Debug, Clone)]
struct Column {
    key: String,
    name: String,
    /// Row 0 is the header; rows 1.. are value tiles in source order.
    tiles: Vec<Tile>,
}

#[derive(Debug, Clone)]
pub struct Board {
    lifetime: Lifetime,
    columns: Vec<Column>,
    rect: Rect,
}

impl Board {
    /// Build the grid for one round: one column per category, row 0 a
    /// header tile, then one tile per label preserving source order.
    pub fn from_round(categories: &[Category]) -> Self {
        let columns = categories
            .iter()
            .map(|category| {
                let mut tiles = Vec::with_capacity(category.tiles.len() + 1);
                tiles.push(Tile::header(&category.key, &category.name));
                for tile in &category.tiles {
                    tiles.push(Tile::value(
                        &category.key,
                        &tile.label,
                        &tile.clue,
                        &tile.answer,
                    ));
                }
                Column {
                    key: category.key.clone(),
                    name: category.name.clone(),
                    tiles,
                }
            })
            .collect();

        Self {
            lifetime: Lifetime::new(),
            columns,
            rect: Rect::default(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Rows including the header row.
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.tiles.len())
    }

    pub fn tile(&self, col: usize, row: usize) -> Option<&Tile> {
        self.columns.get(col).and_then(|c| c.tiles.get(row))
    }

    /// Canonical coordinate resolution: category key (display name as
    /// fallback) plus tile label, to (column, row).
    pub fn resolve(&self, category: &str, label: &str) -> Result<(usize, usize), BoardError> {
        let col = self
            .columns
            .iter()
            .position(|c| c.key == category)
            .or_else(|| self.columns.iter().position(|c| c.name == category))
            .ok_or_else(|| BoardError::UnknownCategory(category.to_string()))?;

        let row = self.columns[col]
            .tiles
            .iter()
            .skip(1)
            .position(|t| t.label() == label)
            .map(|i| i + 1)
            .ok_or_else(|| BoardError::UnknownLabel {
                category: category.to_string(),
                label: label.to_string(),
            })?;

        Ok((col, row))
    }

    /// Reveal a tile's clue. Returns whether the tile actually
    /// transitioned (false for an already-revealed or answered tile).
    pub fn reveal(&mut self, category: &str, label: &str) -> Result<bool, BoardError> {
        let (col, row) = self.resolve(category, label)?;
        Ok(self.columns[col].tiles[row].reveal())
    }

    pub fn mark_answered(&mut self, category: &str, label: &str) -> Result<bool, BoardError> {
        let (col, row) = self.resolve(category, label)?;
        Ok(self.columns[col].tiles[row].mark_answered())
    }

    pub fn flicker_tile(
        &mut self,
        category: &str,
        label: &str,
        count: u32,
        interval: f32,
    ) -> Result<(), BoardError> {
        let (col, row) = self.resolve(category, label)?;
        self.columns[col].tiles[row].flicker(count, interval);
        Ok(())
    }

    /// Highlight every tile in a category's column.
    pub fn set_column_highlight(&mut self, category: &str) -> Result<(), BoardError> {
        self.column_mut(category)?
            .tiles
            .iter_mut()
            .for_each(Tile::set_highlight);
        Ok(())
    }

    pub fn unset_column_highlight(&mut self, category: &str) -> Result<(), BoardError> {
        self.column_mut(category)?
            .tiles
            .iter_mut()
            .for_each(Tile::unset_highlight);
        Ok(())
    }

    fn column_mut(&mut self, category: &str) -> Result<&mut Column, BoardError> {
        let col = self
            .columns
            .iter()
            .position(|c| c.key == category)
            .or_else(|| self.columns.iter().position(|c| c.name == category))
            .ok_or_else(|| BoardError::UnknownCategory(category.to_string()))?;
        Ok(&mut self.columns[col])
    }

    pub fn update(&mut self, dt: f32, frame: &FrameContext) {
        self.lifetime.tick(dt);
        self.rect = frame.board_area;
        self.layout();
        for column in &mut self.columns {
            for tile in &mut column.tiles {
                tile.update(dt);
            }
        }
    }

    /// Tile geometry derives from the grid: width divides by column
    /// count, height by row count, positions left-to-right and
    /// top-to-bottom. Tiles never store authoritative geometry.
    fn layout(&mut self) {
        let cols = self.columns.len();
        let rows = self.rows();
        if cols == 0 || rows == 0 {
            return;
        }
        let tile_w = self.rect.size.x / cols as f32;
        let tile_h = self.rect.size.y / rows as f32;
        for (col, column) in self.columns.iter_mut().enumerate() {
            for (row, tile) in column.tiles.iter_mut().enumerate() {
                // A revealed tile takes over the whole content area until
                // it is answered.
                tile.rect = if tile.state() == TileState::Clue {
                    self.rect
                } else {
                    Rect::new(
                        self.rect.pos.x + col as f32 * tile_w,
                        self.rect.pos.y + row as f32 * tile_h,
                        tile_w,
                        tile_h,
                    )
                };
            }
        }
    }

    pub fn draw(&self, painter: &mut dyn Painter, frame: &FrameContext) {
        let mut tiles: Vec<&Tile> = self
            .columns
            .iter()
            .flat_map(|c| c.tiles.iter())
            .collect();
        // Stable: tiles at equal order keep grid order, so the revealed
        // tile reliably paints above its siblings.
        tiles.sort_by_key(|t| t.draw_order());
        for tile in tiles {
            tile.draw(painter, frame.scale, self.rect);
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime.is_dead()
    }

    pub fn kill(&mut self) {
        self.lifetime.kill();
    }
}
