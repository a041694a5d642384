//! Tile grid for level terrain
//!
//! Row-major grid of tile kinds. Reads are lenient (anything outside the
//! grid is empty air), writes are bounds-checked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by tile grid mutation or parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("tile ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },
    #[error("unknown tile code {0:?}")]
    UnknownTile(char),
}

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Platform,
    /// Hazard art; has no collision effect yet
    Spike,
    /// Mushroom pickup placed directly in the level, consumed on touch
    MushroomSpawner,
    FloatingPlatform,
    /// One-shot block: turns Empty when struck from below
    QuestionBlock,
    Pipe,
    Coin,
    /// Decorative; the finish is an x threshold
    Castle,
}

impl TileKind {
    /// Whether bodies collide with this tile
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            TileKind::Platform | TileKind::QuestionBlock | TileKind::FloatingPlatform | TileKind::Pipe
        )
    }

    /// Character used in level layouts
    pub fn as_char(self) -> char {
        match self {
            TileKind::Empty => '.',
            TileKind::Platform => '#',
            TileKind::Spike => '^',
            TileKind::MushroomSpawner => 'm',
            TileKind::FloatingPlatform => '=',
            TileKind::QuestionBlock => '?',
            TileKind::Pipe => 'P',
            TileKind::Coin => 'o',
            TileKind::Castle => 'C',
        }
    }

    pub fn from_char(c: char) -> Result<Self, TileError> {
        Ok(match c {
            '.' | ' ' => TileKind::Empty,
            '#' => TileKind::Platform,
            '^' => TileKind::Spike,
            'm' => TileKind::MushroomSpawner,
            '=' => TileKind::FloatingPlatform,
            '?' => TileKind::QuestionBlock,
            'P' => TileKind::Pipe,
            'o' => TileKind::Coin,
            'C' => TileKind::Castle,
            other => return Err(TileError::UnknownTile(other)),
        })
    }
}

/// Rectangular grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: Vec<Vec<TileKind>>,
    width: usize,
}

impl TileGrid {
    /// Build a grid from rows, padding short rows with Empty
    pub fn from_rows(mut rows: Vec<Vec<TileKind>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, TileKind::Empty);
        }
        Self { rows, width }
    }

    /// Parse a grid from layout strings (one string per row)
    pub fn parse(lines: &[&str]) -> Result<Self, TileError> {
        let rows = lines
            .iter()
            .map(|line| line.chars().map(TileKind::from_char).collect())
            .collect::<Result<Vec<Vec<_>>, _>>()?;
        Ok(Self::from_rows(rows))
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<TileKind>] {
        &self.rows
    }

    fn index(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        (r < self.rows.len() && c < self.width).then_some((r, c))
    }

    /// Tile at (row, col), or None outside the grid
    pub fn tile_at(&self, row: i32, col: i32) -> Option<TileKind> {
        self.index(row, col).map(|(r, c)| self.rows[r][c])
    }

    /// Solidity query; out-of-range cells are never solid
    pub fn solid_at(&self, row: i32, col: i32) -> bool {
        self.tile_at(row, col).is_some_and(TileKind::is_solid)
    }

    /// Overwrite a cell, rejecting writes outside the grid
    pub fn set_tile(&mut self, row: i32, col: i32, kind: TileKind) -> Result<(), TileError> {
        let (r, c) = self
            .index(row, col)
            .ok_or(TileError::OutOfBounds { row, col })?;
        self.rows[r][c] = kind;
        Ok(())
    }

    /// Replace every cell with a copy of `pristine`
    pub fn restore(&mut self, pristine: &TileGrid) {
        self.rows.clone_from(&pristine.rows);
        self.width = pristine.width;
    }

    /// Count tiles of a kind (used by tests and HUD summaries)
    pub fn count(&self, kind: TileKind) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == kind)
            .count()
    }
}
