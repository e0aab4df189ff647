//! Static tile map for level geometry
//!
//! The map is a row-major grid of solid or open cells built once from a text
//! playfield and never modified afterwards. Row 0 is the far edge of the
//! level: world plane `y` decreases as the row index increases.
//!
//! Tile `(column, row)` covers the half-open square
//! `[column * size, (column + 1) * size) - size / 2 - center` in x, and the
//! same in y using the flipped row `rows - 1 - row`. Points on a shared edge
//! belong to the tile with the larger world coordinate.

use crate::foundation::math::{try_normalize, Vec2};
use crate::physics::collision::{overlap_aabb, Quad, AABB};
use thiserror::Error;

/// Character marking a solid cell in a playfield
pub const SOLID_CELL: char = '*';

/// Largest grid index magnitude; coordinates of far-off points saturate here
const GRID_LIMIT: i64 = 1 << 40;

/// A single map cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    /// Whether shapes are pushed out of this cell
    pub is_collidable: bool,
}

impl Tile {
    /// A solid cell
    pub const SOLID: Self = Self { is_collidable: true };

    /// An open cell
    pub const OPEN: Self = Self { is_collidable: false };
}

/// Grid coordinates of a world point, not limited to the map bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column index (grows with world x)
    pub column: i64,
    /// Row index (grows as world y decreases)
    pub row: i64,
}

/// Inclusive rectangle of in-bounds tile indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// First column
    pub min_column: usize,
    /// Last column
    pub max_column: usize,
    /// First row
    pub min_row: usize,
    /// Last row
    pub max_row: usize,
}

impl TileRange {
    /// All `(column, row)` pairs in the range, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        let Self { min_column, max_column, min_row, max_row } = *self;
        (min_row..=max_row).flat_map(move |row| (min_column..=max_column).map(move |column| (column, row)))
    }
}

/// Errors building a tile map
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayfieldError {
    /// The playfield has no rows or no columns
    #[error("playfield is empty")]
    Empty,

    /// Tile size must be positive and finite
    #[error("invalid tile size: {0}")]
    InvalidTileSize(f32),
}

/// Grid of solid and open tiles covering the level
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    tiles: Vec<Vec<Tile>>,
    tile_size: f32,
    center: Vec2,
}

impl TileMap {
    /// Build a map from explicit rows
    ///
    /// Rows shorter than the longest one are padded with open tiles.
    /// `center` is subtracted from every tile position, so it is the world
    /// offset of grid origin relative to the unshifted layout.
    pub fn new(mut tiles: Vec<Vec<Tile>>, tile_size: f32, center: Vec2) -> Result<Self, PlayfieldError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(PlayfieldError::InvalidTileSize(tile_size));
        }

        let columns = tiles.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Err(PlayfieldError::Empty);
        }
        for row in &mut tiles {
            row.resize(columns, Tile::OPEN);
        }

        Ok(Self { tiles, tile_size, center })
    }

    /// Build a map from a text playfield, centered on the world origin
    ///
    /// One character per cell and one line per row; [`SOLID_CELL`] is solid
    /// and anything else is open. Grid width is the longest line.
    pub fn from_playfield(playfield: &str, tile_size: f32) -> Result<Self, PlayfieldError> {
        let tiles: Vec<Vec<Tile>> = playfield
            .lines()
            .map(|line| {
                line.chars()
                    .map(|c| Tile { is_collidable: c == SOLID_CELL })
                    .collect()
            })
            .collect();

        let columns = tiles.iter().map(Vec::len).max().unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let center = Vec2::new(
            columns.saturating_sub(1) as f32 * 0.5 * tile_size,
            tiles.len().saturating_sub(1) as f32 * 0.5 * tile_size,
        );

        let map = Self::new(tiles, tile_size, center)?;
        log::debug!(
            "Prepared {}x{} tile map ({} solid), tile size {}",
            map.columns(),
            map.rows(),
            map.solid_count(),
            tile_size
        );
        Ok(map)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    /// World units per tile edge
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World offset of the grid
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Tile at `(column, row)`, if in bounds
    pub fn tile(&self, column: usize, row: usize) -> Option<&Tile> {
        self.tiles.get(row)?.get(column)
    }

    /// Whether the tile is solid; out-of-bounds tiles are open
    pub fn is_collidable(&self, column: usize, row: usize) -> bool {
        self.tile(column, row).is_some_and(|tile| tile.is_collidable)
    }

    /// Number of solid tiles
    pub fn solid_count(&self) -> usize {
        self.tiles.iter().flatten().filter(|tile| tile.is_collidable).count()
    }

    /// World-space bounds of a tile
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_aabb(&self, column: usize, row: usize) -> AABB {
        let size = self.tile_size;
        let flipped_row = self.rows().saturating_sub(1).saturating_sub(row);
        let min = Vec2::new(
            column as f32 * size - size * 0.5,
            flipped_row as f32 * size - size * 0.5,
        ) - self.center;

        AABB::new(min, min + Vec2::repeat(size))
    }

    /// Position in grid units; tile `n` covers `[n, n + 1)` on each axis, rows unflipped
    fn grid_position(&self, point: Vec2) -> Vec2 {
        (point + self.center) / self.tile_size + Vec2::repeat(0.5)
    }

    /// Tile coordinates from whole grid positions, clamped to `GRID_LIMIT`
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn tile_coord(&self, column: f32, flipped_row: f32) -> TileCoord {
        let index = |value: f32| (value as i64).clamp(-GRID_LIMIT, GRID_LIMIT);

        TileCoord {
            column: index(column),
            row: self.rows() as i64 - 1 - index(flipped_row),
        }
    }

    /// Grid coordinates of the tile containing a world point
    ///
    /// Far-off points saturate at `GRID_LIMIT` tiles from the grid origin.
    pub fn point_to_tile_coordinates(&self, point: Vec2) -> TileCoord {
        let grid = self.grid_position(point);
        self.tile_coord(grid.x.floor(), grid.y.floor())
    }

    /// In-bounds tiles touched by an AABB, or `None` if it lies off the map
    ///
    /// A bounds edge lying exactly on a tile edge takes in the tiles on both
    /// sides of it.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn tile_range(&self, bounds: &AABB) -> Option<TileRange> {
        let low = self.grid_position(bounds.min).map(|value| value.ceil() - 1.0);
        let low = self.tile_coord(low.x, low.y);
        let high = self.point_to_tile_coordinates(bounds.max);

        let clamp = |first: i64, last: i64, count: usize| -> Option<(usize, usize)> {
            let count = count as i64;
            if last < 0 || first >= count || first > last {
                return None;
            }
            Some((first.max(0) as usize, last.min(count - 1) as usize))
        };

        let (min_column, max_column) = clamp(low.column, high.column, self.columns())?;
        // The max corner sits on the lower row index
        let (min_row, max_row) = clamp(high.row, low.row, self.rows())?;

        Some(TileRange { min_column, max_column, min_row, max_row })
    }

    /// Push-out vector for a shape overlapping solid tiles
    ///
    /// Only tiles under the shape's bounds are tested. Each overlapping tile
    /// pushes along the direction from its center to the center of the
    /// shape's bounds, scaled by its penetration depth, and the pushes are
    /// summed. When the two centers coincide the tile's SAT normal is used
    /// instead. A tile in exact contact counts as overlapping and adds no
    /// push. Returns `None` when no solid tile overlaps the shape.
    pub fn check_collision(&self, quad: &Quad) -> Option<Vec2> {
        let bounds = quad.bounds();
        let range = self.tile_range(&bounds)?;
        let shape_center = bounds.center();

        let mut ejection = Vec2::zeros();
        let mut hits = 0_usize;
        for (column, row) in range.iter() {
            if !self.is_collidable(column, row) {
                continue;
            }

            let tile = self.tile_aabb(column, row);
            let Some(hit) = overlap_aabb(&tile, quad) else {
                continue;
            };

            let direction = try_normalize(&(shape_center - tile.center())).unwrap_or(hit.normal);
            ejection += direction * hit.depth;
            hits += 1;
        }

        if hits == 0 {
            return None;
        }

        log::trace!(
            "Shape at ({:.3}, {:.3}) overlaps {} tile(s), ejection ({:.3}, {:.3})",
            shape_center.x,
            shape_center.y,
            hits,
            ejection.x,
            ejection.y
        );
        Some(ejection)
    }
}
