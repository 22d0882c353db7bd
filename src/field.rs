use std::rc::Rc;

use crate::assets::SpriteSheet;
use crate::cell::Cell;
use crate::error::{MinefieldError, Result};
use crate::geom::Vec2;
use crate::input::Button;
use crate::registry::{RenderHandle, SharedRenderList};
use crate::viewport::Viewport;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub row: usize,
    pub col: usize,
}

impl GridIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A fixed grid of cells anchored at a world-space origin.
///
/// Every cell is registered with the viewport's paint list when the field is
/// built and deregistered by [`Field::teardown`] or when the field is
/// dropped, whichever happens first.
pub struct Field {
    origin: Vec2,
    cols: usize,
    rows: usize,
    cell_size: f64,
    cells: Vec<Vec<Rc<Cell>>>, // [row][col]
    render_list: SharedRenderList,
    registered: bool,
}

impl Field {
    pub fn new(
        viewport: &Viewport,
        origin: Vec2,
        (cols, rows): (usize, usize),
        sheet: Rc<SpriteSheet>,
    ) -> Self {
        let cell_size = sheet.edge() as f64;
        let cells: Vec<Vec<Rc<Cell>>> = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let position = origin + Vec2::new(col as f64, row as f64) * cell_size;
                        Rc::new(Cell::new(GridIndex::new(row, col), position, sheet.clone()))
                    })
                    .collect()
            })
            .collect();

        let render_list = viewport.render_list();
        {
            let mut list = render_list.borrow_mut();
            for cell in cells.iter().flatten() {
                let handle: RenderHandle = cell.clone();
                list.register(handle);
            }
        }
        log::info!(
            "Field {}x{} at ({}, {}), cell size {}",
            cols,
            rows,
            origin.x,
            origin.y,
            cell_size
        );

        Self {
            origin,
            cols,
            rows,
            cell_size,
            cells,
            render_list,
            registered: true,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// `(cols, rows)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World-space extent, width by height.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.cols as f64, self.rows as f64) * self.cell_size
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(|cell| &**cell)
            .ok_or(MinefieldError::IndexOutOfRange {
                row: row as i64,
                col: col as i64,
                rows: self.rows,
                cols: self.cols,
            })
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten().map(|cell| &**cell)
    }

    /// Whether `screen` lies strictly inside the field's on-screen rectangle.
    /// Points on an edge are outside.
    pub fn contains_point(&self, viewport: &Viewport, screen: Vec2) -> bool {
        let top_left = viewport.to_screen(self.origin);
        let bottom_right = viewport.to_screen(self.origin + self.extent());
        top_left.x < screen.x
            && screen.x < bottom_right.x
            && top_left.y < screen.y
            && screen.y < bottom_right.y
    }

    /// Maps a screen position to the cell under it. Positions that land
    /// outside the grid are reported as [`MinefieldError::IndexOutOfRange`].
    pub fn resolve_grid_index(&self, viewport: &Viewport, screen: Vec2) -> Result<GridIndex> {
        let local = (viewport.to_world(screen) - self.origin) / self.cell_size;
        let col = local.x.floor() as i64;
        let row = local.y.floor() as i64;

        if (0..self.cols as i64).contains(&col) && (0..self.rows as i64).contains(&row) {
            Ok(GridIndex::new(row as usize, col as usize))
        } else {
            Err(MinefieldError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Forwards a click to the cell under `screen`, if any. Returns the
    /// index of the cell that received it.
    pub fn dispatch_click(
        &self,
        viewport: &Viewport,
        screen: Vec2,
        button: Button,
    ) -> Option<GridIndex> {
        if !self.contains_point(viewport, screen) {
            return None;
        }
        match self.resolve_grid_index(viewport, screen) {
            Ok(index) => {
                self.cells[index.row][index.col].click(button);
                Some(index)
            }
            Err(err) => {
                // Only reachable through float rounding right at an edge
                log::warn!("Click at ({}, {}) not dispatched: {}", screen.x, screen.y, err);
                None
            }
        }
    }

    /// Removes every cell from the viewport's paint list.
    pub fn teardown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.registered {
            return;
        }
        let mut list = self.render_list.borrow_mut();
        for cell in self.cells.iter().flatten() {
            let handle: RenderHandle = cell.clone();
            list.deregister(&handle);
        }
        self.registered = false;
        log::debug!("Field {}x{} released", self.cols, self.rows);
    }
}

impl Drop for Field {
    fn drop(&mut self) {
        self.release();
    }
}
