use std::rc::Rc;

use crate::assets::{NumberSprite, SpriteId, SpriteSheet, NUMBER_SPRITES};
use crate::error::MinefieldError;
use crate::field::GridIndex;
use crate::geom::Vec2;
use crate::input::Button;
use crate::registry::{Content, Renderable};

/// Number of mines around an opened cell, always within 0..=8.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MineCount(u8);

impl MineCount {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MineCount {
    type Error = MinefieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value as usize <= NUMBER_SPRITES {
            Ok(Self(value))
        } else {
            Err(MinefieldError::InvalidMineCount(value))
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Idle,
    IdleSunken,
    Flag,
    Question,
    QuestionSunken,
    Bomb,
    BombWrong,
    BombExploded,
    Open(MineCount),
}

impl CellState {
    /// Opened with `count` neighbouring mines. Counts above eight are
    /// rejected.
    pub fn open(count: u8) -> Result<Self, MinefieldError> {
        MineCount::try_from(count).map(CellState::Open)
    }

    pub fn sprite_id(self) -> SpriteId {
        match self {
            CellState::Idle => SpriteId::Idle,
            CellState::IdleSunken => SpriteId::IdleSunken,
            CellState::Flag => SpriteId::Flag,
            CellState::Question => SpriteId::Question,
            CellState::QuestionSunken => SpriteId::QuestionSunken,
            CellState::Bomb => SpriteId::Bomb,
            CellState::BombWrong => SpriteId::BombWrong,
            CellState::BombExploded => SpriteId::BombExploded,
            CellState::Open(count) => match count.get() {
                0 => SpriteId::IdleSunken,
                n => SpriteId::Number(NumberSprite(n - 1)),
            },
        }
    }
}

/// One square of a field. Cells never move once their field is built.
#[derive(Debug)]
pub struct Cell {
    state: std::cell::Cell<CellState>,
    index: GridIndex,
    position: Vec2,
    sheet: Rc<SpriteSheet>,
}

impl Cell {
    pub(crate) fn new(index: GridIndex, position: Vec2, sheet: Rc<SpriteSheet>) -> Self {
        Self {
            state: std::cell::Cell::new(CellState::Idle),
            index,
            position,
            sheet,
        }
    }

    pub fn state(&self) -> CellState {
        self.state.get()
    }

    pub fn set_state(&self, state: CellState) {
        self.state.set(state);
    }

    pub fn index(&self) -> GridIndex {
        self.index
    }

    /// Top-left corner in world space.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn sprite_id(&self) -> SpriteId {
        self.state().sprite_id()
    }

    // Game rules are layered on top of the renderer; a click only reports.
    pub fn click(&self, button: Button) {
        log::debug!(
            "Click {:?} on cell ({}, {}) in state {:?}",
            button,
            self.index.row,
            self.index.col,
            self.state()
        );
    }
}

impl Renderable for Cell {
    fn content(&self, zoom: f64) -> Content {
        let edge = ((self.sheet.edge() as f64 * zoom) as u32).max(1);
        Content {
            position: self.position,
            sprite: self.sheet.get(self.sprite_id()).scaled(edge, edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> Cell {
        Cell::new(
            GridIndex::new(0, 0),
            Vec2::new(16.0, 32.0),
            Rc::new(SpriteSheet::placeholder(16)),
        )
    }

    #[test]
    fn blank_open_shares_idle_sunken_sprite() {
        let open = CellState::open(0).unwrap();
        assert_eq!(open.sprite_id(), CellState::IdleSunken.sprite_id());

        let cell = cell();
        cell.set_state(open);
        let blank = cell.content(1.0).sprite;
        cell.set_state(CellState::IdleSunken);
        assert_eq!(blank, cell.content(1.0).sprite);
    }

    #[test]
    fn open_count_picks_number_sprite() {
        let five = CellState::open(5).unwrap().sprite_id();
        assert_eq!(five, SpriteId::number(5).unwrap());
        assert_eq!(five.index() - SpriteId::number(1).unwrap().index(), 4);
        assert_eq!(CellState::open(1).unwrap().sprite_id(), SpriteId::number(1).unwrap());
        assert_eq!(CellState::open(8).unwrap().sprite_id(), SpriteId::number(8).unwrap());
    }

    #[test]
    fn open_count_above_eight_is_rejected() {
        assert!(matches!(
            CellState::open(9),
            Err(MinefieldError::InvalidMineCount(9))
        ));
    }

    #[test]
    fn every_state_has_a_sprite() {
        let sheet = SpriteSheet::placeholder(16);
        let states = [
            CellState::Idle,
            CellState::IdleSunken,
            CellState::Flag,
            CellState::Question,
            CellState::QuestionSunken,
            CellState::Bomb,
            CellState::BombWrong,
            CellState::BombExploded,
        ];
        let mut seen = std::collections::HashSet::new();
        for state in states {
            seen.insert(state.sprite_id());
            let sprite = sheet.get(state.sprite_id());
            assert_eq!(sprite.width(), 16);
        }
        assert_eq!(seen.len(), states.len());
    }

    #[test]
    fn content_tracks_current_zoom() {
        let cell = cell();
        let content = cell.content(1.5);
        assert_eq!(content.position, Vec2::new(16.0, 32.0));
        assert_eq!((content.sprite.width(), content.sprite.height()), (24, 24));

        let content = cell.content(0.75);
        assert_eq!(content.sprite.width(), 12);
    }

    #[test]
    fn click_leaves_state_alone() {
        let cell = cell();
        cell.set_state(CellState::Flag);
        cell.click(Button::Left);
        cell.click(Button::Right);
        assert_eq!(cell.state(), CellState::Flag);
    }
}
