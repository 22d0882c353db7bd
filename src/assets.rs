//! The sprite sheet every cell draws from.
//!
//! One [`SpriteSheet`] is built at startup and shared by `Rc` with each
//! field and cell. All sprites are square and share one edge length, which
//! becomes the field's cell size.

use std::path::{Path, PathBuf};

use crate::error::{MinefieldError, Result};
use crate::sprite::Sprite;

pub const NUMBER_SPRITES: usize = 8;
pub const SPRITE_COUNT: usize = 8 + NUMBER_SPRITES;

/// Identifies one sprite in the sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Idle,
    IdleSunken,
    Flag,
    Question,
    QuestionSunken,
    Bomb,
    BombExploded,
    BombWrong,
    /// Number sprite for 1..=8 adjacent mines.
    Number(NumberSprite),
}

/// Offset into the eight number sprites. Only built through
/// [`SpriteId::number`] outside this crate, so it is always in range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumberSprite(pub(crate) u8);

impl NumberSprite {
    /// The mine count this sprite shows, 1..=8.
    pub fn count(self) -> u8 {
        self.0 + 1
    }
}

impl SpriteId {
    /// Number sprite for `count` adjacent mines; `None` outside 1..=8.
    pub fn number(count: u8) -> Option<Self> {
        (1..=NUMBER_SPRITES as u8)
            .contains(&count)
            .then(|| SpriteId::Number(NumberSprite(count - 1)))
    }

    /// Position in the sheet, which also matches the `minesweeper_NN.png`
    /// file number.
    pub fn index(self) -> usize {
        match self {
            SpriteId::Idle => 0,
            SpriteId::IdleSunken => 1,
            SpriteId::Flag => 2,
            SpriteId::Question => 3,
            SpriteId::QuestionSunken => 4,
            SpriteId::Bomb => 5,
            SpriteId::BombExploded => 6,
            SpriteId::BombWrong => 7,
            SpriteId::Number(n) => 8 + n.0 as usize,
        }
    }
}

#[derive(Debug)]
pub struct SpriteSheet {
    sprites: Vec<Sprite>,
    edge: u32,
}

impl SpriteSheet {
    /// Builds a sheet from sprites ordered by [`SpriteId::index`].
    pub fn from_sprites(sprites: Vec<Sprite>) -> Result<Self> {
        if sprites.len() != SPRITE_COUNT {
            return Err(MinefieldError::SpriteCount {
                expected: SPRITE_COUNT,
                actual: sprites.len(),
            });
        }
        let edge = sprites[0].width();
        for (i, sprite) in sprites.iter().enumerate() {
            if sprite.width() != edge || sprite.height() != edge {
                return Err(MinefieldError::SpriteSize {
                    path: sprite_file_name(i),
                    width: sprite.width(),
                    height: sprite.height(),
                    expected: edge,
                });
            }
        }
        Ok(Self { sprites, edge })
    }

    /// Loads `minesweeper_00.png` through `minesweeper_15.png` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let sprites = (0..SPRITE_COUNT)
            .map(|i| Sprite::load(&dir.join(sprite_file_name(i))))
            .collect::<Result<Vec<_>>>()?;
        log::info!("Loaded {} sprites from {}", sprites.len(), dir.display());
        Self::from_sprites(sprites)
    }

    /// Loads from `dir`, falling back to [`SpriteSheet::placeholder`] when
    /// the directory does not exist.
    pub fn load_or_placeholder(dir: &Path, edge: u32) -> Result<Self> {
        if dir.is_dir() {
            Self::load(dir)
        } else {
            log::warn!(
                "Sprite directory {} not found, using generated sprites",
                dir.display()
            );
            Ok(Self::placeholder(edge))
        }
    }

    /// Flat-shaded stand-ins: raised tiles for covered states, sunken tiles
    /// for revealed ones, and a coloured marker in the middle where the real
    /// artwork would carry an icon or digit.
    pub fn placeholder(edge: u32) -> Self {
        let edge = edge.max(4);
        let marker = |color: [u8; 4], raised: bool| {
            let mut sprite = tile(edge, raised);
            let inset = edge / 3;
            for y in inset..edge - inset {
                for x in inset..edge - inset {
                    sprite.set_pixel(x, y, color);
                }
            }
            sprite
        };

        let mut sprites = vec![
            tile(edge, true),
            tile(edge, false),
            marker([220, 30, 30, 255], true),
            marker([40, 40, 200, 255], true),
            marker([40, 40, 200, 255], false),
            marker([10, 10, 10, 255], false),
            marker([255, 96, 0, 255], false),
            marker([120, 0, 120, 255], false),
        ];
        const DIGIT_COLORS: [[u8; 4]; NUMBER_SPRITES] = [
            [0, 0, 255, 255],
            [0, 128, 0, 255],
            [255, 0, 0, 255],
            [0, 0, 128, 255],
            [128, 0, 0, 255],
            [0, 128, 128, 255],
            [0, 0, 0, 255],
            [128, 128, 128, 255],
        ];
        sprites.extend(DIGIT_COLORS.iter().map(|&c| marker(c, false)));

        Self { sprites, edge }
    }

    /// Native edge length in pixels.
    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        &self.sprites[id.index()]
    }
}

fn sprite_file_name(index: usize) -> PathBuf {
    PathBuf::from(format!("minesweeper_{:02}.png", index))
}

fn tile(edge: u32, raised: bool) -> Sprite {
    let face = [192, 192, 192, 255];
    let light = [255, 255, 255, 255];
    let dark = [128, 128, 128, 255];
    let mut sprite = Sprite::filled(edge, edge, face);
    for i in 0..edge {
        if raised {
            sprite.set_pixel(i, 0, light);
            sprite.set_pixel(0, i, light);
            sprite.set_pixel(i, edge - 1, dark);
            sprite.set_pixel(edge - 1, i, dark);
        } else {
            sprite.set_pixel(i, 0, dark);
            sprite.set_pixel(0, i, dark);
        }
    }
    sprite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_ids_follow_file_numbering() {
        assert_eq!(SpriteId::Idle.index(), 0);
        assert_eq!(SpriteId::BombWrong.index(), 7);
        assert_eq!(SpriteId::number(1).unwrap().index(), 8);
        assert_eq!(SpriteId::number(8).unwrap().index(), 15);
        assert_eq!(sprite_file_name(9), PathBuf::from("minesweeper_09.png"));
    }

    #[test]
    fn number_ids_are_range_checked() {
        assert_eq!(SpriteId::number(0), None);
        assert_eq!(SpriteId::number(9), None);
        match SpriteId::number(5) {
            Some(SpriteId::Number(n)) => assert_eq!(n.count(), 5),
            other => panic!("expected number sprite, got {:?}", other),
        }

        // Every id that can be built resolves without going out of bounds
        let sheet = SpriteSheet::placeholder(16);
        for count in 0..=u8::MAX {
            if let Some(id) = SpriteId::number(count) {
                assert_eq!(sheet.get(id).width(), 16);
            }
        }
    }

    #[test]
    fn sheet_rejects_mismatched_sizes() {
        let mut sprites = vec![Sprite::filled(16, 16, [0; 4]); SPRITE_COUNT];
        sprites[3] = Sprite::filled(16, 12, [0; 4]);
        match SpriteSheet::from_sprites(sprites) {
            Err(MinefieldError::SpriteSize {
                width,
                height,
                expected,
                ..
            }) => {
                assert_eq!((width, height, expected), (16, 12, 16));
            }
            other => panic!("expected size error, got {:?}", other),
        }
    }

    #[test]
    fn sheet_rejects_wrong_count() {
        let sprites = vec![Sprite::filled(16, 16, [0; 4]); 3];
        assert!(matches!(
            SpriteSheet::from_sprites(sprites),
            Err(MinefieldError::SpriteCount { actual: 3, .. })
        ));
    }

    #[test]
    fn placeholder_is_uniform() {
        let sheet = SpriteSheet::placeholder(16);
        assert_eq!(sheet.edge(), 16);
        for count in 1..=NUMBER_SPRITES as u8 {
            let sprite = sheet.get(SpriteId::number(count).unwrap());
            assert_eq!((sprite.width(), sprite.height()), (16, 16));
        }
        assert_ne!(sheet.get(SpriteId::Idle), sheet.get(SpriteId::IdleSunken));
    }

    #[test]
    fn missing_directory_falls_back() {
        let sheet =
            SpriteSheet::load_or_placeholder(Path::new("/nonexistent/minefield-sprites"), 20)
                .unwrap();
        assert_eq!(sheet.edge(), 20);
    }
}
