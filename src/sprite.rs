use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::{MinefieldError, Result};

/// An RGBA8 image.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| MinefieldError::SpriteLoad {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        Ok(Self::new(image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        self.image.put_pixel(x, y, Rgba(color));
    }

    /// Nearest-neighbour resample to `width` x `height`.
    pub fn scaled(&self, width: u32, height: u32) -> Sprite {
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        Self::new(imageops::resize(&self.image, width, height, FilterType::Nearest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_up_repeats_source_pixels() {
        let mut sprite = Sprite::filled(2, 2, [0, 0, 0, 255]);
        sprite.set_pixel(1, 0, [255, 0, 0, 255]);

        let big = sprite.scaled(4, 4);
        assert_eq!((big.width(), big.height()), (4, 4));
        assert_eq!(big.pixel(2, 0), [255, 0, 0, 255]);
        assert_eq!(big.pixel(3, 1), [255, 0, 0, 255]);
        assert_eq!(big.pixel(1, 1), [0, 0, 0, 255]);
        assert_eq!(big.pixel(3, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn scaling_down_keeps_block_colors() {
        let mut sprite = Sprite::filled(4, 4, [9, 9, 9, 255]);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            sprite.set_pixel(x, y, [1, 2, 3, 4]);
        }
        let small = sprite.scaled(2, 2);
        assert_eq!((small.width(), small.height()), (2, 2));
        assert_eq!(small.pixel(0, 0), [1, 2, 3, 4]);
        assert_eq!(small.pixel(1, 1), [9, 9, 9, 255]);
    }

    #[test]
    fn same_size_scale_is_identity() {
        let mut sprite = Sprite::filled(3, 3, [5, 5, 5, 255]);
        sprite.set_pixel(2, 1, [7, 7, 7, 255]);
        assert_eq!(sprite.scaled(3, 3), sprite);
    }
}
