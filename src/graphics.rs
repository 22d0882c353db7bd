use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::sprite::Sprite;
use crate::viewport::Viewport;

/// Anything a sprite can be composited onto.
pub trait Surface {
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32);
}

/// A borrowed RGBA8 frame buffer.
pub struct FrameSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(frame.len(), (width * height * 4) as usize);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }
}

impl Surface for FrameSurface<'_> {
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        // Clip the sprite rectangle against the frame
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + sprite.width() as i32).min(self.width as i32);
        let y1 = (y + sprite.height() as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for py in y0..y1 {
            for px in x0..x1 {
                let src = sprite.pixel((px - x) as u32, (py - y) as u32);
                let alpha = src[3] as u16;
                if alpha == 0 {
                    continue;
                }
                let idx = ((py as u32 * self.width + px as u32) * 4) as usize;
                let dst = &mut self.frame[idx..idx + 4];
                if alpha == 255 {
                    dst.copy_from_slice(&src);
                    continue;
                }
                let inv_alpha = 255 - alpha;
                for c in 0..3 {
                    dst[c] = ((dst[c] as u16 * inv_alpha + src[c] as u16 * alpha) / 255) as u8;
                }
                dst[3] = 255;
            }
        }
    }
}

pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
    background: [u8; 4],
}

impl GraphicsRenderer {
    pub fn new(
        window: &Window,
        width: u32,
        height: u32,
        background: [u8; 4],
    ) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            pixels,
            width,
            height,
            background,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;

        // Keep buffer pixels 1:1 with window pixels so pointer coordinates
        // need no extra mapping
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }
    }

    pub fn render(&mut self, viewport: &Viewport) {
        let mut surface = FrameSurface::new(self.pixels.frame_mut(), self.width, self.height);
        surface.clear(self.background);
        viewport.render(&mut surface);
    }

    pub fn present(&self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_to_frame() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut surface = FrameSurface::new(&mut frame, 4, 4);
        surface.blit(&Sprite::filled(3, 3, [10, 20, 30, 255]), 2, -1);

        let at = |x: usize, y: usize| frame[(y * 4 + x) * 4];
        assert_eq!(at(2, 0), 10);
        assert_eq!(at(3, 1), 10);
        assert_eq!(at(1, 0), 0);
        assert_eq!(at(2, 2), 0);
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let mut frame = vec![7u8; 2 * 2 * 4];
        let mut surface = FrameSurface::new(&mut frame, 2, 2);
        surface.blit(&Sprite::filled(2, 2, [255, 255, 255, 0]), 0, 0);
        assert!(frame.iter().all(|&b| b == 7));
    }

    #[test]
    fn fully_offscreen_blit_is_noop() {
        let mut frame = vec![0u8; 2 * 2 * 4];
        let mut surface = FrameSurface::new(&mut frame, 2, 2);
        surface.blit(&Sprite::filled(2, 2, [1, 1, 1, 255]), -5, 10);
        assert!(frame.iter().all(|&b| b == 0));
    }
}
