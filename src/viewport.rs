//! Pan/zoom transform and frame composition.
//!
//! World space is where fields and cells live; screen space is window
//! pixels. The mapping is `screen = pan + world * zoom`.

use crate::config::Config;
use crate::error::{MinefieldError, Result};
use crate::geom::Vec2;
use crate::graphics::Surface;
use crate::registry::{RenderHandle, RenderList, SharedRenderList};

pub struct Viewport {
    pan: Vec2,
    zoom: f64,
    zoom_step: f64,
    /// Exclusive on both ends.
    zoom_bounds: (f64, f64),
    renderables: SharedRenderList,
}

impl Viewport {
    /// Fails unless `0 < min < zoom < max`; a zero or negative zoom would
    /// make the screen-to-world mapping divide by zero.
    pub fn new(zoom: f64, zoom_step: f64, zoom_bounds: (f64, f64)) -> Result<Self> {
        let (min, max) = zoom_bounds;
        if !(min > 0.0 && min < zoom && zoom < max) {
            return Err(MinefieldError::ConfigValue(format!(
                "zoom {} must lie strictly between {} and {}, with a positive lower bound",
                zoom, min, max
            )));
        }
        Ok(Self {
            pan: Vec2::ZERO,
            zoom,
            zoom_step,
            zoom_bounds,
            renderables: RenderList::shared(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.zoom,
            config.zoom_step,
            (config.zoom_min, config.zoom_max),
        )
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        self.pan + world * self.zoom
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom
    }

    /// Handle to the paint list, for owners that register and deregister
    /// their own entities.
    pub fn render_list(&self) -> SharedRenderList {
        self.renderables.clone()
    }

    pub fn register(&self, entity: RenderHandle) -> bool {
        self.renderables.borrow_mut().register(entity)
    }

    pub fn deregister(&self, entity: &RenderHandle) -> bool {
        self.renderables.borrow_mut().deregister(entity)
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.borrow().len()
    }

    /// Composites every registered entity onto `surface` in registration
    /// order. Only positions are scaled here; sprites come back from
    /// [`Renderable::content`](crate::registry::Renderable::content) already
    /// sized for the current zoom.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let renderables = self.renderables.borrow();
        for entity in renderables.iter() {
            let content = entity.content(self.zoom);
            let (x, y) = self.to_screen(content.position).floor_i32();
            surface.blit(&content.sprite, x, y);
        }
    }

    /// Zooms by `delta_units` steps around `anchor` (a screen position),
    /// moving the pan by `anchor * (new_zoom / zoom - 1)`.
    ///
    /// With the pan at zero this keeps the world point under the anchor in
    /// place; once the view is panned the anchor drifts by
    /// `pan * (new_zoom / zoom - 1)`.
    ///
    /// The pan is always moved, even when the new zoom falls outside the
    /// bounds and is discarded. Returns whether the zoom was committed.
    pub fn adjust_zoom(&mut self, delta_units: i32, anchor: Vec2) -> bool {
        let zoom = self.zoom;
        let new_zoom = zoom + self.zoom_step * delta_units as f64;
        self.pan -= anchor * (new_zoom / zoom - 1.0);

        let (min, max) = self.zoom_bounds;
        if min < new_zoom && new_zoom < max {
            self.zoom = new_zoom;
            log::debug!("Zoom {:.2} -> {:.2}", zoom, new_zoom);
            true
        } else {
            log::debug!("Zoom {:.2} rejected, outside ({}, {})", new_zoom, min, max);
            false
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            zoom_step: 0.1,
            zoom_bounds: (0.5, 5.0),
            renderables: RenderList::shared(),
        }
    }
}
