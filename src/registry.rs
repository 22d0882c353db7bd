use std::cell::RefCell;
use std::rc::Rc;

use crate::geom::Vec2;
use crate::sprite::Sprite;

/// What a renderable hands the viewport each frame.
#[derive(Debug, Clone)]
pub struct Content {
    /// Top-left corner in world space.
    pub position: Vec2,
    /// Already scaled to the zoom it was requested at.
    pub sprite: Sprite,
}

pub trait Renderable {
    fn content(&self, zoom: f64) -> Content;
}

pub type RenderHandle = Rc<dyn Renderable>;
pub type SharedRenderList = Rc<RefCell<RenderList>>;

/// Ordered paint list, back to front.
#[derive(Default)]
pub struct RenderList {
    entries: Vec<RenderHandle>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedRenderList {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Appends `entity` unless it is already present. Returns whether it was
    /// added.
    pub fn register(&mut self, entity: RenderHandle) -> bool {
        if self.contains(&entity) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    /// Removes `entity` if present. Returns whether anything was removed.
    pub fn deregister(&mut self, entity: &RenderHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !same_entity(e, entity));
        self.entries.len() != before
    }

    pub fn contains(&self, entity: &RenderHandle) -> bool {
        self.entries.iter().any(|e| same_entity(e, entity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderHandle> {
        self.entries.iter()
    }
}

// Compare data pointers only; vtable pointers for one type may differ
// between codegen units.
fn same_entity(a: &RenderHandle, b: &RenderHandle) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}
