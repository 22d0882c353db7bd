use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::geom::Vec2;

/// Pixels of trackpad scroll that count as one zoom step.
const PIXELS_PER_ZOOM_UNIT: f64 = 40.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl From<MouseButton> for Button {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
            MouseButton::Other(id) => Button::Other(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Click { position: Vec2, button: Button },
    Zoom { delta: i32, anchor: Vec2 },
    Pan(Vec2),
    None,
}

/// Tracks the pointer and turns raw window events into actions.
pub struct InputHandler {
    cursor: Vec2,
    dragging: bool,
    scroll_accumulator: f64,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            cursor: Vec2::ZERO,
            dragging: false,
            scroll_accumulator: 0.0,
        }
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> InputAction {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x, position.y))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button((*button).into(), *state == ElementState::Pressed)
            }
            WindowEvent::MouseWheel { delta, .. } => match *delta {
                MouseScrollDelta::LineDelta(_, y) => self.wheel_lines(y as f64),
                MouseScrollDelta::PixelDelta(pos) => self.wheel_pixels(pos.y),
            },
            WindowEvent::CursorLeft { .. } => {
                self.dragging = false;
                InputAction::None
            }
            _ => InputAction::None,
        }
    }

    pub fn cursor_moved(&mut self, position: Vec2) -> InputAction {
        let delta = position - self.cursor;
        self.cursor = position;
        if self.dragging && delta != Vec2::ZERO {
            InputAction::Pan(delta)
        } else {
            InputAction::None
        }
    }

    /// Middle button drags the view; every other press is a click at the
    /// current cursor position.
    pub fn mouse_button(&mut self, button: Button, pressed: bool) -> InputAction {
        match (button, pressed) {
            (Button::Middle, pressed) => {
                self.dragging = pressed;
                InputAction::None
            }
            (button, true) => InputAction::Click {
                position: self.cursor,
                button,
            },
            _ => InputAction::None,
        }
    }

    pub fn wheel_lines(&mut self, lines: f64) -> InputAction {
        self.accumulate(lines)
    }

    pub fn wheel_pixels(&mut self, pixels: f64) -> InputAction {
        self.accumulate(pixels / PIXELS_PER_ZOOM_UNIT)
    }

    // Zoom only moves in whole steps; fractional scroll carries over.
    fn accumulate(&mut self, units: f64) -> InputAction {
        self.scroll_accumulator += units;
        let delta = self.scroll_accumulator.trunc();
        if delta == 0.0 {
            return InputAction::None;
        }
        self.scroll_accumulator -= delta;
        InputAction::Zoom {
            delta: delta as i32,
            anchor: self.cursor,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_clicks_at_cursor() {
        let mut input = InputHandler::new();
        input.cursor_moved(Vec2::new(12.0, 34.0));
        assert_eq!(
            input.mouse_button(Button::Left, true),
            InputAction::Click {
                position: Vec2::new(12.0, 34.0),
                button: Button::Left
            }
        );
        assert_eq!(input.mouse_button(Button::Left, false), InputAction::None);
    }

    #[test]
    fn middle_drag_pans() {
        let mut input = InputHandler::new();
        input.cursor_moved(Vec2::new(10.0, 10.0));
        assert_eq!(input.mouse_button(Button::Middle, true), InputAction::None);
        assert_eq!(
            input.cursor_moved(Vec2::new(15.0, 7.0)),
            InputAction::Pan(Vec2::new(5.0, -3.0))
        );
        input.mouse_button(Button::Middle, false);
        assert_eq!(input.cursor_moved(Vec2::new(20.0, 20.0)), InputAction::None);
    }

    #[test]
    fn middle_button_never_clicks() {
        let mut input = InputHandler::new();
        input.cursor_moved(Vec2::new(8.0, 8.0));
        assert_eq!(input.mouse_button(Button::Middle, true), InputAction::None);
        assert_eq!(input.mouse_button(Button::Middle, false), InputAction::None);

        for button in [Button::Left, Button::Right, Button::Other(4)] {
            assert_eq!(
                input.mouse_button(button, true),
                InputAction::Click {
                    position: Vec2::new(8.0, 8.0),
                    button
                }
            );
        }
    }

    #[test]
    fn wheel_lines_zoom_at_cursor() {
        let mut input = InputHandler::new();
        input.cursor_moved(Vec2::new(50.0, 60.0));
        assert_eq!(
            input.wheel_lines(-2.0),
            InputAction::Zoom {
                delta: -2,
                anchor: Vec2::new(50.0, 60.0)
            }
        );
    }

    #[test]
    fn pixel_scroll_accumulates_into_steps() {
        let mut input = InputHandler::new();
        assert_eq!(input.wheel_pixels(25.0), InputAction::None);
        assert_eq!(
            input.wheel_pixels(25.0),
            InputAction::Zoom {
                delta: 1,
                anchor: Vec2::ZERO
            }
        );
        assert_eq!(input.wheel_pixels(25.0), InputAction::None);
    }
}
