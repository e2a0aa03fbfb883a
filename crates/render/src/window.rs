//! Window management and input tracking with winit.

use anyhow::Result;
use std::collections::HashSet;
use winit::{
    event::{MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::KeyCode,
    window::{Window, WindowBuilder},
};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial width.
    pub width: u32,
    /// Initial height.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "voxelnav".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Window manager wrapping winit.
pub struct WindowManager {
    window: std::sync::Arc<Window>,
}

impl WindowManager {
    /// Create a new window on an existing event loop.
    pub fn new(config: WindowConfig, event_loop: &EventLoopWindowTarget<()>) -> Result<Self> {
        let window = WindowBuilder::new()
            .with_title(config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
            .build(event_loop)?;

        Ok(Self {
            window: std::sync::Arc::new(window),
        })
    }

    /// Get an Arc reference to the window.
    pub fn window(&self) -> std::sync::Arc<Window> {
        self.window.clone()
    }

    /// Current window size.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// Per-frame input tracking for the orbit camera and hotkeys.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently held.
    pub keys_pressed: HashSet<KeyCode>,
    /// Keys pressed at least once this frame.
    pub keys_just_pressed: HashSet<KeyCode>,
    /// Mouse buttons currently held.
    pub mouse_buttons: HashSet<MouseButton>,
    /// Absolute cursor position in pixels.
    pub mouse_pos: (f64, f64),
    /// Cursor delta accumulated this frame.
    pub mouse_delta: (f64, f64),
    /// Scroll delta accumulated this frame.
    pub scroll_delta: f32,
}

impl InputState {
    /// Create a fresh input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a key is currently held.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check whether a key was pressed this frame.
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check whether a mouse button is held.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Reset per-frame accumulators (deltas, clicks).
    pub fn reset_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
        self.keys_just_pressed.clear();
    }

    /// Fold a window event into the state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        use winit::event::ElementState;
        use winit::keyboard::PhysicalKey;

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            self.keys_pressed.insert(keycode);
                            self.keys_just_pressed.insert(keycode);
                        }
                        ElementState::Released => {
                            self.keys_pressed.remove(&keycode);
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    self.mouse_buttons.insert(*button);
                }
                ElementState::Released => {
                    self.mouse_buttons.remove(button);
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x, position.y);
                self.mouse_delta.0 += new_pos.0 - self.mouse_pos.0;
                self.mouse_delta.1 += new_pos.1 - self.mouse_pos.1;
                self.mouse_pos = new_pos;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match *delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 120.0) as f32,
                };
                self.scroll_delta += scroll;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_frame_clears_accumulators_but_not_held_keys() {
        let mut input = InputState::new();
        input.keys_pressed.insert(KeyCode::Escape);
        input.keys_just_pressed.insert(KeyCode::Escape);
        input.mouse_delta = (3.0, -2.0);
        input.scroll_delta = 1.5;

        input.reset_frame();

        assert!(input.is_key_pressed(KeyCode::Escape));
        assert!(!input.is_key_just_pressed(KeyCode::Escape));
        assert_eq!(input.mouse_delta, (0.0, 0.0));
        assert_eq!(input.scroll_delta, 0.0);
    }
}


