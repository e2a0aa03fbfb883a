//! egui integration for the 2D chrome and the frame-stats overlay.

use egui_wgpu::ScreenDescriptor;

/// UI overlay manager using egui.
pub struct UiManager {
    context: egui::Context,
    renderer: egui_wgpu::Renderer,
    state: egui_winit::State,
}

impl UiManager {
    /// Create a new UI manager.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &winit::window::Window,
    ) -> Self {
        let context = egui::Context::default();

        let viewport_id = context.viewport_id();
        let state = egui_winit::State::new(context.clone(), viewport_id, window, None, None);

        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1);

        Self {
            context,
            renderer,
            state,
        }
    }

    /// Handle a window event. Returns true when egui consumed it.
    pub fn handle_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run the UI closure and render it over the existing frame content.
    pub fn render<F>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen_descriptor: ScreenDescriptor,
        window: &winit::window::Window,
        ui_fn: F,
    ) where
        F: FnOnce(&egui::Context),
    {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.context.run(raw_input, ui_fn);

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, id, &image_delta);
        }

        self.renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            self.renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            self.renderer.free_texture(&id);
        }
    }
}

/// Frame-stats overlay: fps plus the session phase, toggled with F3.
pub struct HudOverlay {
    /// Whether the overlay is visible.
    pub visible: bool,
    fps_history: Vec<f32>,
    /// Smoothed frames per second.
    pub fps: f32,
    /// Last frame time in milliseconds.
    pub frame_time_ms: f32,
}

impl Default for HudOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl HudOverlay {
    /// Create a hidden overlay.
    pub fn new() -> Self {
        Self {
            visible: false,
            fps_history: Vec::with_capacity(120),
            fps: 0.0,
            frame_time_ms: 0.0,
        }
    }

    /// Update fps from the last frame time.
    pub fn update_fps(&mut self, dt: f32) {
        self.frame_time_ms = dt * 1000.0;
        self.fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };

        self.fps_history.push(self.fps);
        if self.fps_history.len() > 120 {
            self.fps_history.remove(0);
        }
    }

    /// Toggle visibility.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Render the overlay.
    pub fn render(&self, ctx: &egui::Context, phase: &str) {
        if !self.visible {
            return;
        }

        egui::Window::new("Frame Stats")
            .default_pos([10.0, 60.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", self.fps));
                ui.label(format!("Frame Time: {:.2} ms", self.frame_time_ms));
                if !self.fps_history.is_empty() {
                    let min_fps = self.fps_history.iter().cloned().fold(f32::INFINITY, f32::min);
                    let max_fps = self.fps_history.iter().cloned().fold(0.0f32, f32::max);
                    ui.label(format!("FPS range: {min_fps:.1} - {max_fps:.1}"));
                }
                ui.separator();
                ui.label(format!("Session: {phase}"));
                ui.add_space(4.0);
                ui.label("Press F3 to toggle this overlay");
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_history_is_bounded() {
        let mut hud = HudOverlay::new();
        for _ in 0..500 {
            hud.update_fps(1.0 / 60.0);
        }
        assert!(hud.fps_history.len() <= 120);
        assert!((hud.fps - 60.0).abs() < 1.0);
    }
}
