#![warn(missing_docs)]
//! Rendering facade for the floorplan viewer, built on wgpu + egui.

use std::cell::RefCell;

mod camera;
mod mesh;
mod pipeline;
mod pulse;
mod ui;
mod window;

pub use camera::{CameraUniform, OrbitCamera};
pub use mesh::{
    build_grid_lines, build_marker_mesh, build_route_mesh, build_scene_mesh, GpuLines, GpuMesh,
    MeshBuffers,
    SceneVertex, FLOOR_COLOR, GRID_COLOR, ROUTE_COLOR, WALL_COLOR, WALL_EMISSIVE,
};
pub use pipeline::{GridPipeline, RenderContext, RoutePipeline, RouteUniform, ScenePipeline};
pub use pulse::{PathReveal, PulseClock, SceneUniform};
pub use ui::{HudOverlay, UiManager};
pub use window::{InputState, WindowConfig, WindowManager};

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Present with vsync.
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Main renderer owning GPU resources.
pub struct Renderer {
    config: RendererConfig,
    context: Option<RenderContext>,
    scene_pipeline: Option<ScenePipeline>,
    grid_pipeline: Option<GridPipeline>,
    route_pipeline: Option<RoutePipeline>,
    camera: OrbitCamera,
    ui: Option<RefCell<UiManager>>,
}

impl Renderer {
    /// Construct a renderer with the supplied config.
    pub fn new(config: RendererConfig) -> Self {
        let camera = OrbitCamera::new(config.width as f32 / config.height as f32);
        tracing::info!(?config, "renderer initialized");

        Self {
            config,
            context: None,
            scene_pipeline: None,
            grid_pipeline: None,
            route_pipeline: None,
            camera,
            ui: None,
        }
    }

    /// Initialize GPU resources with a window (async).
    pub async fn initialize_gpu(
        &mut self,
        window: std::sync::Arc<winit::window::Window>,
    ) -> anyhow::Result<()> {
        let context = RenderContext::new(window.clone(), self.config.vsync).await?;
        let scene_pipeline = ScenePipeline::new(&context)?;
        let grid_pipeline = GridPipeline::new(&context, scene_pipeline.camera_bind_group_layout())?;
        let route_pipeline =
            RoutePipeline::new(&context, scene_pipeline.camera_bind_group_layout())?;

        let ui = UiManager::new(&context.device, context.config.format, &window);

        self.camera.set_aspect(context.aspect_ratio());

        self.context = Some(context);
        self.scene_pipeline = Some(scene_pipeline);
        self.grid_pipeline = Some(grid_pipeline);
        self.route_pipeline = Some(route_pipeline);
        self.ui = Some(RefCell::new(ui));

        Ok(())
    }

    /// Mutable access to the UI manager.
    pub fn ui_mut(&self) -> Option<std::cell::RefMut<'_, UiManager>> {
        self.ui.as_ref().map(|cell| cell.borrow_mut())
    }

    /// Access the configuration supplied at construction time.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Mutable reference to the orbit camera.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Reference to the orbit camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Current backbuffer size.
    pub fn size(&self) -> (u32, u32) {
        self.context
            .as_ref()
            .map(|ctx| ctx.size)
            .unwrap_or((self.config.width, self.config.height))
    }

    /// Resize the renderer.
    pub fn resize(&mut self, new_size: (u32, u32)) {
        self.config.width = new_size.0;
        self.config.height = new_size.1;
        if let Some(context) = &mut self.context {
            context.resize(new_size);
            self.camera.set_aspect(context.aspect_ratio());

            if let Some(pipeline) = &mut self.scene_pipeline {
                pipeline.resize(&context.device, new_size);
            }
        }
    }

    /// Begin a new frame: acquire the backbuffer and upload the camera.
    pub fn begin_frame(&mut self) -> Option<FrameContext> {
        let context = self.context.as_ref()?;
        let scene_pipeline = self.scene_pipeline.as_ref()?;

        let output = context.surface.get_current_texture().ok()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        scene_pipeline.update_camera(&context.queue, &self.camera);

        Some(FrameContext { output, view })
    }

    /// Get render resources for encoding passes.
    pub fn render_resources(&self) -> Option<RenderResources<'_>> {
        let context = self.context.as_ref()?;
        Some(RenderResources {
            device: &context.device,
            queue: &context.queue,
            scene_pipeline: self.scene_pipeline.as_ref()?,
            grid_pipeline: self.grid_pipeline.as_ref()?,
            route_pipeline: self.route_pipeline.as_ref()?,
        })
    }
}

/// Frame rendering context.
pub struct FrameContext {
    output: wgpu::SurfaceTexture,
    /// The texture view for this frame.
    pub view: wgpu::TextureView,
}

impl FrameContext {
    /// Finish the frame and present.
    pub fn present(self) {
        self.output.present();
    }
}

/// Resources needed for encoding a frame.
pub struct RenderResources<'a> {
    /// GPU device.
    pub device: &'a wgpu::Device,
    /// Command queue.
    pub queue: &'a wgpu::Queue,
    /// Scene (floor + walls) pipeline.
    pub scene_pipeline: &'a ScenePipeline,
    /// Grid overlay pipeline.
    pub grid_pipeline: &'a GridPipeline,
    /// Route overlay pipeline.
    pub route_pipeline: &'a RoutePipeline,
}
