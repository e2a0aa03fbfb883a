//! The interactive viewer: orbit camera over the floorplan, destination
//! search, and the turn-by-turn instruction card.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    event::{Event, MouseButton, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::KeyCode,
    window::Window,
};

use voxelnav_core::{
    sample_route, LocationCatalog, NavPhase, NavSession, StepKind, StepTimer,
};
use voxelnav_map::Floorplan;
use voxelnav_render::{
    build_grid_lines, build_marker_mesh, build_route_mesh, build_scene_mesh, GpuLines, GpuMesh,
    HudOverlay, InputState, PathReveal, PulseClock, Renderer, RendererConfig, SceneUniform,
    WindowConfig, WindowManager,
};

use crate::config::ViewerConfig;

/// What the event loop should do after an event.
pub enum ViewerAction {
    /// Keep running.
    Continue,
    /// Exit the application.
    Quit,
}

/// Deferred UI intent, applied after the frame is encoded.
enum UiIntent {
    None,
    StartNavigation(String),
    StopNavigation,
    SaveSettings,
}

/// The viewer state.
pub struct Viewer {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputState,
    config: ViewerConfig,

    catalog: LocationCatalog,
    floorplan: Floorplan,
    session: NavSession,
    timer: Option<StepTimer>,

    pulse: PulseClock,
    reveal: PathReveal,
    hud: HudOverlay,

    search_query: String,
    selected: Option<String>,
    show_settings: bool,

    scene_mesh: GpuMesh,
    route_mesh: GpuMesh,
    marker_mesh: GpuMesh,
    grid_lines: GpuLines,

    last_frame: Instant,
}

impl Viewer {
    /// Create the viewer window and upload the floorplan geometry.
    pub fn new(
        event_loop: &EventLoopWindowTarget<()>,
        config: ViewerConfig,
        floorplan: Floorplan,
        resolution: (u32, u32),
    ) -> Result<Self> {
        tracing::info!("Initializing viewer...");

        let window_config = WindowConfig {
            title: "voxelnav - Indoor Navigation".to_string(),
            width: resolution.0,
            height: resolution.1,
        };
        let window_manager = WindowManager::new(window_config, event_loop)?;
        let window = window_manager.window();

        let renderer_config = RendererConfig {
            width: resolution.0,
            height: resolution.1,
            vsync: config.vsync,
        };
        let mut renderer = Renderer::new(renderer_config);
        pollster::block_on(renderer.initialize_gpu(window.clone()))?;

        renderer.camera_mut().fov = config.fov_degrees.to_radians();

        let (scene_mesh, route_mesh, marker_mesh, grid_lines) = {
            let resources = renderer.render_resources().expect("GPU not initialized");
            let scene = build_scene_mesh(&floorplan);
            let route = build_route_mesh(&floorplan);
            let marker = build_marker_mesh(floorplan.marker.position);
            let grid = build_grid_lines(floorplan.extent, floorplan.extent as u32);
            (
                GpuMesh::upload(resources.device, &scene, "Scene"),
                GpuMesh::upload(resources.device, &route, "Route"),
                GpuMesh::upload(resources.device, &marker, "Marker"),
                GpuLines::upload(resources.device, &grid, "Grid"),
            )
        };

        tracing::info!(
            walls = floorplan.walls.len(),
            labels = floorplan.labels.len(),
            "Floorplan geometry uploaded"
        );

        let mut hud = HudOverlay::new();
        hud.visible = config.show_fps;

        Ok(Self {
            window,
            renderer,
            input: InputState::new(),
            config,
            catalog: LocationCatalog::sample(),
            floorplan,
            session: NavSession::default(),
            timer: None,
            pulse: PulseClock::new(),
            reveal: PathReveal::default(),
            hud,
            search_query: String::new(),
            selected: None,
            show_settings: false,
            scene_mesh,
            route_mesh,
            marker_mesh,
            grid_lines,
            last_frame: Instant::now(),
        })
    }

    /// Handle an event.
    pub fn handle_event(
        &mut self,
        event: &Event<()>,
        _elwt: &EventLoopWindowTarget<()>,
    ) -> ViewerAction {
        // Let the UI consume events first; the camera only sees the rest.
        if let Event::WindowEvent { ref event, .. } = event {
            let consumed = match self.renderer.ui_mut() {
                Some(mut ui) => ui.handle_event(&self.window, event),
                None => false,
            };
            if !consumed {
                self.input.handle_event(event);
            }
        }

        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.window.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        return ViewerAction::Quit;
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let winit::keyboard::PhysicalKey::Code(code) = event.physical_key {
                            if event.state.is_pressed() {
                                match code {
                                    KeyCode::Escape => {
                                        if self.session.is_active() {
                                            self.stop_navigation();
                                        } else {
                                            return ViewerAction::Quit;
                                        }
                                    }
                                    KeyCode::F3 => {
                                        self.hud.toggle();
                                        self.config.show_fps = self.hud.visible;
                                        if let Err(err) = self.config.save() {
                                            tracing::warn!(%err, "Failed to save viewer config");
                                        }
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        self.renderer.resize((new_size.width, new_size.height));
                    }
                    WindowEvent::RedrawRequested => {
                        self.update_and_render();
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                self.window.request_redraw();
            }
            _ => {}
        }

        ViewerAction::Continue
    }

    fn start_navigation(&mut self, destination: String) {
        let steps = sample_route(&destination);
        match self.session.start(destination, steps) {
            Ok(()) => {
                let interval = Duration::from_millis(self.config.step_interval_ms);
                self.timer = Some(StepTimer::new(interval));
                self.pulse.set_active(true);
                self.reveal.begin();
                tracing::info!(
                    destination = self.session.destination(),
                    steps = self.session.steps().len(),
                    "Navigation started"
                );
            }
            Err(err) => {
                tracing::error!(%err, "Failed to start navigation");
            }
        }
    }

    fn stop_navigation(&mut self) {
        self.session.stop();
        self.timer = None;
        self.pulse.set_active(false);
        self.reveal.clear();
        self.selected = None;
        self.search_query.clear();
        tracing::info!("Navigation stopped");
    }

    fn update_and_render(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.hud.update_fps(dt);

        // Advance the session on the step cadence. Dropping the timer when
        // the session ends is what cancels pending advances.
        if let Some(timer) = &mut self.timer {
            for _ in 0..timer.poll(now) {
                if self.session.tick() {
                    if let Some(step) = self.session.current_step() {
                        tracing::debug!(
                            step = self.session.current_index().unwrap_or(0),
                            instruction = %step.instruction,
                            "Advanced"
                        );
                    }
                }
            }
        }
        if self.session.is_arrived() {
            self.timer = None;
        }

        self.pulse.set_active(matches!(
            self.session.phase(),
            NavPhase::Navigating { .. }
        ));
        self.pulse.update(dt);
        self.reveal.advance_frame();

        self.update_camera();
        self.render();
    }

    fn update_camera(&mut self) {
        let sensitivity = self.config.orbit_sensitivity;
        let zoom_sensitivity = self.config.zoom_sensitivity;
        let camera = self.renderer.camera_mut();
        camera.fov = self.config.fov_degrees.to_radians();

        if self.input.is_mouse_pressed(MouseButton::Left) {
            let (dx, dy) = self.input.mouse_delta;
            camera.orbit(dx as f32 * sensitivity, dy as f32 * sensitivity);
        }
        if self.input.scroll_delta.abs() > 0.0 {
            camera.zoom(self.input.scroll_delta * zoom_sensitivity * 0.5);
        }
    }

    fn render(&mut self) {
        let mut intent = UiIntent::None;

        if let Some(frame) = self.renderer.begin_frame() {
            let resources = self.renderer.render_resources().expect("GPU initialized");

            resources
                .scene_pipeline
                .update_scene(resources.queue, SceneUniform::from_pulse(&self.pulse));

            let route_visible = self.session.is_active();
            if route_visible {
                let opacity = self.reveal.opacity();
                resources.route_pipeline.update_path(
                    resources.queue,
                    voxelnav_render::ROUTE_COLOR,
                    opacity,
                );
                resources.route_pipeline.update_marker(
                    resources.queue,
                    voxelnav_render::ROUTE_COLOR,
                    opacity,
                );
            }

            let mut encoder =
                resources
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Render Encoder"),
                    });

            // Floor and walls.
            {
                let mut pass = resources
                    .scene_pipeline
                    .begin_render_pass(&mut encoder, &frame.view);
                pass.set_vertex_buffer(0, self.scene_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    self.scene_mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..self.scene_mesh.index_count, 0, 0..1);
            }

            // Floor grid overlay.
            {
                let mut pass = resources.grid_pipeline.begin_render_pass(
                    &mut encoder,
                    &frame.view,
                    resources.scene_pipeline.depth_view(),
                );
                pass.set_bind_group(0, resources.scene_pipeline.camera_bind_group(), &[]);
                pass.set_vertex_buffer(0, self.grid_lines.vertex_buffer.slice(..));
                pass.draw(0..self.grid_lines.vertex_count, 0..1);
            }

            // Route tube and destination beacon, only while a session shows
            // a route.
            if route_visible {
                let mut pass = resources.route_pipeline.begin_render_pass(
                    &mut encoder,
                    &frame.view,
                    resources.scene_pipeline.depth_view(),
                );
                pass.set_bind_group(0, resources.scene_pipeline.camera_bind_group(), &[]);

                pass.set_bind_group(1, resources.route_pipeline.path_bind_group(), &[]);
                pass.set_vertex_buffer(0, self.route_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    self.route_mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..self.route_mesh.index_count, 0, 0..1);

                pass.set_bind_group(1, resources.route_pipeline.marker_bind_group(), &[]);
                pass.set_vertex_buffer(0, self.marker_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    self.marker_mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..self.marker_mesh.index_count, 0, 0..1);
            }

            // 2D chrome on top.
            if let Some(mut ui) = self.renderer.ui_mut() {
                let size = self.renderer.size();
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [size.0, size.1],
                    pixels_per_point: self.window.scale_factor() as f32,
                };

                let camera = self.renderer.camera();
                let session = &self.session;
                let catalog = &self.catalog;
                let floorplan = &self.floorplan;
                let search_query = &mut self.search_query;
                let selected = &mut self.selected;
                let show_settings = &mut self.show_settings;
                let config = &mut self.config;
                let hud = &self.hud;

                ui.render(
                    resources.device,
                    resources.queue,
                    &mut encoder,
                    &frame.view,
                    screen_descriptor,
                    &self.window,
                    |ctx| {
                        render_room_labels(ctx, floorplan, camera, size);
                        render_header(ctx, show_settings);
                        if *show_settings && render_settings_panel(ctx, config, show_settings) {
                            intent = UiIntent::SaveSettings;
                        }
                        match session.phase() {
                            NavPhase::Browsing => {
                                if let Some(choice) =
                                    render_search_card(ctx, catalog, search_query, selected)
                                {
                                    intent = UiIntent::StartNavigation(choice);
                                }
                            }
                            NavPhase::Navigating { .. } | NavPhase::Arrived => {
                                if render_instruction_card(ctx, session) {
                                    intent = UiIntent::StopNavigation;
                                }
                            }
                        }
                        render_status_bar(ctx, session);
                        hud.render(ctx, phase_name(session.phase()));
                    },
                );
            }

            resources.queue.submit(std::iter::once(encoder.finish()));
            frame.present();
        }

        self.input.reset_frame();
        self.hud.visible = self.config.show_fps;

        match intent {
            UiIntent::None => {}
            UiIntent::StartNavigation(destination) => self.start_navigation(destination),
            UiIntent::StopNavigation => self.stop_navigation(),
            UiIntent::SaveSettings => {
                if let Err(err) = self.config.save() {
                    tracing::warn!(%err, "Failed to save viewer config");
                }
            }
        }
    }
}

fn phase_name(phase: NavPhase) -> &'static str {
    match phase {
        NavPhase::Browsing => "browsing",
        NavPhase::Navigating { .. } => "navigating",
        NavPhase::Arrived => "arrived",
    }
}

/// Glyph shown next to an instruction.
fn step_glyph(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Walk => "\u{2191}",      // ↑
        StepKind::TurnLeft => "\u{21b0}",  // ↰
        StepKind::TurnRight => "\u{21b1}", // ↱
        StepKind::Stairs => "\u{21c5}",    // ⇅
        StepKind::Arrive => "\u{2690}",    // ⚐
    }
}

fn render_header(ctx: &egui::Context, show_settings: &mut bool) {
    egui::Area::new(egui::Id::new("header"))
        .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Indoor Navigation");
                    if ui.small_button("\u{2699}").clicked() {
                        *show_settings = !*show_settings;
                    }
                });
                ui.small("Drag to orbit, scroll to zoom");
            });
        });
}

/// Settings panel. Returns true when the user asks to persist the values.
fn render_settings_panel(
    ctx: &egui::Context,
    config: &mut ViewerConfig,
    open: &mut bool,
) -> bool {
    let mut save = false;

    egui::Window::new("Settings")
        .anchor(egui::Align2::LEFT_TOP, [16.0, 90.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.add(
                egui::Slider::new(&mut config.orbit_sensitivity, 0.001..=0.02)
                    .text("Orbit sensitivity"),
            );
            ui.add(
                egui::Slider::new(&mut config.fov_degrees, 30.0..=100.0).text("Field of view"),
            );
            ui.add(
                egui::Slider::new(&mut config.step_interval_ms, 500..=10_000)
                    .text("Step interval (ms)"),
            );
            ui.checkbox(&mut config.vsync, "Vsync (applies on restart)");
            ui.checkbox(&mut config.show_fps, "Show frame stats");

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save = true;
                }
                if ui.button("Close").clicked() {
                    *open = false;
                }
            });
        });

    save
}

/// Search box plus destination list. Returns the confirmed destination.
fn render_search_card(
    ctx: &egui::Context,
    catalog: &LocationCatalog,
    query: &mut String,
    selected: &mut Option<String>,
) -> Option<String> {
    let mut confirmed = None;

    egui::Window::new("Where to?")
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
        .resizable(false)
        .collapsible(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.label(format!("From: {}", catalog.origin()));
            ui.add_space(4.0);
            ui.text_edit_singleline(query);
            ui.add_space(4.0);

            let matches = catalog.filter(query);
            if matches.is_empty() {
                ui.weak("No matching destinations");
            }
            egui::ScrollArea::vertical()
                .max_height(220.0)
                .show(ui, |ui| {
                    for name in matches {
                        let is_selected = selected.as_deref() == Some(name);
                        if ui.selectable_label(is_selected, name).clicked() {
                            *selected = Some(name.to_string());
                        }
                    }
                });

            ui.add_space(8.0);
            let ready = selected.is_some();
            if ui
                .add_enabled(ready, egui::Button::new("Start navigation"))
                .clicked()
            {
                confirmed = selected.clone();
            }
        });

    confirmed
}

/// Turn-by-turn instruction card. Returns true when the user ends the route.
fn render_instruction_card(ctx: &egui::Context, session: &NavSession) -> bool {
    let mut stop = false;

    egui::Window::new("Route")
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -48.0])
        .resizable(false)
        .collapsible(false)
        .default_width(340.0)
        .show(ctx, |ui| {
            if session.is_arrived() {
                ui.vertical_centered(|ui| {
                    ui.heading("\u{2690} You have arrived");
                    ui.label(session.destination());
                });
            } else if let Some(step) = session.current_step() {
                ui.horizontal(|ui| {
                    ui.heading(step_glyph(step.kind));
                    ui.vertical(|ui| {
                        ui.strong(&step.instruction);
                        ui.weak(format!("{} \u{2022} {}", step.distance, step.time));
                    });
                });
            }

            ui.add_space(6.0);
            let progress = session.progress_percent() / 100.0;
            ui.add(egui::ProgressBar::new(progress).show_percentage());

            let upcoming = session.upcoming_steps();
            if !upcoming.is_empty() {
                ui.collapsing(format!("Next steps ({})", upcoming.len()), |ui| {
                    for step in upcoming {
                        ui.horizontal(|ui| {
                            ui.label(step_glyph(step.kind));
                            ui.label(&step.instruction);
                        });
                    }
                });
            }

            ui.add_space(6.0);
            let button = if session.is_arrived() {
                "Done"
            } else {
                "End route"
            };
            if ui.button(button).clicked() {
                stop = true;
            }
        });

    stop
}

fn render_status_bar(ctx: &egui::Context, session: &NavSession) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            // Static mode glyphs; only navigation is wired up.
            let _ = ui.selectable_label(!session.is_active(), "\u{2302}");
            let _ = ui.selectable_label(session.is_active(), "\u{27a4}");
            ui.separator();
            match session.phase() {
                NavPhase::Browsing => {
                    ui.label("Select a destination to preview the route");
                }
                NavPhase::Navigating { step } => {
                    ui.label(format!(
                        "Navigating to {} \u{2022} step {} of {}",
                        session.destination(),
                        step + 1,
                        session.steps().len()
                    ));
                }
                NavPhase::Arrived => {
                    ui.label(format!("Arrived at {}", session.destination()));
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak("Esc to cancel");
            });
        });
    });
}

/// Project room label anchors into screen space and draw floating tags.
fn render_room_labels(
    ctx: &egui::Context,
    floorplan: &Floorplan,
    camera: &voxelnav_render::OrbitCamera,
    viewport: (u32, u32),
) {
    let scale = ctx.pixels_per_point();
    for (index, label) in floorplan.labels.iter().enumerate() {
        if let Some((x, y)) = camera.project(label.position, viewport) {
            egui::Area::new(egui::Id::new(("room_label", index)))
                .fixed_pos([x / scale, y / scale])
                .pivot(egui::Align2::CENTER_CENTER)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.small(&label.name);
                    });
                });
        }
    }
}
