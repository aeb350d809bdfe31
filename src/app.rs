// src/app.rs

use glam::vec2;
use winit::{event::WindowEvent, window::Window};

use crate::demo_map;
use crate::engine_lib::controller::PlayerController;
use crate::engine_lib::map::Map;
use crate::engine_lib::player::Player;
use crate::engine_lib::raycaster::Raycaster;
use crate::rendering_lib::renderer::Renderer;
use crate::rendering_lib::shader::WGSL_SHADER_SOURCE;
use crate::rendering_lib::texture::TextureArray;
use crate::rendering_lib::vertex::ColumnInstance;
use crate::ui::build_ui;

pub struct RaycastApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    raycaster: Raycaster,
    map: Map,
    player: Player,
    controller: PlayerController,
    columns: Vec<ColumnInstance>,
    debug_columns: bool,
    last_dt: f32,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl RaycastApp {
    pub async fn new(window: std::sync::Arc<Window>) -> Self {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone()).unwrap();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let wall_images = demo_map::create_wall_textures();
        let atlas = TextureArray::from_images(&device, &queue, &wall_images, "Wall Atlas")
            .expect("demo wall textures should form a valid atlas");
        log::info!("wall atlas ready with {} layers", atlas.layer_count());

        let raycaster = Raycaster::new(atlas.layer_count());
        let renderer = Renderer::new(
            &device,
            config.format,
            WGSL_SHADER_SOURCE,
            &atlas,
            raycaster.column_count(),
        );
        let columns = vec![ColumnInstance::default(); raycaster.column_count()];

        let map = demo_map::create_demo_map();
        let player = Player::new(vec2(96.0, 96.0), 45.0, 32.0);
        let controller = PlayerController::new(140.0, 120.0);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        Self {
            surface,
            device,
            queue,
            config,
            size,
            renderer,
            raycaster,
            map,
            player,
            controller,
            columns,
            debug_columns: false,
            last_dt: 0.0,
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            // Column geometry stays in the logical 854x480 space; the
            // viewport transform absorbs the physical change.
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.last_dt = dt;
        self.controller
            .apply_to_player(&mut self.player, &self.map, dt);
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Command Encoder"),
            });

        self.raycaster
            .cast(&self.map, &self.player, &mut self.columns);
        self.renderer.render_columns(
            &self.queue,
            &mut encoder,
            &view,
            &self.columns,
            self.debug_columns,
            wgpu::Color {
                r: 0.08,
                g: 0.08,
                b: 0.1,
                a: 1.0,
            },
        );

        let fps = if self.last_dt > 0.0 { 1.0 / self.last_dt } else { 0.0 };
        let raw_input = self.egui_state.take_egui_input(window);
        let egui_ctx = self.egui_ctx.clone();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            build_ui(ctx, &mut self.debug_columns, fps);
        });
        self.egui_state
            .handle_platform_output(window, full_output.platform_output);
        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.egui_renderer
                .render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(tex_id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed {
            return true;
        }
        self.controller.handle_window_event(event)
    }
}
