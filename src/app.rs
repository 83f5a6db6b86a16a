use crate::{
    camera::Camera,
    data::{CursorPoint, PointCloudGpu},
    input::{InputState, PointerAction},
    renderer::Renderer,
};
use anyhow::Result;
use std::{sync::Arc, time::Instant};
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
    window::Window,
};

/// Cloud extent in world units.
const CLOUD_RADIUS: f32 = 5.0;
/// Number of sampled points.
const CLOUD_POINT_COUNT: usize = 400;

/// Startup parameters for the demo window.
pub struct DemoConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub multisampling: bool,
    pub vsync: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Voronoi Picking",
            width: 853,
            height: 480,
            multisampling: false,
            vsync: true,
        }
    }
}

pub struct App {
    pub renderer: Renderer,
    pub camera: Camera,
    input: InputState,
    cloud: PointCloudGpu,
    cursor: CursorPoint,
    /// Space toggles a letterboxed view of the pick pass.
    show_pick_view: bool,
    last_frame: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>, config: &DemoConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync, (config.width, config.height)).await?;

        // The perspective projection keys off the configured size and never
        // follows the window afterwards.
        let camera = Camera::new(config.width, config.height);

        let cloud = PointCloudGpu::new(&renderer.gfx.device, CLOUD_RADIUS, CLOUD_POINT_COUNT);
        let cursor = CursorPoint::new(&renderer.gfx.device);

        Ok(Self {
            renderer,
            camera,
            input: InputState::default(),
            cloud,
            cursor,
            show_pick_view: false,
            last_frame: Instant::now(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
            self.camera.resize_screen(new_size.width, new_size.height);
        }
    }

    /// Handles a window event; returns true when the event was consumed.
    pub fn handle_event(&mut self, _window: &Window, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .pointer_event(position.x as f32, position.y as f32, PointerAction::Moved);
                true
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let action = match state {
                    ElementState::Pressed => PointerAction::Pressed,
                    ElementState::Released => PointerAction::Released,
                };
                let position = self.input.pointer_button(action);
                if *state == ElementState::Released {
                    self.pick_at(position);
                }
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Space)
                {
                    self.show_pick_view = !self.show_pick_view;
                    return true;
                }
                false
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(*physical_size);
                true
            }
            _ => false,
        }
    }

    /// Resolves the point under a window coordinate. The pick target keeps
    /// the configured size, so window coordinates scale onto it first.
    fn pick_at(&self, position: (f32, f32)) {
        let window = self.renderer.gfx.size;
        let pick = self.renderer.pick_targets.size;
        let x = position.0 * pick.0 as f32 / window.width.max(1) as f32;
        let y = position.1 * pick.1 as f32 / window.height.max(1) as f32;

        match self.renderer.pick(&self.camera, &self.cloud, x as u32, y as u32) {
            Ok(Some(id)) => log::info!("Picked point {}", id),
            Ok(None) => log::info!("Picked nothing"),
            Err(err) => log::error!("Pick read-back failed: {}", err),
        }
    }

    /// Advances the scene by `dt` seconds of wall time.
    pub fn update(&mut self, dt: f32) {
        self.camera.advance(dt);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.update(dt);

        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &swap_view,
            &self.camera,
            &self.input,
            &self.cloud,
            &mut self.cursor,
            self.show_pick_view,
        );

        frame.present();
        Ok(())
    }
}
