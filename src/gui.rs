use block_simulation::{settings_panel, Control, Section, Settings};
use egui::Context;
use egui_wgpu::Renderer;
use egui_winit::State;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

/// Width of the settings window, wide enough for the long control labels
const SETTINGS_WIDTH: f32 = 750.0;

#[derive(Default)]
pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub body_count: usize,
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
    panel: Vec<Section>,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            context,
            state,
            renderer,
            panel: settings_panel(),
        }
    }

    /// Returns true when egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &UiState,
        settings: &mut Settings,
    ) {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            self.ui(ctx, ui_state, settings);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn ui(&self, ctx: &Context, state: &UiState, settings: &mut Settings) {
        // Diagnostics Panel (Top Left)
        egui::Window::new("Diagnostics")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.label(format!("Bodies: {}", state.body_count));
                ui.label(if settings.is_frozen() {
                    "Time: Frozen"
                } else {
                    "Time: Running"
                });
            });

        // Settings (Top Right)
        egui::Window::new("Settings")
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .default_width(SETTINGS_WIDTH)
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                for section in &self.panel {
                    egui::CollapsingHeader::new(section.title)
                        .default_open(section.open)
                        .show(ui, |ui| {
                            for control in &section.controls {
                                control_widget(ui, control, settings);
                            }
                        });
                }
            });
    }
}

fn control_widget(ui: &mut egui::Ui, control: &Control, settings: &mut Settings) {
    match control {
        Control::Numeric(numeric) => {
            let range = numeric.min as f64..=numeric.max as f64;
            ui.add(
                egui::Slider::from_get_set(range, |value: Option<f64>| {
                    if let Some(value) = value {
                        numeric.write(settings, value as f32);
                    }
                    numeric.read(settings) as f64
                })
                .step_by(numeric.step as f64)
                .text(numeric.label),
            );
        }
        Control::Action(action) => {
            if ui.button(action.label).clicked() {
                action.trigger(settings);
            }
        }
    }
}
