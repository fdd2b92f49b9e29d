//! egui on top of the composite pass.
//!
//! Card text, emoji, the surprise modal and the day drawer are egui shapes
//! painted in the same render pass as the particle composite, after it.

use winit::window::Window;

/// egui context, winit input state and wgpu renderer for one window.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// One tessellated overlay frame, ready to paint.
pub struct OverlayFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiIntegration {
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();
        ctx.set_style(storybook_style());

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(device, output_format, None, 1, false);

        Self { ctx, state, renderer }
    }

    /// Feed a window event to egui.
    ///
    /// `consumed` is set when the pointer or keyboard is over an egui widget,
    /// in which case the storybook should not see the event.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Run `ui` for one frame and tessellate the result.
    pub fn run(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, ui);
        self.state
            .handle_platform_output(window, output.platform_output);

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        OverlayFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Upload new or changed textures (the font atlas, mostly).
    pub fn update_textures(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &OverlayFrame) {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
    }

    /// Upload vertex and index buffers. Must run before the render pass begins.
    pub fn update_buffers(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &OverlayFrame,
        screen: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        self.renderer
            .update_buffers(device, queue, encoder, &frame.paint_jobs, screen)
    }

    pub fn paint(
        &self,
        pass: &mut wgpu::RenderPass<'static>,
        frame: &OverlayFrame,
        screen: &egui_wgpu::ScreenDescriptor,
    ) {
        self.renderer.render(pass, &frame.paint_jobs, screen);
    }

    /// Free textures egui no longer needs, after the frame was submitted.
    pub fn free_textures(&mut self, frame: &OverlayFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Light rose theme: white panels, rose accents, no shadows.
pub fn storybook_style() -> egui::Style {
    let rose = egui::Color32::from_rgb(244, 63, 94);
    let mut style = egui::Style::default();
    style.visuals = egui::Visuals::light();
    style.visuals.window_shadow = egui::Shadow::NONE;
    style.visuals.popup_shadow = egui::Shadow::NONE;
    style.visuals.window_fill = egui::Color32::WHITE;
    style.visuals.window_corner_radius = egui::CornerRadius::same(24);
    style.visuals.selection.bg_fill = rose;
    style.visuals.hyperlink_color = rose;
    style.visuals.widgets.hovered.weak_bg_fill = egui::Color32::from_rgb(255, 228, 230);
    style.visuals.widgets.active.weak_bg_fill = egui::Color32::from_rgb(254, 205, 211);
    style.spacing.button_padding = egui::vec2(16.0, 8.0);
    style
}
