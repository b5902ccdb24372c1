//! The on-screen debug overlay.
//!
//! The overlay is drawn with [`egui`] through the [`egui_glow`] painter on the demo's own GL
//! context. SDL2 events are translated into egui input by [`DebugUi::handle_event`] and the
//! widgets are declared again every frame by [`DebugUi::show`].

use std::{sync::Arc, time::Instant};

use egui::{Modifiers, PointerButton, Pos2, RawInput, Rect, ViewportId};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::{Keycode, Mod},
    mouse::MouseButton,
    video::Window,
};

use crate::{
    error::SetupError,
    transform::{self, TransformState},
};

/// egui context, painter and the input collected since the last frame.
pub struct DebugUi {
    ctx: egui::Context,
    painter: egui_glow::Painter,
    start_time: Instant,
    events: Vec<egui::Event>,
    modifiers: Modifiers,
    in_frame: bool,
    destroyed: bool,
}

impl DebugUi {
    /// Creates the egui context and a painter for `gl`.
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, SetupError> {
        let painter = egui_glow::Painter::new(Arc::clone(gl), "", None, false)
            .map_err(|e| SetupError::Ui(e.to_string()))?;

        Ok(Self {
            ctx: egui::Context::default(),
            painter,
            start_time: Instant::now(),
            events: Vec::new(),
            modifiers: Modifiers::default(),
            in_frame: false,
            destroyed: false,
        })
    }

    /// Queues an SDL event as egui input for the next frame.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::KeyDown { keymod, .. } | Event::KeyUp { keymod, .. } = event {
            self.modifiers = translate_modifiers(*keymod);
        }
        if let Some(event) = translate_event(event, self.modifiers) {
            self.events.push(event);
        }
    }

    /// Starts a new egui pass with the input gathered so far.
    pub fn begin_frame(&mut self, window: &Window) {
        let input = frame_input(
            window.size(),
            window.drawable_size(),
            self.start_time.elapsed().as_secs_f64(),
            self.modifiers,
            std::mem::take(&mut self.events),
        );
        self.ctx.begin_pass(input);
        self.in_frame = true;
    }

    /// Declares the overlay's widgets. Edits land in `state` and are picked up by the next frame.
    pub fn show(&self, state: &mut TransformState, fps: f32) {
        egui::Window::new("Transform")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(&self.ctx, |ui| {
                ui.label(format!("Avg fps: {fps:.3}"));
                ui.add(
                    egui::Slider::new(&mut state.rotation_degrees, transform::ROTATION_RANGE)
                        .text("Degree"),
                );
                ui.horizontal(|ui| {
                    for component in state.rotation_axis.as_mut() {
                        ui.add(egui::Slider::new(component, transform::AXIS_RANGE));
                    }
                    ui.label("Rotation_Axis.xyz");
                });
                ui.horizontal(|ui| {
                    for component in state.translation.as_mut() {
                        ui.add(egui::Slider::new(component, transform::TRANSLATION_RANGE));
                    }
                    ui.label("Translation.xyz");
                });
                ui.add(egui::Slider::new(&mut state.fov_degrees, transform::FOV_RANGE).text("Fov"));
            });
    }

    /// Ends the pass and paints the overlay on top of the current framebuffer.
    pub fn render(&mut self, window: &Window) {
        if !self.in_frame {
            return;
        }
        self.in_frame = false;

        let output = self.ctx.end_pass();
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let (width, height) = window.drawable_size();
        self.painter.paint_and_update_textures(
            [width, height],
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );
    }

    /// Releases the painter's GL resources. Must run while the context is still alive.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            self.painter.destroy();
            self.destroyed = true;
        }
    }
}

impl Drop for DebugUi {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Builds the egui input for one frame.
///
/// `size` is the window size in points and `drawable` its framebuffer size in pixels. Their ratio
/// is reported as the native scale, which leaves egui's own zoom factor alone.
fn frame_input(
    size: (u32, u32),
    drawable: (u32, u32),
    time: f64,
    modifiers: Modifiers,
    events: Vec<egui::Event>,
) -> RawInput {
    let (width, height) = size;
    let native_pixels_per_point = if width > 0 {
        drawable.0 as f32 / width as f32
    } else {
        1.0
    };

    let mut input = RawInput {
        screen_rect: Some(Rect::from_min_size(
            Pos2::ZERO,
            egui::vec2(width as f32, height as f32),
        )),
        time: Some(time),
        modifiers,
        events,
        focused: true,
        ..Default::default()
    };
    input
        .viewports
        .entry(ViewportId::ROOT)
        .or_default()
        .native_pixels_per_point = Some(native_pixels_per_point);
    input
}

fn translate_modifiers(keymod: Mod) -> Modifiers {
    let ctrl = keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD);
    let gui = keymod.intersects(Mod::LGUIMOD | Mod::RGUIMOD);
    Modifiers {
        alt: keymod.intersects(Mod::LALTMOD | Mod::RALTMOD),
        ctrl,
        shift: keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD),
        mac_cmd: cfg!(target_os = "macos") && gui,
        command: if cfg!(target_os = "macos") { gui } else { ctrl },
    }
}

fn translate_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn translate_key(keycode: Keycode) -> Option<egui::Key> {
    let key = match keycode {
        Keycode::Backspace => egui::Key::Backspace,
        Keycode::Delete => egui::Key::Delete,
        Keycode::Return | Keycode::KpEnter => egui::Key::Enter,
        Keycode::Tab => egui::Key::Tab,
        Keycode::Escape => egui::Key::Escape,
        Keycode::Left => egui::Key::ArrowLeft,
        Keycode::Right => egui::Key::ArrowRight,
        Keycode::Up => egui::Key::ArrowUp,
        Keycode::Down => egui::Key::ArrowDown,
        Keycode::Home => egui::Key::Home,
        Keycode::End => egui::Key::End,
        Keycode::A => egui::Key::A,
        Keycode::C => egui::Key::C,
        Keycode::V => egui::Key::V,
        Keycode::X => egui::Key::X,
        Keycode::Z => egui::Key::Z,
        _ => return None,
    };
    Some(key)
}

/// Converts one SDL event into egui input, if egui has a use for it.
fn translate_event(event: &Event, modifiers: Modifiers) -> Option<egui::Event> {
    match event {
        Event::MouseMotion { x, y, .. } => {
            Some(egui::Event::PointerMoved(Pos2::new(*x as f32, *y as f32)))
        }
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        }
        | Event::MouseButtonUp {
            mouse_btn, x, y, ..
        } => Some(egui::Event::PointerButton {
            pos: Pos2::new(*x as f32, *y as f32),
            button: translate_button(*mouse_btn)?,
            pressed: matches!(event, Event::MouseButtonDown { .. }),
            modifiers,
        }),
        Event::MouseWheel { x, y, .. } => Some(egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(*x as f32, *y as f32),
            modifiers,
        }),
        Event::TextInput { text, .. } => Some(egui::Event::Text(text.clone())),
        Event::KeyDown {
            keycode: Some(keycode),
            repeat,
            ..
        } => Some(egui::Event::Key {
            key: translate_key(*keycode)?,
            physical_key: None,
            pressed: true,
            repeat: *repeat,
            modifiers,
        }),
        Event::KeyUp {
            keycode: Some(keycode),
            ..
        } => Some(egui::Event::Key {
            key: translate_key(*keycode)?,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers,
        }),
        Event::Window {
            win_event: WindowEvent::Leave,
            ..
        } => Some(egui::Event::PointerGone),
        _ => None,
    }
}
