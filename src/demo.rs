//! The frame loop.
//!
//! [`Demo::new`] creates every resource up front; any failure there is fatal. After that the
//! demo runs [`Demo::frame`] until the window is asked to close, then shuts the overlay down and
//! lets the GPU resources drop before the context.

use glow::HasContext;

use crate::{
    abs::{App, Mesh, ShaderProgram, Texture},
    config::DemoConfig,
    debug_ui::DebugUi,
    error::SetupError,
    render::{self, TEXTURE_UNIFORM, TEXTURE_UNIT, VIEW_PROJ_UNIFORM, WORLD_UNIFORM},
    timing::FrameTimer,
    transform::TransformState,
};

/// Where the demo is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
    ShuttingDown,
}

/// Owns the window, every GPU resource and the slider state.
pub struct Demo {
    pub state: TransformState,
    program: ShaderProgram,
    quad: Mesh,
    texture: Texture,
    ui: DebugUi,
    timer: FrameTimer,
    clear_color: [f32; 4],
    phase: Phase,
    last_gl_error: u32,
    // Dropped last: everything above still needs the context in its `Drop`.
    app: App,
}

impl Demo {
    /// Opens the window and creates the program, the quad, the texture and the overlay.
    pub fn new(config: &DemoConfig) -> Result<Self, SetupError> {
        log::debug!("phase: {:?}", Phase::Initializing);
        let app = App::new(config)?;

        let program = render::quad_program(&app.gl).map_err(|e| SetupError::Gpu(e.to_string()))?;
        if !program.is_linked() {
            log::warn!("continuing with an unlinked shader program, the quad will not render");
        }
        let quad = render::quad_mesh(&app.gl)?;
        let texture = Texture::load(&app.gl, &config.texture_path)?;
        let ui = DebugUi::new(&app.gl)?;

        log::info!("phase: {:?}", Phase::Running);
        Ok(Self {
            state: TransformState::default(),
            program,
            quad,
            texture,
            ui,
            timer: FrameTimer::new(),
            clear_color: config.clear_color,
            phase: Phase::Running,
            last_gl_error: glow::NO_ERROR,
            app,
        })
    }

    /// Runs frames until the window is closed.
    pub fn run(mut self) {
        while self.frame() {}
        self.shutdown();
    }

    /// Runs one iteration of the loop. Returns `false` once a close was requested.
    ///
    /// The transform is computed before the overlay is built, so slider edits made in this frame
    /// show up in the next one.
    pub fn frame(&mut self) -> bool {
        let fps = self.timer.average_fps();
        self.timer.tick();

        self.ui.begin_frame(&self.app.window);

        let gl = &self.app.gl;
        let (width, height) = self.app.window.drawable_size();
        let [r, g, b, a] = self.clear_color;
        unsafe {
            // The overlay painter leaves its scissor rectangle behind.
            gl.disable(glow::SCISSOR_TEST);
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.use_program();

        let matrices = self.state.matrices();
        self.program.set_uniform(WORLD_UNIFORM, matrices.model);
        self.program.set_uniform(VIEW_PROJ_UNIFORM, matrices.view_projection());
        self.program.set_uniform(TEXTURE_UNIFORM, TEXTURE_UNIT as i32);

        self.texture.bind(TEXTURE_UNIT);
        self.quad.draw();
        self.last_gl_error = unsafe { gl.get_error() };
        if self.last_gl_error != glow::NO_ERROR {
            log::warn!("draw call raised GL error 0x{:04X}", self.last_gl_error);
        }

        self.ui.show(&mut self.state, fps);
        self.ui.render(&self.app.window);

        self.app.swap();

        self.poll_events()
    }

    /// Feeds pending events to the overlay. Returns `false` on a quit request.
    fn poll_events(&mut self) -> bool {
        let mut keep_running = true;
        for event in self.app.event_pump.poll_iter() {
            self.ui.handle_event(&event);
            if let sdl2::event::Event::Quit { .. } = event {
                keep_running = false;
            }
        }
        keep_running
    }

    /// Tears down the overlay. The other GPU resources are released when the demo is dropped.
    pub fn shutdown(&mut self) {
        if self.phase == Phase::ShuttingDown {
            return;
        }
        self.phase = Phase::ShuttingDown;
        log::info!("phase: {:?}", self.phase);
        self.ui.destroy();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The GL error flag read right after the last draw call.
    pub fn last_gl_error(&self) -> u32 {
        self.last_gl_error
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn app(&self) -> &App {
        &self.app
    }
}

impl Drop for Demo {
    fn drop(&mut self) {
        self.shutdown();
    }
}
