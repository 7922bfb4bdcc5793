//! Mount API - Application lifecycle and render effect.
//!
//! `mount` builds the component tree, wires the reactive pipeline to a
//! terminal renderer and installs global keys. The single render effect
//! re-runs whenever the frame buffer derived changes; it refreshes the hit
//! grid and writes the frame.
//!
//! # Example
//!
//! ```no_run
//! use spark_hello::components::App;
//! use spark_hello::pipeline::{mount, MountOptions};
//!
//! let app = App::new();
//! let handle = mount(|| app.render(), MountOptions::default())?;
//! handle.run()?;
//! handle.unmount()?;
//! # Ok::<(), spark_hello::Error>(())
//! ```

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use spark_signals::{effect, Derived};

use super::frame_buffer_derived::{create_frame_buffer_derived, FrameBufferResult};
use super::layout_derived::create_layout_derived;
use super::terminal::{detect_terminal_size, set_render_mode, set_terminal_size, RenderMode, TerminalGuard};
use crate::error::{Error, Result};
use crate::primitives::Cleanup;
use crate::renderer::{DiffRenderer, FrameBuffer, InlineRenderer};
use crate::state::{global_keys, input, mouse};

/// Poll interval for `tick` (~60fps).
const TICK_INTERVAL: Duration = Duration::from_millis(16);

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountOptions {
    pub mode: RenderMode,
    /// Fixed terminal size instead of the detected one.
    pub size: Option<(u16, u16)>,
}

// =============================================================================
// Renderer
// =============================================================================

enum Renderer {
    Fullscreen(DiffRenderer),
    Inline(InlineRenderer),
}

impl Renderer {
    fn enter(mode: RenderMode) -> io::Result<Self> {
        match mode {
            RenderMode::Fullscreen => {
                let mut renderer = DiffRenderer::new();
                renderer.enter_fullscreen()?;
                Ok(Self::Fullscreen(renderer))
            }
            RenderMode::Inline => Ok(Self::Inline(InlineRenderer::new())),
        }
    }

    fn render(&mut self, buffer: &FrameBuffer) -> io::Result<()> {
        match self {
            Self::Fullscreen(renderer) => renderer.render(buffer).map(|_| ()),
            Self::Inline(renderer) => renderer.render(buffer),
        }
    }

    fn exit(&mut self) -> io::Result<()> {
        match self {
            Self::Fullscreen(renderer) => renderer.exit_fullscreen(),
            // Leave the last frame on screen, prompt goes below it.
            Self::Inline(_) => {
                use std::io::Write;
                let mut stdout = io::stdout().lock();
                stdout.write_all(b"\r\n")?;
                stdout.flush()
            }
        }
    }
}

// =============================================================================
// Render Effect
// =============================================================================

/// Write hit regions of a frame into the global hit grid.
fn apply_hit_regions(result: &FrameBufferResult, last_size: &mut (u16, u16)) {
    let size = (result.buffer.width(), result.buffer.height());
    if *last_size != size {
        mouse::resize_hit_grid(size.0, size.1);
        *last_size = size;
    } else {
        mouse::clear_hit_grid();
    }

    for region in &result.hit_regions {
        mouse::fill_hit_rect(region.x, region.y, region.width, region.height, region.component_index);
    }
}

/// Create the ONE render effect. `on_frame` receives each new frame after
/// the hit grid has been refreshed.
fn create_render_effect<F, S>(
    fb_derived: Derived<FrameBufferResult, F>,
    running: Arc<AtomicBool>,
    mut on_frame: S,
) -> Box<dyn FnOnce()>
where
    F: Fn() -> FrameBufferResult + 'static,
    S: FnMut(&FrameBuffer) + 'static,
{
    let mut last_size = mouse::hit_grid_size();
    let stop = effect(move || {
        let result = fb_derived.get();
        if !running.load(Ordering::SeqCst) {
            return;
        }
        apply_hit_regions(&result, &mut last_size);
        on_frame(&result.buffer);
    });
    Box::new(stop)
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by `mount`. Dropping it restores the terminal.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    global_keys: Option<global_keys::GlobalKeysHandle>,
    root_cleanup: Option<Cleanup>,
    renderer: Rc<RefCell<Renderer>>,
    guard: Option<TerminalGuard>,
}

impl MountHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request shutdown. `run` returns after the current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Shared running flag, for handlers that need to stop the app.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Process at most one input event.
    /// Returns `Ok(false)` once the application should stop.
    pub fn tick(&self) -> Result<bool> {
        if !self.is_running() {
            return Ok(false);
        }
        if let Some(event) = input::poll_event(TICK_INTERVAL)? {
            input::route_event(event);
        }
        Ok(self.is_running())
    }

    /// Block until Ctrl+C or `stop`.
    pub fn run(&self) -> Result<()> {
        while self.tick()? {}
        Ok(())
    }

    /// Tear down the tree and restore the terminal.
    pub fn unmount(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.global_keys.take() {
            handle.cleanup();
        }
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Some(cleanup) = self.root_cleanup.take() {
            cleanup();
        }

        let Some(mut guard) = self.guard.take() else {
            return Ok(());
        };
        let exited = self.renderer.borrow_mut().exit();
        guard.restore()?;
        tracing::info!("unmounted");
        exited.map_err(Error::from)
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            tracing::warn!(%err, "unmount failed");
        }
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount an application on the terminal.
///
/// 1. Terminal size detection (or `options.size`)
/// 2. Raw mode, mouse capture, renderer setup
/// 3. Component tree from `root`
/// 4. Reactive render pipeline (layout -> frame buffer -> renderer)
/// 5. Global key handlers (Ctrl+C, Tab, Shift+Tab)
pub fn mount<R>(root: R, options: MountOptions) -> Result<MountHandle>
where
    R: FnOnce() -> Cleanup,
{
    let (width, height) = match options.size {
        Some((w, h)) => {
            set_terminal_size(w, h);
            (w, h)
        }
        None => detect_terminal_size(),
    };
    set_render_mode(options.mode);

    let guard = TerminalGuard::enter()?;
    let renderer = Rc::new(RefCell::new(Renderer::enter(options.mode)?));

    let root_cleanup = root();

    let running = Arc::new(AtomicBool::new(true));
    let fb_derived = create_frame_buffer_derived(create_layout_derived());
    let effect_renderer = renderer.clone();
    let stop = create_render_effect(fb_derived, running.clone(), move |buffer| {
        if let Err(err) = effect_renderer.borrow_mut().render(buffer) {
            tracing::warn!(%err, "render failed");
        }
    });

    let global_keys = global_keys::setup_global_keys(running.clone());
    tracing::info!(mode = ?options.mode, width, height, "mounted");

    Ok(MountHandle {
        stop_effect: Some(stop),
        running,
        global_keys: Some(global_keys),
        root_cleanup: Some(root_cleanup),
        renderer,
        guard: Some(guard),
    })
}

// =============================================================================
// Headless
// =============================================================================

/// A mounted tree without a terminal. Frames are kept in memory; input is
/// injected through `state::mouse::dispatch` and `state::keyboard::dispatch`.
pub struct HeadlessMount {
    stop_effect: Option<Box<dyn FnOnce()>>,
    root_cleanup: Option<Cleanup>,
    global_keys: Option<global_keys::GlobalKeysHandle>,
    running: Arc<AtomicBool>,
    frame: Rc<RefCell<FrameBuffer>>,
}

impl HeadlessMount {
    /// Plain-text snapshot of the latest frame.
    pub fn frame_text(&self) -> String {
        self.frame.borrow().to_text()
    }

    pub fn frame(&self) -> FrameBuffer {
        self.frame.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.global_keys.take() {
            handle.cleanup();
        }
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Some(cleanup) = self.root_cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for HeadlessMount {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount inline at a fixed size with an in-memory frame sink.
pub fn mount_headless<R>(root: R, width: u16, height: u16) -> HeadlessMount
where
    R: FnOnce() -> Cleanup,
{
    set_terminal_size(width, height);
    set_render_mode(RenderMode::Inline);

    let root_cleanup = root();

    let running = Arc::new(AtomicBool::new(true));
    let frame = Rc::new(RefCell::new(FrameBuffer::new(0, 0)));
    let sink = frame.clone();
    let fb_derived = create_frame_buffer_derived(create_layout_derived());
    let stop = create_render_effect(fb_derived, running.clone(), move |buffer| {
        *sink.borrow_mut() = buffer.clone();
    });
    let global_keys = global_keys::setup_global_keys(running.clone());

    HeadlessMount {
        stop_effect: Some(stop),
        root_cleanup: Some(root_cleanup),
        global_keys: Some(global_keys),
        running,
        frame,
    }
}

/// Render `root` once at a fixed size and return the frame as text.
/// The tree is unmounted before returning.
pub fn render_to_string<R>(root: R, width: u16, height: u16) -> String
where
    R: FnOnce() -> Cleanup,
{
    set_terminal_size(width, height);
    set_render_mode(RenderMode::Inline);

    let cleanup = root();
    let text = create_frame_buffer_derived(create_layout_derived()).get().buffer.to_text();
    cleanup();
    text
}
