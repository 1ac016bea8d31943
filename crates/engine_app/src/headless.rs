//! In-memory collaborators for running the engine without a display.
//!
//! Recording and scripted types share their state between clones, so a test
//! can keep a handle while the engine owns the boxed original.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

use engine_math::{Color, Rect};
use engine_system::{
    AssetError, AssetStore, FontHandle, InputEvent, InputSource, PlatformError, RenderError,
    RendererBackend, TextureHandle, WindowHandle, WindowSystem,
};
use tracing::{debug, trace};

/// A call made on a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetDrawColor(Color),
    Clear,
    FillRect(Rect),
    Texture(TextureHandle, Rect),
    Present,
}

/// Renderer that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
    fail_present: bool,
    fail_clear: bool,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `present` call fail.
    #[must_use]
    pub fn failing_present(mut self) -> Self {
        self.fail_present = true;
        self
    }

    /// Make every `clear` call fail.
    #[must_use]
    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// Every call recorded so far.
    #[must_use]
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    /// Number of frames presented.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|c| **c == DrawCommand::Present)
            .count()
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        self.commands.borrow_mut().clear();
    }

    fn record(&self, command: DrawCommand) {
        trace!(?command, "draw");
        self.commands.borrow_mut().push(command);
    }
}

impl RendererBackend for RecordingRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        if self.fail_clear {
            return Err(RenderError::Backend("clear failed".into()));
        }
        self.record(DrawCommand::Clear);
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) -> Result<(), RenderError> {
        self.record(DrawCommand::SetDrawColor(color));
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect) -> Result<(), RenderError> {
        self.record(DrawCommand::FillRect(rect));
        Ok(())
    }

    fn draw_texture(&mut self, texture: TextureHandle, dest: Rect) -> Result<(), RenderError> {
        self.record(DrawCommand::Texture(texture, dest));
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if self.fail_present {
            return Err(RenderError::Backend("present failed".into()));
        }
        self.record(DrawCommand::Present);
        Ok(())
    }
}

/// Renderer that drops every call and only counts presented frames.
///
/// Unlike [`RecordingRenderer`] it keeps no per-call history, so it can back
/// a loop that runs for any number of frames.
#[derive(Debug, Clone, Default)]
pub struct NullRenderer {
    frames: Rc<Cell<u64>>,
}

impl NullRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}

impl RendererBackend for NullRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn set_draw_color(&mut self, _color: Color) -> Result<(), RenderError> {
        Ok(())
    }

    fn draw_filled_rect(&mut self, _rect: Rect) -> Result<(), RenderError> {
        Ok(())
    }

    fn draw_texture(&mut self, texture: TextureHandle, dest: Rect) -> Result<(), RenderError> {
        trace!(?texture, ?dest, "draw texture");
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.frames.set(self.frames.get() + 1);
        trace!(frame = self.frames.get(), "present");
        Ok(())
    }
}

/// Asset store holding handles only; no pixel or glyph data is loaded.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    textures: HashMap<String, TextureHandle>,
    fonts: HashMap<String, FontHandle>,
    next_handle: u32,
}

impl MemoryAssetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under `id`, replacing any previous one.
    pub fn add_texture(&mut self, id: impl Into<String>) -> TextureHandle {
        let id = id.into();
        let handle = TextureHandle(self.bump());
        debug!(asset_id = %id, ?handle, "texture added");
        self.textures.insert(id, handle);
        handle
    }

    /// Register a font under `id`, replacing any previous one.
    pub fn add_font(&mut self, id: impl Into<String>) -> FontHandle {
        let id = id.into();
        let handle = FontHandle(self.bump());
        debug!(asset_id = %id, ?handle, "font added");
        self.fonts.insert(id, handle);
        handle
    }

    /// Drop every texture and font.
    pub fn clear(&mut self) {
        debug!(
            textures = self.textures.len(),
            fonts = self.fonts.len(),
            "clearing assets"
        );
        self.textures.clear();
        self.fonts.clear();
    }

    fn bump(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl AssetStore for MemoryAssetStore {
    fn texture(&self, id: &str) -> Result<TextureHandle, AssetError> {
        self.textures
            .get(id)
            .copied()
            .ok_or_else(|| AssetError::TextureNotFound(id.to_owned()))
    }

    fn font(&self, id: &str) -> Result<FontHandle, AssetError> {
        self.fonts
            .get(id)
            .copied()
            .ok_or_else(|| AssetError::FontNotFound(id.to_owned()))
    }
}

/// Input source replaying one scripted batch of events per frame.
///
/// Once the script runs out every frame is empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: Rc<RefCell<Script>>,
}

#[derive(Debug, Default)]
struct Script {
    batches: VecDeque<Vec<InputEvent>>,
    current: VecDeque<InputEvent>,
    in_frame: bool,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame's worth of events.
    pub fn push_frame(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.script
            .borrow_mut()
            .batches
            .push_back(events.into_iter().collect());
    }

    /// Builder form of [`push_frame`](Self::push_frame).
    #[must_use]
    pub fn with_frame(self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.push_frame(events);
        self
    }

    /// Frames not yet replayed.
    #[must_use]
    pub fn remaining_frames(&self) -> usize {
        self.script.borrow().batches.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        let mut guard = self.script.borrow_mut();
        let script = &mut *guard;
        if !script.in_frame {
            script.in_frame = true;
            script.current = script.batches.pop_front().unwrap_or_default().into();
        }
        let event = script.current.pop_front();
        if event.is_none() {
            script.in_frame = false;
        }
        event
    }
}

/// Window system tracking which windows are open.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWindowSystem {
    open: Rc<RefCell<BTreeSet<u32>>>,
    next_id: u32,
    fail_create: bool,
}

impl HeadlessWindowSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A window system whose `create_window` always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// Number of windows currently open.
    #[must_use]
    pub fn open_windows(&self) -> usize {
        self.open.borrow().len()
    }
}

impl WindowSystem for HeadlessWindowSystem {
    fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<WindowHandle, PlatformError> {
        if self.fail_create {
            return Err(PlatformError::WindowCreation(format!(
                "no display available for '{title}'"
            )));
        }
        self.next_id += 1;
        self.open.borrow_mut().insert(self.next_id);
        debug!(title, width, height, id = self.next_id, "window created");
        Ok(WindowHandle(self.next_id))
    }

    fn destroy_window(&mut self, window: WindowHandle) -> Result<(), PlatformError> {
        if !self.open.borrow_mut().remove(&window.0) {
            return Err(PlatformError::WindowDestroy(format!(
                "window {} is not open",
                window.0
            )));
        }
        debug!(id = window.0, "window destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use engine_system::KeyCode;

    use super::*;

    #[test]
    fn test_scripted_input_one_batch_per_frame() {
        let mut input = ScriptedInput::new()
            .with_frame([InputEvent::KeyDown(KeyCode::Up), InputEvent::KeyDown(KeyCode::Left)])
            .with_frame([InputEvent::Quit]);

        assert_eq!(input.poll_event(), Some(InputEvent::KeyDown(KeyCode::Up)));
        assert_eq!(input.poll_event(), Some(InputEvent::KeyDown(KeyCode::Left)));
        assert_eq!(input.poll_event(), None);

        assert_eq!(input.poll_event(), Some(InputEvent::Quit));
        assert_eq!(input.poll_event(), None);

        assert_eq!(input.poll_event(), None);
        assert_eq!(input.remaining_frames(), 0);
    }

    #[test]
    fn test_empty_frame_in_script() {
        let mut input = ScriptedInput::new()
            .with_frame(Vec::<InputEvent>::new())
            .with_frame([InputEvent::Quit]);
        assert_eq!(input.poll_event(), None);
        assert_eq!(input.poll_event(), Some(InputEvent::Quit));
    }

    #[test]
    fn test_recording_renderer_shares_log() {
        let handle = RecordingRenderer::new();
        let mut renderer = handle.clone();
        renderer.set_draw_color(Color::BLACK).unwrap();
        renderer.present().unwrap();
        assert_eq!(
            handle.commands(),
            vec![DrawCommand::SetDrawColor(Color::BLACK), DrawCommand::Present]
        );
        assert_eq!(handle.frames(), 1);
        handle.reset();
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_null_renderer_counts_frames_only() {
        let handle = NullRenderer::new();
        let mut renderer = handle.clone();
        for _ in 0..10_000 {
            renderer.set_draw_color(Color::BLACK).unwrap();
            renderer.clear().unwrap();
            renderer.draw_texture(TextureHandle(1), Rect::from_size(4, 4)).unwrap();
            renderer.present().unwrap();
        }
        assert_eq!(handle.frames(), 10_000);
    }

    #[test]
    fn test_failing_clear() {
        let handle = RecordingRenderer::new().failing_clear();
        let mut renderer = handle.clone();
        assert!(matches!(renderer.clear(), Err(RenderError::Backend(_))));
        renderer.present().unwrap();
        assert_eq!(handle.commands(), vec![DrawCommand::Present]);
    }

    #[test]
    fn test_asset_store_lookup() {
        let mut assets = MemoryAssetStore::new();
        let tank = assets.add_texture("tank");
        let font = assets.add_font("charriot");
        assert_eq!(assets.texture("tank"), Ok(tank));
        assert_eq!(assets.font("charriot"), Ok(font));
        assert_eq!(
            assets.texture("jungle"),
            Err(AssetError::TextureNotFound("jungle".into()))
        );

        assets.clear();
        assert!(assets.texture("tank").is_err());
        assert!(assets.font("charriot").is_err());
    }

    #[test]
    fn test_window_lifecycle() {
        let handle = HeadlessWindowSystem::new();
        let mut windows = handle.clone();
        let window = windows.create_window("demo", 800, 600).unwrap();
        assert_eq!(handle.open_windows(), 1);
        windows.destroy_window(window).unwrap();
        assert_eq!(handle.open_windows(), 0);
        assert!(windows.destroy_window(window).is_err());
    }

    #[test]
    fn test_failing_window_system() {
        let mut windows = HeadlessWindowSystem::failing();
        assert!(matches!(
            windows.create_window("demo", 800, 600),
            Err(PlatformError::WindowCreation(_))
        ));
    }
}
