//! Drawing state machine and editor state.

use crate::config::{Action, ColorScheme, Config, KeyBinding, KeybindingsConfig};
use crate::draw::element::{PEN_STROKE_WIDTH, TEXT_FONT_SIZE};
use crate::draw::{Color, Element, ElementTool, Frame, History, Point};
use crate::input::{modifiers::Modifiers, tool::Tool};
use crate::util::IdGenerator;
use log::{debug, warn};
use std::collections::HashMap;

/// Smallest stroke width the editor accepts.
pub const MIN_STROKE_WIDTH: f64 = 2.0;
/// Largest stroke width the editor accepts.
pub const MAX_STROKE_WIDTH: f64 = 20.0;

/// Current drawing mode state machine.
///
/// The open element is referenced by id so that edits to the scene while a
/// stroke is in progress (an undo, a redo) can never redirect the stroke onto
/// a different element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrawingState {
    /// Not actively drawing - waiting for user input
    #[default]
    Idle,
    /// Pointer held down while a stroke or shape grows
    Drawing {
        /// Id of the element being extended
        element_id: String,
    },
}

/// Main editor state: the scene plus everything needed to edit it.
///
/// Surfaces feed pointer and key events into this struct and render
/// [`EditorState::frame`] afterwards whenever `needs_redraw` is set.
pub struct EditorState {
    /// Active tool
    pub(super) tool: Tool,
    /// Colour given to new strokes, shapes and text
    pub(super) current_color: Color,
    /// Stroke width given to new pen strokes and shapes
    pub(super) current_stroke_width: f64,
    /// Font size given to new text elements
    pub text_font_size: f64,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current drawing mode state machine
    pub(super) state: DrawingState,
    /// All committed elements in z-order
    pub(super) frame: Frame,
    /// Redo storage
    pub(super) history: History,
    /// Selected element id (select tool only)
    pub(super) selection: Option<String>,
    /// Last known pointer position on the canvas
    pub(super) cursor: Option<Point>,
    /// Whether the surface needs to redraw
    pub needs_redraw: bool,
    ids: IdGenerator,
    action_map: HashMap<KeyBinding, Action>,
    color_scheme: ColorScheme,
    light_color: Color,
    dark_color: Color,
}

impl Default for EditorState {
    fn default() -> Self {
        let action_map = KeybindingsConfig::default()
            .build_action_map()
            .unwrap_or_else(|err| {
                warn!("Default keybindings rejected ({err}); shortcuts disabled");
                HashMap::new()
            });
        Self::with_defaults(Color::light_default(), PEN_STROKE_WIDTH, action_map)
    }
}

impl EditorState {
    /// Creates an empty editor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty editor.
    ///
    /// # Arguments
    /// * `color` - Initial drawing colour
    /// * `stroke_width` - Initial stroke width, clamped to the accepted range
    /// * `action_map` - Keybinding action map
    pub fn with_defaults(
        color: Color,
        stroke_width: f64,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        let mut state = Self {
            tool: Tool::default(),
            current_color: color,
            current_stroke_width: PEN_STROKE_WIDTH,
            text_font_size: TEXT_FONT_SIZE,
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            frame: Frame::new(),
            history: History::new(),
            selection: None,
            cursor: None,
            needs_redraw: true,
            ids: IdGenerator::new(),
            action_map,
            color_scheme: ColorScheme::Light,
            light_color: Color::light_default(),
            dark_color: Color::dark_default(),
        };
        state.set_stroke_width(stroke_width);
        state
    }

    /// Creates an empty editor configured from user settings.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)?;

        let mut state = Self::with_defaults(
            config.initial_color(),
            config.drawing.default_stroke_width,
            action_map,
        );
        state.text_font_size = config.drawing.text_font_size;
        state.color_scheme = config.theme.scheme;
        state.light_color = config.theme_color(ColorScheme::Light);
        state.dark_color = config.theme_color(ColorScheme::Dark);
        Ok(state)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool.
    ///
    /// Leaving `Select` clears the selection. An in-progress stroke is
    /// finished as it stands.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        debug!("Tool {} -> {}", self.tool, tool);
        if self.tool == Tool::Select {
            self.clear_selection();
        }
        self.state = DrawingState::Idle;
        self.tool = tool;
        self.needs_redraw = true;
    }

    pub fn current_color(&self) -> &Color {
        &self.current_color
    }

    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
    }

    pub fn stroke_width(&self) -> f64 {
        self.current_stroke_width
    }

    /// Sets the stroke width for new elements, clamped to
    /// [`MIN_STROKE_WIDTH`]..=[`MAX_STROKE_WIDTH`]. Non-finite values are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        if !width.is_finite() {
            warn!("Ignoring non-finite stroke width {width}");
            return;
        }
        self.current_stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        self.needs_redraw = true;
    }

    /// The scene in z-order.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn elements(&self) -> &[Element] {
        &self.frame.elements
    }

    pub fn drawing_state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.frame.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Last pointer position reported through `pointer_moved`.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Position and diameter of the dot-cursor preview, when the active tool shows one.
    pub fn dot_cursor(&self) -> Option<(Point, f64)> {
        if !self.tool.uses_dot_cursor() {
            return None;
        }
        self.cursor.map(|pos| (pos, self.current_stroke_width))
    }

    /// Replaces the whole scene, e.g. after loading a note.
    ///
    /// History, selection and any in-progress stroke are discarded.
    pub fn load_scene(&mut self, frame: Frame) {
        debug!("Loading scene with {} elements", frame.len());
        self.frame = frame;
        self.history.reset();
        self.selection = None;
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// Reacts to the surrounding application switching between light and dark.
    ///
    /// The pen colour follows the scheme only while it still holds the other
    /// scheme's default; an explicitly picked colour is kept.
    pub fn on_color_scheme_changed(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
        let (from, to) = match scheme {
            ColorScheme::Dark => (&self.light_color, &self.dark_color),
            ColorScheme::Light => (&self.dark_color, &self.light_color),
        };
        if self.current_color.matches(from.as_str()) {
            debug!("Colour scheme {:?}: pen {} -> {}", scheme, from, to);
            self.current_color = to.clone();
            self.needs_redraw = true;
        }
    }

    /// Look up an action for the given key and the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.primary(),
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Fresh id for a new element; never one already present in the scene.
    pub(super) fn next_id(&mut self, tool: ElementTool) -> String {
        loop {
            let id = self.ids.next(tool.as_str());
            if !self.frame.contains(&id) {
                return id;
            }
        }
    }
}
