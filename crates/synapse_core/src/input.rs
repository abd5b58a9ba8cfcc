//! Input event types consumed by the control widgets
//!
//! Hosts translate their native pointer, touch and keyboard events into these
//! before handing them to a widget. Timestamps are in milliseconds on any
//! monotonic clock; widgets only ever compare them with each other.

/// Pointer (mouse or pen) events in widget-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved
    Moved { x: f32, y: f32 },
    /// Primary button pressed
    Pressed { x: f32, y: f32 },
    /// Primary button released
    Released { x: f32, y: f32 },
    /// Pointer left the widget
    Left,
}

/// Touch phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// A single-finger touch event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
    /// Event time in milliseconds
    pub timestamp_ms: u64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    pub fn started(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(TouchPhase::Started, x, y, timestamp_ms)
    }

    pub fn ended(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(TouchPhase::Ended, x, y, timestamp_ms)
    }
}

/// Keys the control surfaces react to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Tab,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Plus,
    Minus,
    /// Digit keys `0`-`9`
    Digit(u8),
    /// Any other printable character
    Char(char),
    /// Unmapped key
    Unknown,
}

impl Key {
    /// Map a printable character to a key
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '+' | '=' => Key::Plus,
            '-' | '_' => Key::Minus,
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            other => Key::Char(other),
        }
    }

    /// Whether this key activates a focused control
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub state: KeyState,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press without modifiers
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
        }
    }
}
