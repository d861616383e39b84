// Keyshow Core Library
// Event-to-markup engine for the on-screen input transcript

pub mod capture;
pub mod catalog;
pub mod engine;
pub mod event;
pub mod manager;
pub mod markup;
pub mod modifier;
pub mod render;
pub mod settings;
pub mod transcript;

pub use capture::{CaptureError, EventSender};
pub use catalog::{GlyphAlt, ReplText, Replacement, ReplacementCatalog, ResolvedRepl};
pub use engine::{ImageListener, LabelEngine, LabelListener};
pub use event::{ButtonEvent, ButtonState, CaptureEvent, KeyEvent, ModState};
pub use manager::DisplayManager;
pub use markup::{FontInventory, MarkupEncoder, StaticFonts};
pub use modifier::Modifier;
pub use render::{render_label, RenderSettings};
pub use settings::{BackspaceMode, KeyMode, ModsMode, Options, OptionsError};
pub use transcript::{RenderedKey, Transcript};
