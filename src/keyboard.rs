pub mod buffer;
pub mod host;
pub mod key_event;
pub mod mode;
pub mod state_machine;

pub use buffer::{CONTEXT_WINDOW_CHARS, TextBuffer};
pub use host::{FieldMetadata, HostField, InputClass, MemoryField, SubmitAction};
pub use key_event::{BufferDelta, KeyEvent, KeyOutcome};
pub use mode::{KeyboardMode, ShiftState};
pub use state_machine::{DEFAULT_DOUBLE_TAP_WINDOW, DesyncError, KeyStateMachine};
