pub mod animator;
pub mod drag;
pub mod input;
pub mod selection;
pub mod viewport;

pub use animator::{AnimationLoop, RafScheduler};
pub use input::{InputOutcome, InputTranslator, PointerInput};
pub use selection::{SelectionAction, SelectionState};
pub use viewport::{LayoutStatus, Motion, Viewport};
