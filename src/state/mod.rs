pub mod board;
pub mod camera;
pub mod goto;
pub mod touch;
pub mod transform;

pub use board::{BoardController, InputEvent, KeyFocus};
pub use camera::Viewport;
pub use touch::MouseButton;
pub use transform::Surface;
