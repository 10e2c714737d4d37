pub mod context;
pub mod scene;
pub mod style;
pub mod svg;

// Re-export main types
pub use context::{DrawCommand, NoticeAnchor, RenderContext};
pub use scene::MapScene;
pub use style::{Color, MapStyle};
pub use svg::{save_svg, to_svg};
