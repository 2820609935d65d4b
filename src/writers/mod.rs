pub mod rose_renderer;

pub use rose_renderer::{ChartRenderer, RasterRoseRenderer, RenderedChart};
