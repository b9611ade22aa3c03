//! Pixel buffers and codec I/O.
//!
//! Samples are 8-bit and interleaved (`channels` per pixel, row-major). The
//! borrowed [`ImageU8`] view is what the projector reads; the owned
//! [`PixelBuffer`] is what it produces and what the codec reads and writes.

pub mod buffer;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::buffer::PixelBuffer;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::ImageU8;
