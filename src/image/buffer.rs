//! Owned interleaved 8-bit image in row-major layout (stride == width * channels).

use super::{ImageU8, ImageView, ImageViewMut};
use crate::error::ImageError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Construct a zero-initialized buffer of size `width × height × channels`.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    /// Wrap raw samples, checking that the length matches the dimensions.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if !(1..=4).contains(&channels) {
            return Err(ImageError::Channels(channels));
        }
        if data.len() != width * height * channels {
            return Err(ImageError::BufferSize {
                width,
                height,
                channels,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
            data: &self.data,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl ImageView for PixelBuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn stride(&self) -> usize {
        self.width * self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let len = self.width * self.channels;
        let start = y * len;
        &self.data[start..start + len]
    }
}

impl ImageViewMut for PixelBuffer {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let len = self.width * self.channels;
        let start = y * len;
        &mut self.data[start..start + len]
    }
}
