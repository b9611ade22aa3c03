#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub channels: usize,
    pub stride: usize, // samples between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Samples of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = y * self.stride + x * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[y * self.stride + x * self.channels + c]
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
}
