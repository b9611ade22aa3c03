/// Read access to an interleaved 8-bit image.
pub trait ImageView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Samples per pixel.
    fn channels(&self) -> usize;
    /// Samples between the starts of consecutive rows.
    fn stride(&self) -> usize;

    /// The `width * channels` samples of row `y`.
    fn row(&self, y: usize) -> &[u8];
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [u8];
}
