//! Dense 2D storage for sampled noise values.
/// A row-major 2D grid of `f32` samples with a border value for out-of-range reads.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseMap {
    width: usize,
    height: usize,
    border_value: f32,
    data: Vec<f32>,
}

impl Default for NoiseMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl NoiseMap {
    /// Create a map of the given size, initializing all values to zero.
    ///
    /// Any zero dimension yields an empty map.
    pub fn new(width: usize, height: usize) -> Self {
        let mut map = Self::empty();
        map.set_size(width, height);
        map
    }

    /// Create a zero-sized map.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            border_value: 0.0,
            data: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the size of the map as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resize the map, replacing its contents with zeroes.
    ///
    /// Resizing either dimension to zero empties the map. The border value is kept.
    pub fn set_size(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            self.width = 0;
            self.height = 0;
            self.data = Vec::new();
        } else {
            self.width = width;
            self.height = height;
            self.data = vec![0.0; width * height];
        }
    }

    pub fn border_value(&self) -> f32 {
        self.border_value
    }

    pub fn set_border_value(&mut self, border_value: f32) {
        self.border_value = border_value;
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Get the value at `(x, y)`, returning the border value if out of bounds.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> f32 {
        self.index(x, y)
            .map_or(self.border_value, |i| self.data[i])
    }

    /// Set the value at `(x, y)`; out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, value: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    /// Fill every cell with `value`.
    pub fn clear(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Row `y`, or `None` when out of range.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut [f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get_mut(start..start + self.width)
    }

    /// All samples in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Smallest and largest sample, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        super::min_max(&self.data)
    }
}
