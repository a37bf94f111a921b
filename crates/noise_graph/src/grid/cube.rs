//! Dense 3D storage for sampled noise values.
/// A 3D grid of `f32` samples stored slice by slice (`z`, then `y`, then `x`), with a border
/// value for out-of-range reads.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseCube {
    width: usize,
    height: usize,
    depth: usize,
    border_value: f32,
    data: Vec<f32>,
}

impl Default for NoiseCube {
    fn default() -> Self {
        Self::empty()
    }
}

impl NoiseCube {
    /// Create a cube of the given size, initializing all values to zero.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        let mut cube = Self::empty();
        cube.set_size(width, height, depth);
        cube
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            depth: 0,
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

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the size of the cube as `(width, height, depth)`.
    pub fn size(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of samples in one depth slice.
    pub fn slice_len(&self) -> usize {
        self.width * self.height
    }

    /// Resize the cube, replacing its contents with zeroes.
    ///
    /// Resizing any dimension to zero empties the cube.
    pub fn set_size(&mut self, width: usize, height: usize, depth: usize) {
        if width == 0 || height == 0 || depth == 0 {
            self.width = 0;
            self.height = 0;
            self.depth = 0;
            self.data = Vec::new();
        } else {
            self.width = width;
            self.height = height;
            self.depth = depth;
            self.data = vec![0.0; width * height * depth];
        }
    }

    pub fn border_value(&self) -> f32 {
        self.border_value
    }

    pub fn set_border_value(&mut self, border_value: f32) {
        self.border_value = border_value;
    }

    #[inline]
    fn index(&self, x: isize, y: isize, z: isize) -> Option<usize> {
        if x < 0
            || y < 0
            || z < 0
            || x as usize >= self.width
            || y as usize >= self.height
            || z as usize >= self.depth
        {
            return None;
        }
        Some((z as usize * self.height + y as usize) * self.width + x as usize)
    }

    /// Get the value at `(x, y, z)`, returning the border value if out of bounds.
    #[inline]
    pub fn get(&self, x: isize, y: isize, z: isize) -> f32 {
        self.index(x, y, z)
            .map_or(self.border_value, |i| self.data[i])
    }

    /// Set the value at `(x, y, z)`; out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, z: isize, value: f32) {
        if let Some(i) = self.index(x, y, z) {
            self.data[i] = value;
        }
    }

    pub fn clear(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Depth slice `z` in row-major order, or `None` when out of range.
    pub fn slice(&self, z: usize) -> Option<&[f32]> {
        if z >= self.depth {
            return None;
        }
        let len = self.slice_len();
        self.data.get(z * len..(z + 1) * len)
    }

    pub fn slice_mut(&mut self, z: usize) -> Option<&mut [f32]> {
        if z >= self.depth {
            return None;
        }
        let len = self.slice_len();
        self.data.get_mut(z * len..(z + 1) * len)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn min_max(&self) -> Option<(f32, f32)> {
        super::min_max(&self.data)
    }
}
