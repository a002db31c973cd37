use crate::eight_dot::BLOCK_WIDTH;

/// A half-open pixel rectangle `[left, right) x [top, bottom)`.
///
/// Hosts that render only part of a frame hand the engine a region in
/// image coordinates. Coordinates are signed because hosts may report
/// rectangles that start outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The whole of a `width x height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, to_coord(width), to_coord(height))
    }

    #[inline]
    pub fn width(&self) -> usize {
        span(self.left, self.right)
    }

    #[inline]
    pub fn height(&self) -> usize {
        span(self.top, self.bottom)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Clamp the region into a `width x height` image. The result never has
    /// `right < left` or `bottom < top`.
    pub fn clamp_to(self, width: usize, height: usize) -> Self {
        let (w, h) = (to_coord(width), to_coord(height));
        let left = self.left.clamp(0, w);
        let top = self.top.clamp(0, h);
        Self {
            left,
            top,
            right: self.right.clamp(left, w),
            bottom: self.bottom.clamp(top, h),
        }
    }

    /// Widen the horizontal bounds to 8-pixel block boundaries (left
    /// rounded down, right rounded up), then clamp to the image.
    ///
    /// Dither tiles and 8-dot blocks are anchored at image column 0, so a
    /// region that splits a block would be quantized differently from the
    /// full frame.
    ///
    /// # Example
    /// ```
    /// use msx1_quantize::Region;
    ///
    /// let r = Region::new(3, 5, 19, 9).align_to_blocks(20, 10);
    /// assert_eq!(r, Region::new(0, 5, 20, 9));
    /// let r = Region::new(-3, 0, 9, 4).align_to_blocks(64, 4);
    /// assert_eq!(r, Region::new(0, 0, 16, 4));
    /// ```
    pub fn align_to_blocks(self, width: usize, height: usize) -> Self {
        let block = BLOCK_WIDTH as i32;
        Self {
            left: self.left.div_euclid(block) * block,
            right: self.right.saturating_add(block - 1).div_euclid(block) * block,
            ..self
        }
        .clamp_to(width, height)
    }

    /// Widen the vertical bounds to multiples of `cell_height` rows, then
    /// clamp to the image. Attribute cells are anchored at image row 0.
    ///
    /// # Example
    /// ```
    /// use msx1_quantize::Region;
    ///
    /// let r = Region::new(8, 3, 16, 11).align_to_cells(8, 32, 20);
    /// assert_eq!(r, Region::new(8, 0, 16, 16));
    /// ```
    pub fn align_to_cells(self, cell_height: usize, width: usize, height: usize) -> Self {
        let cell = to_coord(cell_height.max(1));
        Self {
            top: self.top.div_euclid(cell) * cell,
            bottom: self.bottom.saturating_add(cell - 1).div_euclid(cell) * cell,
            ..self
        }
        .clamp_to(width, height)
    }
}

/// Length of `[start, end)`, zero when inverted. Computed in `i64` so
/// rectangles spanning the whole `i32` range do not overflow.
fn span(start: i32, end: i32) -> usize {
    usize::try_from((i64::from(end) - i64::from(start)).max(0)).unwrap_or(usize::MAX)
}

fn to_coord(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
