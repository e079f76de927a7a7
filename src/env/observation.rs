//! Grid encoding for agents.
//!
//! An observation is a `height x width x depth` tensor of type ids, flattened
//! row-major. Each square lists its instances top-first (the same order a
//! renderer draws them in), truncated to `depth`. Ids are shifted by one so
//! that `0` always means "nothing here".

use crate::grid::Grid;
use crate::objects::Instance;

/// Encoded grid tensor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<i32>,

    /// `[height, width, depth]`.
    pub shape: [usize; 3],
}

impl Observation {
    /// Create a zero-filled observation.
    #[must_use]
    pub fn zeros(height: usize, width: usize, depth: usize) -> Self {
        Self {
            tensor: vec![0; height * width * depth],
            shape: [height, width, depth],
        }
    }

    /// Encode `grid`, keeping at most `depth` instances per square.
    #[must_use]
    pub fn encode(grid: &Grid, depth: usize) -> Self {
        let mut observation = Self::zeros(grid.height(), grid.width(), depth);
        let mut stack: Vec<&Instance> = Vec::with_capacity(depth);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                stack.clear();
                stack.extend(grid.get_objects_at(x as i32, y as i32));
                stack.sort_by_key(|instance| std::cmp::Reverse(instance.draw_order()));

                let base = observation.offset(y, x, 0);
                for (k, instance) in stack.iter().take(depth).enumerate() {
                    observation.tensor[base + k] = i32::from(instance.type_id.raw()) + 1;
                }
            }
        }
        observation
    }

    fn offset(&self, y: usize, x: usize, k: usize) -> usize {
        let [_, width, depth] = self.shape;
        (y * width + x) * depth + k
    }

    /// Value at `(y, x, k)`, or `None` outside the tensor.
    #[must_use]
    pub fn get(&self, y: usize, x: usize, k: usize) -> Option<i32> {
        let [height, width, depth] = self.shape;
        if y >= height || x >= width || k >= depth {
            return None;
        }
        self.tensor.get(self.offset(y, x, k)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }
}
