//! Reusable float buffers for vertex attributes
//!
//! A [`GeometryBuffer`] keeps its physical capacity separate from the logical
//! `limit` that consumers read, so layout passes can rewrite it in place and
//! only reallocate when a longer text no longer fits.

use serde::{Deserialize, Serialize};

use super::error::{TextError, TextResult};
use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Upload hint passed along with the buffer to the draw sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessMode {
    /// Written once, drawn many times
    #[default]
    Static,
    /// Rewritten occasionally, drawn many times
    Dynamic,
    /// Rewritten about as often as it is drawn
    Stream,
}

/// Float buffer grouped into fixed-size tuples (one tuple per vertex)
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    data: Vec<f32>,
    values_per_tuple: usize,
    limit: usize,
    position: usize,
    access_mode: AccessMode,
}

impl GeometryBuffer {
    /// Allocate room for `tuple_capacity` tuples of `values_per_tuple` floats
    ///
    /// The limit starts at the full capacity.
    pub fn new(tuple_capacity: usize, values_per_tuple: usize) -> TextResult<Self> {
        Self::from_vec(vec![0.0; tuple_capacity * values_per_tuple], values_per_tuple)
    }

    /// Buffer of 3-float tuples (positions, normals)
    pub fn vec3(tuple_capacity: usize) -> Self {
        Self::with_tuple_size(tuple_capacity, 3)
    }

    /// Buffer of 2-float tuples (texture coordinates)
    pub fn vec2(tuple_capacity: usize) -> Self {
        Self::with_tuple_size(tuple_capacity, 2)
    }

    fn with_tuple_size(tuple_capacity: usize, values_per_tuple: usize) -> Self {
        Self {
            data: vec![0.0; tuple_capacity * values_per_tuple],
            values_per_tuple,
            limit: tuple_capacity * values_per_tuple,
            position: 0,
            access_mode: AccessMode::default(),
        }
    }

    /// Wrap existing data
    pub fn from_vec(data: Vec<f32>, values_per_tuple: usize) -> TextResult<Self> {
        if values_per_tuple < 1 {
            return Err(TextError::InvalidArgument(
                "values per tuple must be at least 1".to_string(),
            ));
        }
        let limit = data.len();
        Ok(Self {
            data,
            values_per_tuple,
            limit,
            position: 0,
            access_mode: AccessMode::default(),
        })
    }

    /// Floats per tuple
    pub fn values_per_tuple(&self) -> usize {
        self.values_per_tuple
    }

    /// Physical capacity in floats
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Physical capacity in whole tuples
    pub fn tuple_capacity(&self) -> usize {
        self.data.len() / self.values_per_tuple
    }

    /// Logical end in floats
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of tuples up to the limit
    pub fn tuple_count(&self) -> usize {
        self.limit / self.values_per_tuple
    }

    /// Set the logical end to `tuples` tuples and rewind
    pub fn set_tuple_limit(&mut self, tuples: usize) -> TextResult<()> {
        let limit = tuples * self.values_per_tuple;
        if limit > self.data.len() {
            return Err(TextError::InvalidArgument(format!(
                "limit of {} tuples exceeds capacity of {}",
                tuples,
                self.tuple_capacity()
            )));
        }
        self.limit = limit;
        self.rewind();
        Ok(())
    }

    /// Current write position in floats
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the write position back to the start
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Upload hint
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    /// Change the upload hint
    pub fn set_access_mode(&mut self, access_mode: AccessMode) {
        self.access_mode = access_mode;
    }

    /// Write `values` at the current position and advance past them
    ///
    /// Fails without writing anything if fewer than `values.len()` floats
    /// remain before the limit.
    pub fn put(&mut self, values: &[f32]) -> TextResult<()> {
        let end = self.position + values.len();
        if end > self.limit {
            return Err(TextError::InvalidArgument(format!(
                "write of {} floats at {} overflows buffer limit {}",
                values.len(),
                self.position,
                self.limit
            )));
        }
        self.data[self.position..end].copy_from_slice(values);
        self.position = end;
        Ok(())
    }

    /// Write a 2D vector
    pub fn put_vec2(&mut self, v: &Vec2) -> TextResult<()> {
        self.put(&[v.x, v.y])
    }

    /// Write a 3D vector
    pub fn put_vec3(&mut self, v: &Vec3) -> TextResult<()> {
        self.put(&[v.x, v.y, v.z])
    }

    /// Write an RGBA color
    pub fn put_rgba(&mut self, color: &Vec4) -> TextResult<()> {
        self.put(&[color.x, color.y, color.z, color.w])
    }

    /// Scale every value up to the limit; value `n` uses `scales[n % scales.len()]`
    pub fn scale_data(&mut self, scales: &[f32]) -> TextResult<()> {
        if scales.is_empty() {
            return Err(TextError::InvalidArgument("no scale values given".to_string()));
        }
        for (i, value) in self.data[..self.limit].iter_mut().enumerate() {
            *value *= scales[i % scales.len()];
        }
        self.rewind();
        Ok(())
    }

    /// Offset every value up to the limit; value `n` uses `translates[n % translates.len()]`
    pub fn translate_data(&mut self, translates: &[f32]) -> TextResult<()> {
        if translates.is_empty() {
            return Err(TextError::InvalidArgument("no translation values given".to_string()));
        }
        for (i, value) in self.data[..self.limit].iter_mut().enumerate() {
            *value += translates[i % translates.len()];
        }
        self.rewind();
        Ok(())
    }

    /// Values up to the limit
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..self.limit]
    }

    /// Values up to the limit as raw bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Tuple `index` as a slice, if it lies below the limit
    pub fn tuple(&self, index: usize) -> Option<&[f32]> {
        let start = index * self.values_per_tuple;
        self.as_slice().get(start..start + self.values_per_tuple)
    }
}
