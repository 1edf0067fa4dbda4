//! Thread-shared text entities
//!
//! An update thread edits the string while a render thread draws it. Both go
//! through one mutex per entity, so a layout rebuild and a draw pass never
//! interleave.

use std::sync::{Arc, Mutex, MutexGuard};

use super::bitmap_text::BitmapText;
use super::error::{TextError, TextResult};
use crate::render::{CameraSnapshot, GeometrySink};

/// Cloneable handle to a [`BitmapText`] behind a mutex
#[derive(Debug, Clone)]
pub struct SharedBitmapText {
    name: Arc<str>,
    inner: Arc<Mutex<BitmapText>>,
}

impl SharedBitmapText {
    /// Wrap an entity for sharing
    pub fn new(text: BitmapText) -> Self {
        Self {
            name: Arc::from(text.name()),
            inner: Arc::new(Mutex::new(text)),
        }
    }

    /// Entity name, readable without locking
    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> TextResult<MutexGuard<'_, BitmapText>> {
        self.inner
            .lock()
            .map_err(|_| TextError::LockPoisoned(self.name.to_string()))
    }

    /// Replace the string under the lock
    pub fn set_text(&self, text: &str) -> TextResult<()> {
        self.lock()?.set_text(text)
    }

    /// Run the draw pass under the lock
    pub fn draw(&self, camera: &CameraSnapshot, sink: &mut dyn GeometrySink) -> TextResult<bool> {
        Ok(self.lock()?.draw(camera, sink))
    }

    /// Read the entity under the lock
    pub fn with<R>(&self, f: impl FnOnce(&BitmapText) -> R) -> TextResult<R> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    /// Modify the entity under the lock
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut BitmapText) -> R) -> TextResult<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}
