use std::fmt;
use std::ops::{Deref, DerefMut};

/// A wrapper type that ensures 64-byte alignment of the inner value.
///
/// Accumulator arrays are kept behind this wrapper so that vectorized reads
/// in the output reduction start on a cache-line boundary.
#[repr(C, align(64))]
#[derive(Clone, Copy)]
pub struct Align64<T>(pub T);

impl<T> Deref for Align64<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Align64<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Default> Default for Align64<T> {
    fn default() -> Self {
        Self(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Align64<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
