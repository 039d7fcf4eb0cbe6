//! Support items for code generated by `#[derive(Configure)]`

use crate::schema::Configure;
use std::marker::PhantomData;

/// Marker for the type of a field that carries no `env` attribute
///
/// Method resolution picks [`IsRecord::check`] when the type implements
/// [`Configure`] and falls back to [`NotRecord::check`] otherwise. Only the
/// first is deprecated, so the derive raises a warning exactly on untagged
/// record fields.
pub struct Untagged<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> Untagged<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for Untagged<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait IsRecord {
    #[deprecated(
        note = "this record field is not traversed for environment overrides; mark it #[env(nested)] to traverse it or #[env(skip)] to leave it out"
    )]
    fn check(&self) -> bool {
        true
    }
}

impl<T: Configure + ?Sized> IsRecord for Untagged<T> {}

pub trait NotRecord {
    fn check(&self) -> bool {
        false
    }
}

impl<T: ?Sized> NotRecord for &Untagged<T> {}
