//! Contains the [`Handler`] trait, the sink every compilation stage reports its
//! errors and warnings into, together with a few stock implementations.

use parking_lot::{RwLock, RwLockReadGuard};

/// Represents a trait responsible for handling diagnostics in the compiler.
pub trait Handler<T>: Send + Sync {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

impl<T, H: Handler<T> + ?Sized> Handler<T> for &H {
    fn receive(&self, diagnostic: T) { (**self).receive(diagnostic) }
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in
/// a vector.
#[derive(Debug)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: RwLock::new(Vec::new()) } }

    /// Consumes the [`Storage`] and returns the underlying vector of
    /// diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }

    /// Returns a reference to the underlying vector of diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> { self.diagnostics.read() }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) {
        self.diagnostics.write().push(diagnostic.into());
    }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _: T) {}
}

#[cfg(test)]
mod test {
    use super::{Dummy, Handler, Storage};

    #[test]
    fn storage_collects_in_order() {
        let storage: Storage<u32> = Storage::new();

        storage.receive(1u32);
        storage.receive(2u32);

        assert_eq!(*storage.as_vec(), vec![1, 2]);
        assert_eq!(storage.into_vec(), vec![1, 2]);
    }

    #[test]
    fn storage_converts_on_receive() {
        let storage: Storage<u64> = Storage::new();

        storage.receive(3u32);
        Dummy.receive(4u32);

        assert_eq!(storage.into_vec(), vec![3u64]);
    }
}
