//! Contains the [`Heap`], where the string literals of a program live.

use std::collections::HashMap;

use crate::MEMORY_SIZE;

/// The string literals of a program, laid out from the top of memory
/// downwards.
///
/// Every literal is stored once, followed by a null byte; interning the same
/// text again yields the address it already has.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Heap {
    /// The heap bytes, in reverse order of allocation.
    bytes: Vec<u8>,
    addresses: HashMap<String, usize>,
}

impl Heap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Gets the address of `literal`, allocating it if needed.
    ///
    /// The address may still be out of range at this point: it is checked
    /// against the size of the code once the layout is known.
    pub fn intern(&mut self, literal: &str) -> usize {
        if let Some(address) = self.addresses.get(literal) {
            return *address;
        }

        let mut bytes = literal.as_bytes().to_vec();
        bytes.push(0);
        bytes.append(&mut self.bytes);
        self.bytes = bytes;

        // negative addresses are reported as out of memory by the layout
        let address = self.start();
        self.addresses.insert(literal.to_owned(), address);

        log::trace!("codegen: interned {literal:?} at {address:02X}");

        address
    }

    /// Gets the lowest address the heap occupies.
    #[must_use]
    pub fn start(&self) -> usize {
        MEMORY_SIZE.saturating_sub(self.bytes.len())
    }

    /// Gets the number of bytes the heap occupies.
    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    /// Checks whether no literal was interned.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Gets the contents of the heap, from [`Heap::start`] to the top of
    /// memory.
    #[must_use]
    pub fn bytes(&self) -> &[u8] { &self.bytes }
}

#[cfg(test)]
mod test {
    use super::Heap;

    #[test]
    fn grows_downwards() {
        let mut heap = Heap::new();

        assert_eq!(heap.intern("ab"), 0xFD);
        assert_eq!(heap.intern("true"), 0xF8);
        assert_eq!(heap.start(), 0xF8);
        assert_eq!(heap.bytes(), b"true\0ab\0");
    }

    #[test]
    fn literals_are_interned_once() {
        let mut heap = Heap::new();

        let first = heap.intern("hello");
        let second = heap.intern("world");

        assert_eq!(heap.intern("hello"), first);
        assert_eq!(heap.intern("world"), second);
        assert_eq!(second, 0xF4);
        assert_eq!(heap.len(), 12);
    }

    #[test]
    fn empty_literal_is_a_null_byte() {
        let mut heap = Heap::new();

        assert_eq!(heap.intern(""), 0xFF);
        assert_eq!(heap.bytes(), &[0]);
    }
}
