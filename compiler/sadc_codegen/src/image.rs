//! Contains the [`Image`], the memory contents the machine starts with.

use std::{fmt::Display, ops::Deref};

use itertools::Itertools;

use crate::MEMORY_SIZE;

/// The full memory of the machine: the code, then the static variables, zero
/// padding and the heap at the very top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    bytes: [u8; MEMORY_SIZE],
}

impl Image {
    /// Assembles the image out of the code and the heap. The bytes of the
    /// static variables are left as zero.
    ///
    /// # Panics
    ///
    /// Panics if the code overlaps the heap.
    #[must_use]
    pub(crate) fn new(code: &[u8], heap: &[u8]) -> Self {
        assert!(code.len() + heap.len() <= MEMORY_SIZE, "memory overflow");

        let mut bytes = [0; MEMORY_SIZE];
        bytes[..code.len()].copy_from_slice(code);
        bytes[MEMORY_SIZE - heap.len()..].copy_from_slice(heap);

        Self { bytes }
    }

    /// Gets the null-terminated string starting at `address`, without the
    /// terminator.
    #[must_use]
    pub fn string_at(&self, address: u8) -> &[u8] {
        let rest = &self.bytes[usize::from(address)..];
        let end = rest.iter().position(|x| *x == 0).unwrap_or(rest.len());

        &rest[..end]
    }
}

impl Deref for Image {
    type Target = [u8];

    fn deref(&self) -> &Self::Target { &self.bytes }
}

impl Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self
            .bytes
            .chunks(8)
            .map(|line| line.iter().map(|x| format!("{x:02X}")).join(" "))
            .join("\n");

        f.write_str(&lines)
    }
}
