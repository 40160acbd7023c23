// Growable output buffer with explicit, fallible capacity management.
//
// The reallocate-and-repoint pattern shared by the growth loops lives in
// this one type: the codec appends into the inner Vec's spare capacity,
// and `grow` may relocate storage between steps.  Relocation is invisible
// to the codec because every step receives the Vec afresh.

use log::trace;

use crate::error::CodecError;

/// Heap-owned output region for one compression or decompression pass.
///
/// Owned exclusively by the in-flight pass until `into_vec` or
/// `into_trimmed` hands it to the caller; on failure it is simply dropped.
/// Allocated capacity never shrinks below the codec's declared remaining
/// output at a step boundary.
pub struct OutputBuf {
    buf: Vec<u8>,
    context: &'static str,
}

impl OutputBuf {
    /// Allocate with room for `capacity` bytes.
    ///
    /// `context` locates the pass in allocation-failure diagnostics.
    pub fn with_capacity(capacity: usize, context: &'static str) -> Result<Self, CodecError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| CodecError::alloc(context))?;
        Ok(Self { buf, context })
    }

    /// Unused room between the write cursor and the allocated capacity.
    pub fn remaining(&self) -> usize {
        self.buf.capacity() - self.buf.len()
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.buf.len()
    }

    /// Allocated capacity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The inner Vec a codec step appends into.
    pub fn vec_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    /// Extend the allocated capacity by `additional` bytes. May relocate.
    pub fn grow(&mut self, additional: usize) -> Result<(), CodecError> {
        let before = self.buf.capacity();
        let want = before - self.buf.len() + additional;
        self.buf
            .try_reserve_exact(want)
            .map_err(|_| CodecError::alloc(self.context))?;
        trace!(
            "grew output buffer {} -> {} bytes ({} written)",
            before,
            self.buf.capacity(),
            self.buf.len()
        );
        Ok(())
    }

    /// Double the allocated capacity. May relocate.
    pub fn grow_double(&mut self) -> Result<(), CodecError> {
        self.grow(self.buf.capacity())
    }

    /// Hand the buffer to the caller with exactly `produced` valid bytes,
    /// keeping any excess capacity.
    pub fn into_vec(mut self, produced: u64) -> Vec<u8> {
        debug_assert!(produced as usize <= self.buf.capacity());
        self.buf.truncate(produced as usize);
        self.buf
    }

    /// Hand the buffer to the caller with exactly `produced` valid bytes,
    /// releasing excess capacity from an over-sized allocation.
    pub fn into_trimmed(mut self, produced: u64) -> Vec<u8> {
        self.buf.truncate(produced as usize);
        self.buf.shrink_to_fit();
        self.buf
    }
}
