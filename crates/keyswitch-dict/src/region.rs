// Read-only byte regions with bounds-checked access

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

/// An immutable block of bytes backing a binary dictionary: either a
/// read-only memory map of the file or an owned buffer.
pub enum ByteRegion {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl std::fmt::Debug for ByteRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ByteRegion::Mapped(_) => "mapped",
            ByteRegion::Owned(_) => "owned",
        };
        f.debug_struct("ByteRegion")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl ByteRegion {
    /// Memory-map a file read-only.
    pub fn map_file(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the map is read-only and dictionary files are installed
        // resources that are not modified while the process runs.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(ByteRegion::Mapped(mmap))
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, ByteRegion::Mapped(_))
    }

    /// The sub-slice `[offset, offset + len)`, or `None` if any part of it
    /// falls outside the region.
    pub fn slice(&self, offset: u64, len: u64) -> Option<&[u8]> {
        let start = usize::try_from(offset).ok()?;
        let len = usize::try_from(len).ok()?;
        let end = start.checked_add(len)?;
        self.get(start..end)
    }

    /// Read a little-endian `u32` at a byte offset.
    pub fn u32_at(&self, offset: u64) -> Option<u32> {
        let bytes = self.slice(offset, 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl Deref for ByteRegion {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            ByteRegion::Mapped(m) => m,
            ByteRegion::Owned(v) => v,
        }
    }
}

impl From<Vec<u8>> for ByteRegion {
    fn from(bytes: Vec<u8>) -> Self {
        ByteRegion::Owned(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn slice_in_bounds() {
        let region = ByteRegion::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(region.slice(1, 3), Some(&[2u8, 3, 4][..]));
        assert_eq!(region.slice(5, 0), Some(&[][..]));
    }

    #[test]
    fn slice_out_of_bounds() {
        let region = ByteRegion::from(vec![1, 2, 3]);
        assert_eq!(region.slice(2, 2), None);
        assert_eq!(region.slice(u64::MAX, 1), None);
        assert_eq!(region.slice(1, u64::MAX), None);
    }

    #[test]
    fn u32_little_endian() {
        let region = ByteRegion::from(vec![0x78, 0x56, 0x34, 0x12, 0xFF]);
        assert_eq!(region.u32_at(0), Some(0x1234_5678));
        assert_eq!(region.u32_at(2), None);
    }

    #[test]
    fn map_file_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"mapped bytes").unwrap();
        file.flush().unwrap();
        let region = ByteRegion::map_file(file.path()).unwrap();
        assert!(region.is_mapped());
        assert_eq!(&region[..6], b"mapped");
    }
}
