// Binary dictionary format: header parsing, validation and encoding
//
// Layout (all integers little-endian):
//
//   header (80 bytes)
//   partition table   partition_count x 12 bytes
//   word-offset table (word_count + 1) x u32, relative to the word bytes
//   word bytes        concatenated UTF-8, sorted
//   filter bitmap     optional, LSB-first

use bytemuck::{Pod, Zeroable};

use crate::DictError;
use crate::filter::BloomFilter;

/// Magic tag: seven ASCII bytes and a NUL terminator.
pub const MAGIC: &[u8; 8] = b"KSWDICT\0";

/// The only format version this reader understands.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one partition table entry in bytes.
pub const PARTITION_ENTRY_SIZE: usize = 12;

/// Header flag: a filter bitmap is present.
pub const FLAG_HAS_FILTER: u32 = 1;

/// Parsed dictionary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub version: u32,
    pub flags: u32,
    pub word_count: u32,
    pub partition_count: u32,
    pub filter_bits: u32,
    pub filter_hashes: u32,
    pub partitions_offset: u64,
    pub offsets_offset: u64,
    pub words_offset: u64,
    pub words_length: u64,
    pub filter_offset: u64,
    pub filter_length: u64,
}

impl Header {
    pub fn has_filter(&self) -> bool {
        self.flags & FLAG_HAS_FILTER != 0
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC);
        for v in [
            self.version,
            self.flags,
            self.word_count,
            self.partition_count,
            self.filter_bits,
            self.filter_hashes,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        for v in [
            self.partitions_offset,
            self.offsets_offset,
            self.words_offset,
            self.words_length,
            self.filter_offset,
            self.filter_length,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
}

/// One partition table entry: every word starting with `first_scalar`
/// occupies ordinals `start..start + count`.
///
/// Stored little-endian; use the accessors rather than the raw fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PartitionEntry {
    first_scalar: u32,
    start: u32,
    count: u32,
}

const _: () = assert!(size_of::<PartitionEntry>() == PARTITION_ENTRY_SIZE);

impl PartitionEntry {
    pub fn new(first_scalar: char, start: u32, count: u32) -> Self {
        Self {
            first_scalar: (first_scalar as u32).to_le(),
            start: start.to_le(),
            count: count.to_le(),
        }
    }

    /// Decode an entry from exactly 12 bytes (no alignment required).
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < PARTITION_ENTRY_SIZE {
            return None;
        }
        Some(bytemuck::pod_read_unaligned(&bytes[..PARTITION_ENTRY_SIZE]))
    }

    /// The first scalar, or `None` if the stored value is not a valid `char`.
    pub fn first_scalar(&self) -> Option<char> {
        char::from_u32(u32::from_le(self.first_scalar))
    }

    pub fn start(&self) -> u32 {
        u32::from_le(self.start)
    }

    pub fn count(&self) -> u32 {
        u32::from_le(self.count)
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn read_u64(data: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[at..at + 8]);
    u64::from_le_bytes(buf)
}

/// Parses and validates the 80-byte dictionary header.
///
/// Only the header itself is validated here. Region offsets are checked
/// lazily by the index on each access, so a damaged body fails individual
/// lookups instead of the whole load.
pub fn parse_header(data: &[u8]) -> Result<Header, DictError> {
    if data.len() < HEADER_SIZE {
        return Err(DictError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }
    if &data[..8] != MAGIC {
        return Err(DictError::InvalidMagic);
    }
    let version = read_u32(data, 8);
    if version != FORMAT_VERSION {
        return Err(DictError::UnsupportedVersion(version));
    }

    Ok(Header {
        version,
        flags: read_u32(data, 12),
        word_count: read_u32(data, 16),
        partition_count: read_u32(data, 20),
        filter_bits: read_u32(data, 24),
        filter_hashes: read_u32(data, 28),
        partitions_offset: read_u64(data, 32),
        offsets_offset: read_u64(data, 40),
        words_offset: read_u64(data, 48),
        words_length: read_u64(data, 56),
        filter_offset: read_u64(data, 64),
        filter_length: read_u64(data, 72),
    })
}

/// Group a sorted word list into first-scalar partitions.
pub fn partitions_for<S: AsRef<str>>(sorted_words: &[S]) -> Vec<PartitionEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(char, u32)> = None;
    for (ordinal, word) in sorted_words.iter().enumerate() {
        let Some(first) = word.as_ref().chars().next() else {
            continue;
        };
        let ordinal = ordinal as u32;
        match current {
            Some((c, _)) if c == first => {}
            Some((c, start)) => {
                entries.push(PartitionEntry::new(c, start, ordinal - start));
                current = Some((first, ordinal));
            }
            None => current = Some((first, ordinal)),
        }
    }
    if let Some((c, start)) = current {
        entries.push(PartitionEntry::new(c, start, sorted_words.len() as u32 - start));
    }
    entries
}

/// Encode a word list (and optionally its filter) into the binary format.
///
/// Words are sorted and deduplicated; empty words are dropped.
pub fn encode_dictionary<I, S>(words: I, filter: Option<&BloomFilter>) -> Result<Vec<u8>, DictError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<&str> = Vec::new();
    let owned: Vec<S> = words.into_iter().collect();
    for w in &owned {
        if !w.as_ref().is_empty() {
            sorted.push(w.as_ref());
        }
    }
    sorted.sort_unstable();
    sorted.dedup();

    let word_count = u32::try_from(sorted.len())
        .map_err(|_| DictError::TooLarge(format!("{} words", sorted.len())))?;
    let partitions = partitions_for(&sorted);

    let mut offsets = Vec::with_capacity(sorted.len() + 1);
    let mut word_bytes = Vec::new();
    offsets.push(0u32);
    for w in &sorted {
        word_bytes.extend_from_slice(w.as_bytes());
        let end = u32::try_from(word_bytes.len())
            .map_err(|_| DictError::TooLarge(format!("{} bytes of words", word_bytes.len())))?;
        offsets.push(end);
    }

    let filter_bytes = filter.map(BloomFilter::to_bytes).unwrap_or_default();

    let partitions_offset = HEADER_SIZE as u64;
    let offsets_offset = partitions_offset + (partitions.len() * PARTITION_ENTRY_SIZE) as u64;
    let words_offset = offsets_offset + (offsets.len() * 4) as u64;
    let filter_offset = words_offset + word_bytes.len() as u64;

    let header = Header {
        version: FORMAT_VERSION,
        flags: if filter.is_some() { FLAG_HAS_FILTER } else { 0 },
        word_count,
        partition_count: partitions.len() as u32,
        filter_bits: filter.map_or(0, |f| f.bit_count() as u32),
        filter_hashes: filter.map_or(0, BloomFilter::hash_count),
        partitions_offset,
        offsets_offset,
        words_offset,
        words_length: word_bytes.len() as u64,
        filter_offset: if filter.is_some() { filter_offset } else { 0 },
        filter_length: filter_bytes.len() as u64,
    };

    let total = filter_offset as usize + filter_bytes.len();
    let mut out = Vec::with_capacity(total);
    header.write_to(&mut out);
    for entry in &partitions {
        out.extend_from_slice(bytemuck::bytes_of(entry));
    }
    for off in &offsets {
        out.extend_from_slice(&off.to_le_bytes());
    }
    out.extend_from_slice(&word_bytes);
    out.extend_from_slice(&filter_bytes);
    debug_assert_eq!(out.len(), total);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header(version: u32) -> Vec<u8> {
        let header = Header {
            version,
            ..Header::default()
        };
        let mut buf = Vec::new();
        header.write_to(&mut buf);
        buf
    }

    #[test]
    fn header_is_eighty_bytes() {
        assert_eq!(make_header(FORMAT_VERSION).len(), HEADER_SIZE);
    }

    #[test]
    fn parse_valid_header() {
        let data = make_header(FORMAT_VERSION);
        let header = parse_header(&data).unwrap();
        assert_eq!(header.version, FORMAT_VERSION);
        assert!(!header.has_filter());
    }

    #[test]
    fn reject_too_short() {
        let data = [0u8; 40];
        let err = parse_header(&data).unwrap_err();
        assert!(matches!(
            err,
            DictError::TooShort {
                expected: 80,
                actual: 40
            }
        ));
    }

    #[test]
    fn reject_invalid_magic() {
        let mut data = make_header(FORMAT_VERSION);
        data[0] = b'X';
        assert!(matches!(parse_header(&data).unwrap_err(), DictError::InvalidMagic));
    }

    #[test]
    fn reject_missing_nul_terminator() {
        let mut data = make_header(FORMAT_VERSION);
        data[7] = b'!';
        assert!(matches!(parse_header(&data).unwrap_err(), DictError::InvalidMagic));
    }

    #[test]
    fn reject_unknown_version() {
        let data = make_header(2);
        assert!(matches!(
            parse_header(&data).unwrap_err(),
            DictError::UnsupportedVersion(2)
        ));
    }

    #[test]
    fn partition_entry_round_trip() {
        let entry = PartitionEntry::new('п', 7, 3);
        let bytes = bytemuck::bytes_of(&entry);
        assert_eq!(bytes.len(), PARTITION_ENTRY_SIZE);
        assert_eq!(&bytes[..4], &('п' as u32).to_le_bytes());
        let back = PartitionEntry::read(bytes).unwrap();
        assert_eq!(back.first_scalar(), Some('п'));
        assert_eq!(back.start(), 7);
        assert_eq!(back.count(), 3);
    }

    #[test]
    fn partitions_group_by_first_scalar() {
        let words = ["apple", "apricot", "banana", "яблуко"];
        let parts = partitions_for(&words);
        assert_eq!(parts.len(), 3);
        assert_eq!((parts[0].first_scalar(), parts[0].start(), parts[0].count()), (Some('a'), 0, 2));
        assert_eq!((parts[1].first_scalar(), parts[1].start(), parts[1].count()), (Some('b'), 2, 1));
        assert_eq!((parts[2].first_scalar(), parts[2].start(), parts[2].count()), (Some('я'), 3, 1));
    }

    #[test]
    fn encode_writes_consistent_header() {
        let data = encode_dictionary(["beta", "alpha", "beta", ""], None).unwrap();
        let header = parse_header(&data).unwrap();
        assert_eq!(header.word_count, 2);
        assert_eq!(header.partition_count, 2);
        assert_eq!(header.words_length, 9);
        assert_eq!(header.offsets_offset, HEADER_SIZE as u64 + 24);
        assert_eq!(header.words_offset, header.offsets_offset + 12);
        assert_eq!(data.len() as u64, header.words_offset + header.words_length);
        let start = header.words_offset as usize;
        assert_eq!(&data[start..start + 5], b"alpha");
    }

    #[test]
    fn encode_with_filter_sets_flag() {
        let mut filter = BloomFilter::with_rate(2, 0.01);
        filter.insert("alpha");
        filter.insert("beta");
        let data = encode_dictionary(["alpha", "beta"], Some(&filter)).unwrap();
        let header = parse_header(&data).unwrap();
        assert!(header.has_filter());
        assert_eq!(header.filter_bits as usize, filter.bit_count());
        assert_eq!(header.filter_hashes, filter.hash_count());
        assert_eq!(
            header.filter_offset + header.filter_length,
            data.len() as u64
        );
    }
}
