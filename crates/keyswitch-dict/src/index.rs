// Exact word index: first-scalar partitions over a sorted word list

use std::cmp::Ordering;
use std::ops::Range;
use std::path::Path;

use hashbrown::HashMap;

use crate::DictError;
use crate::filter::BloomFilter;
use crate::format::{self, PARTITION_ENTRY_SIZE};
use crate::region::ByteRegion;

/// Backing storage for the sorted word list.
enum Storage {
    /// Words parsed from text, held as owned strings.
    Memory(Vec<String>),
    /// Words read on demand from a binary dictionary.
    Binary {
        region: ByteRegion,
        offsets_offset: u64,
        words_offset: u64,
        words_length: u64,
    },
}

/// An immutable, sorted, deduplicated word list with O(1) partition lookup
/// by first scalar and binary search within a partition.
///
/// Every accessor is bounds-checked: a damaged binary file makes the
/// affected lookups return "absent" and never panics.
pub struct DictionaryIndex {
    storage: Storage,
    word_count: u32,
    /// First scalar -> ordinal range `start..start + count`.
    partitions: HashMap<char, (u32, u32)>,
    filter: Option<BloomFilter>,
}

impl std::fmt::Debug for DictionaryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryIndex")
            .field("word_count", &self.word_count)
            .field("partition_count", &self.partitions.len())
            .field("binary", &matches!(self.storage, Storage::Binary { .. }))
            .field("filter", &self.filter)
            .finish()
    }
}

impl DictionaryIndex {
    /// An index with no words. Every lookup fails.
    pub fn empty() -> Self {
        Self {
            storage: Storage::Memory(Vec::new()),
            word_count: 0,
            partitions: HashMap::new(),
            filter: None,
        }
    }

    /// Build an in-memory index (and a fresh filter) from already-normalised
    /// words. Duplicates and empty strings are dropped.
    pub fn from_words<I, S>(words: I, false_positive_rate: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();
        words.truncate(u32::MAX as usize);

        let partitions = format::partitions_for(&words)
            .into_iter()
            .filter_map(|e| Some((e.first_scalar()?, (e.start(), e.count()))))
            .collect();
        let filter = BloomFilter::from_words(
            words.iter().map(String::as_str),
            words.len(),
            false_positive_rate,
        );

        Self {
            word_count: words.len() as u32,
            storage: Storage::Memory(words),
            partitions,
            filter: Some(filter),
        }
    }

    /// Open a binary dictionary file through a read-only memory map.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let region = ByteRegion::map_file(path)?;
        Self::from_region(region)
    }

    /// Parse a binary dictionary held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DictError> {
        Self::from_region(ByteRegion::Owned(bytes))
    }

    /// Parse a binary dictionary from any byte region.
    ///
    /// Only the header must be intact. Partition entries past the end of
    /// the region are dropped and an unreadable filter is ignored (lookups
    /// then go straight to the index). Header counts are clamped to what
    /// the region can actually hold.
    pub fn from_region(region: ByteRegion) -> Result<Self, DictError> {
        let header = format::parse_header(&region)?;
        let fits = |offset: u64, entry_size: u64| {
            (region.len() as u64).saturating_sub(offset) / entry_size
        };

        let partition_count = u64::from(header.partition_count)
            .min(fits(header.partitions_offset, PARTITION_ENTRY_SIZE as u64));
        // The offset table has one more slot than there are words.
        let word_count = u64::from(header.word_count)
            .min(fits(header.offsets_offset, 4).saturating_sub(1)) as u32;

        let mut partitions = HashMap::with_capacity(partition_count as usize);
        for i in 0..partition_count {
            let at = header.partitions_offset + i * PARTITION_ENTRY_SIZE as u64;
            let Some(entry) = region
                .slice(at, PARTITION_ENTRY_SIZE as u64)
                .and_then(format::PartitionEntry::read)
            else {
                break;
            };
            if let Some(first) = entry.first_scalar() {
                partitions.insert(first, (entry.start(), entry.count()));
            }
        }

        let filter = if header.has_filter() && header.filter_bits > 0 {
            let expected = u64::from(header.filter_bits).div_ceil(8);
            region
                .slice(header.filter_offset, header.filter_length)
                .filter(|bytes| bytes.len() as u64 >= expected)
                .map(|bytes| {
                    BloomFilter::from_bytes(
                        bytes,
                        header.filter_bits as usize,
                        header.filter_hashes,
                    )
                })
        } else {
            None
        };

        Ok(Self {
            storage: Storage::Binary {
                region,
                offsets_offset: header.offsets_offset,
                words_offset: header.words_offset,
                words_length: header.words_length,
            },
            word_count,
            partitions,
            filter,
        })
    }

    pub fn len(&self) -> usize {
        self.word_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Whether words are read from a binary dictionary rather than memory.
    pub fn is_binary(&self) -> bool {
        matches!(self.storage, Storage::Binary { .. })
    }

    pub fn filter(&self) -> Option<&BloomFilter> {
        self.filter.as_ref()
    }

    /// Ordinal range of the words starting with `first`.
    pub fn partition(&self, first: char) -> Option<Range<u32>> {
        let &(start, count) = self.partitions.get(&first)?;
        Some(start..start.checked_add(count)?)
    }

    fn bytes_at(&self, ordinal: u32) -> Option<&[u8]> {
        if ordinal >= self.word_count {
            return None;
        }
        match &self.storage {
            Storage::Memory(words) => words.get(ordinal as usize).map(String::as_bytes),
            Storage::Binary {
                region,
                offsets_offset,
                words_offset,
                words_length,
            } => {
                let slot = offsets_offset.checked_add(u64::from(ordinal) * 4)?;
                let start = u64::from(region.u32_at(slot)?);
                let end = u64::from(region.u32_at(slot + 4)?);
                if start > end || end > *words_length {
                    return None;
                }
                region.slice(words_offset.checked_add(start)?, end - start)
            }
        }
    }

    /// The word at `ordinal`, or `None` for out-of-range ordinals and
    /// corrupt entries.
    pub fn word_at(&self, ordinal: u32) -> Option<&str> {
        std::str::from_utf8(self.bytes_at(ordinal)?).ok()
    }

    /// Exact membership test. `word` must already be normalised.
    pub fn contains(&self, word: &str) -> bool {
        let Some(first) = word.chars().next() else {
            return false;
        };
        let Some(range) = self.partition(first) else {
            return false;
        };
        let probe = word.as_bytes();
        let (mut lo, mut hi) = (range.start, range.end);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let Some(candidate) = self.bytes_at(mid) else {
                return false;
            };
            match candidate.cmp(probe) {
                Ordering::Equal => return true,
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }
        false
    }

    /// Filter check. `false` means definitely absent; `true` may be a false
    /// positive. Without a filter this is an exact lookup.
    pub fn might_contain(&self, word: &str) -> bool {
        match &self.filter {
            Some(filter) => filter.might_contain(word),
            None => self.contains(word),
        }
    }

    /// All readable words with their ordinals, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        (0..self.word_count).filter_map(move |i| Some((i, self.word_at(i)?)))
    }

    /// Encode this index into the binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        format::encode_dictionary(self.iter().map(|(_, w)| w), self.filter.as_ref())
    }
}
