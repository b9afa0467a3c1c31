// Probabilistic membership filter (Bloom filter with double hashing)

/// Default target false-positive rate.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;
const FNV_OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
/// Second, unrelated offset basis for the independent hash.
const FNV_OFFSET_BASIS_ALT: u64 = 0x84222325_CBF29CE4;

fn fnv1a(bytes: &[u8], basis: u64) -> u64 {
    let mut hash = basis;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// 64-bit finalizer (splitmix64) to decorrelate the second hash.
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// The two base hashes of a word. `h2` is forced odd so successive probe
/// positions never collapse onto one bit.
pub fn hash_pair(word: &str) -> (u64, u64) {
    let bytes = word.as_bytes();
    let h1 = fnv1a(bytes, FNV_OFFSET_BASIS);
    let h2 = mix64(fnv1a(bytes, FNV_OFFSET_BASIS_ALT)) | 1;
    (h1, h2)
}

/// Optimal `(m, k)` for `n` expected items at false-positive rate `p`:
/// `m = ceil(-n ln p / ln(2)^2)`, `k = max(1, round(m / n * ln 2))`.
pub fn optimal_parameters(n: usize, p: f64) -> (usize, u32) {
    let n = n.max(1) as f64;
    let p = p.clamp(1e-9, 0.5);
    let ln2 = std::f64::consts::LN_2;
    let m = (-n * p.ln() / (ln2 * ln2)).ceil().max(8.0);
    let k = ((m / n) * ln2).round().max(1.0);
    (m as usize, k as u32)
}

/// A fixed-size Bloom filter.
///
/// No false negatives: every inserted word reports `might_contain == true`.
#[derive(Clone, PartialEq, Eq)]
pub struct BloomFilter {
    bits: Vec<u64>,
    bit_count: usize,
    hash_count: u32,
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bit_count", &self.bit_count)
            .field("hash_count", &self.hash_count)
            .finish()
    }
}

impl BloomFilter {
    /// Create an empty filter with `bit_count` bits and `hash_count` probes.
    pub fn new(bit_count: usize, hash_count: u32) -> Self {
        let bit_count = bit_count.max(1);
        Self {
            bits: vec![0; bit_count.div_ceil(64)],
            bit_count,
            hash_count: hash_count.max(1),
        }
    }

    /// Create an empty filter sized for `expected_items` at `false_positive_rate`.
    pub fn with_rate(expected_items: usize, false_positive_rate: f64) -> Self {
        let (m, k) = optimal_parameters(expected_items, false_positive_rate);
        Self::new(m, k)
    }

    /// Build a filter containing every word of an iterator.
    pub fn from_words<'a, I>(words: I, expected_items: usize, false_positive_rate: f64) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut filter = Self::with_rate(expected_items, false_positive_rate);
        for w in words {
            filter.insert(w);
        }
        filter
    }

    /// Rebuild a filter from its serialized bitmap. Missing trailing bytes
    /// read as zero; extra bytes are ignored.
    pub fn from_bytes(bytes: &[u8], bit_count: usize, hash_count: u32) -> Self {
        let mut filter = Self::new(bit_count, hash_count);
        let needed = filter.bit_count.div_ceil(8);
        for (i, &b) in bytes.iter().take(needed).enumerate() {
            filter.bits[i / 8] |= u64::from(b) << ((i % 8) * 8);
        }
        filter
    }

    /// Serialize the bitmap: bit `j` is bit `j % 8` of byte `j / 8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let needed = self.bit_count.div_ceil(8);
        self.bits
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .take(needed)
            .collect()
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    fn positions(&self, word: &str) -> impl Iterator<Item = usize> + use<> {
        let (h1, h2) = hash_pair(word);
        let m = self.bit_count as u64;
        (0..u64::from(self.hash_count))
            .map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
    }

    pub fn insert(&mut self, word: &str) {
        for pos in self.positions(word) {
            self.bits[pos / 64] |= 1u64 << (pos % 64);
        }
    }

    /// `false` means the word was definitely never inserted.
    pub fn might_contain(&self, word: &str) -> bool {
        self.positions(word)
            .all(|pos| self.bits[pos / 64] & (1u64 << (pos % 64)) != 0)
    }
}
