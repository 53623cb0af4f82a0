use std::hash::{BuildHasher, Hasher};

/// The 64-bit FNV offset basis, used as the seed for [`hash`].
pub const FNV_OFFSET_BASIS: u64 = 14695981039346656037;

/// The 64-bit FNV prime.
pub const FNV_PRIME: u64 = 0x100000001B3;

/// Hashes `bytes` with 64-bit FNV-1a, starting from `seed`. Each byte is XORed into the state,
/// which is then multiplied by [`FNV_PRIME`] with wrapping arithmetic.
///
/// Passing the result of one call as the seed of the next hashes the concatenation of both byte
/// sequences.
///
/// # Examples
/// ```
/// # use foundation::hash::{hash, hash_fnv_1a_64, FNV_OFFSET_BASIS};
/// let whole = hash(b"Hello, World!");
/// let split = hash_fnv_1a_64(b" World!", hash(b"Hello,"));
/// assert_eq!(whole, split);
/// assert_eq!(hash_fnv_1a_64(b"", FNV_OFFSET_BASIS), FNV_OFFSET_BASIS);
/// ```
pub const fn hash_fnv_1a_64(bytes: &[u8], seed: u64) -> u64 {
    let mut state = seed;
    let mut i = 0;
    while i < bytes.len() {
        state ^= bytes[i] as u64;
        state = state.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    state
}

/// Hashes `bytes` with 64-bit FNV-1a, seeded with the standard offset basis.
///
/// # Examples
/// ```
/// # use foundation::hash::hash;
/// assert_eq!(hash(b"Hello, World!"), 7993990320990026836);
/// ```
pub const fn hash(bytes: &[u8]) -> u64 {
    hash_fnv_1a_64(bytes, FNV_OFFSET_BASIS)
}

/// Derives a bucket index for `bytes` in a table with `table_size` buckets, by masking the content
/// hash. Returns [`None`] unless `table_size` is a power of two.
///
/// # Examples
/// ```
/// # use foundation::hash::{bucket, hash};
/// assert_eq!(bucket(b"key", 16), Some((hash(b"key") & 15) as usize));
/// assert_eq!(bucket(b"key", 12), None);
/// ```
pub const fn bucket(bytes: &[u8], table_size: usize) -> Option<usize> {
    if !table_size.is_power_of_two() {
        return None;
    }
    Some((hash(bytes) & (table_size as u64 - 1)) as usize)
}

/// A streaming [`Hasher`] computing 64-bit FNV-1a over everything written to it.
///
/// Note that the [`Hash`](std::hash::Hash) implementations of most types write more than just
/// their content (slices and strings write a length or terminator too), so hashing a value through
/// this Hasher won't generally match [`hash`] of its bytes. Use [`Hasher::write`] directly for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    pub const fn new() -> FnvHasher {
        FnvHasher::with_seed(FNV_OFFSET_BASIS)
    }

    pub const fn with_seed(seed: u64) -> FnvHasher {
        FnvHasher { state: seed }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        self.state = hash_fnv_1a_64(bytes, self.state);
    }
}

/// Builds [`FnvHasher`]s, all starting from the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnvBuildHasher {
    seed: u64,
}

impl FnvBuildHasher {
    pub const fn new() -> FnvBuildHasher {
        FnvBuildHasher::with_seed(FNV_OFFSET_BASIS)
    }

    pub const fn with_seed(seed: u64) -> FnvBuildHasher {
        FnvBuildHasher { seed }
    }
}

impl Default for FnvBuildHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        FnvHasher::with_seed(self.seed)
    }
}
