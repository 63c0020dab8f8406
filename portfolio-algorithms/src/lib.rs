use ahash::RandomState;
pub fn seeded_hasher(seed: &[u8; 32]) -> RandomState {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(seed.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_be_bytes(bytes);
    }
    RandomState::with_seeds(words[0], words[1], words[2], words[3])
}
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

pub mod knapsack;
