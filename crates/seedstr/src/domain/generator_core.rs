/// Increment applied to the generator state before every output byte.
pub const SEED_STREAM_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Advances `state` by one SplitMix64 step and returns the top byte of the output.
#[inline]
pub fn next_seed_byte(state: &mut u64) -> u8 {
    *state = state.wrapping_add(SEED_STREAM_GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 56) as u8
}

/// Regenerates the `len` bytes encoded by `seed`.
pub fn seed_to_bytes(seed: i64, len: usize) -> Vec<u8> {
    let mut state = seed as u64;
    (0..len).map(|_| next_seed_byte(&mut state)).collect()
}
