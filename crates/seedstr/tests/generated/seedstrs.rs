// Generated by seedstr. Do not edit.
#[allow(dead_code)]
pub mod seedstrs {
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

/// b"key"
pub fn key_rs() -> Vec<u8> {
    let parts: [Vec<u8>; 2] = [
        seed_to_bytes(152261, 2),
        seed_to_bytes(362, 1),
    ];
    parts.concat()
}

/// b"hello world"
pub fn hello_world_rs() -> Vec<u8> {
    let parts: [Vec<u8>; 6] = [
        seed_to_bytes(120007, 2),
        seed_to_bytes(120465, 2),
        seed_to_bytes(106871, 2),
        seed_to_bytes(24680, 2),
        seed_to_bytes(14663, 2),
        seed_to_bytes(221, 1),
    ];
    parts.concat()
}

/// b"a\tb"
pub fn a_tb_rs() -> Vec<u8> {
    let parts: [Vec<u8>; 2] = [
        seed_to_bytes(85053, 2),
        seed_to_bytes(77, 1),
    ];
    parts.concat()
}

/// b"fn"
pub fn fn_1_rs() -> Vec<u8> {
    let parts: [Vec<u8>; 1] = [
        seed_to_bytes(21132, 2),
    ];
    parts.concat()
}

/// b""
pub fn s_rs() -> Vec<u8> {
    let parts: [Vec<u8>; 0] = [
    ];
    parts.concat()
}
}
