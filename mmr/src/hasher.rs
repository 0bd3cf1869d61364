use sha2::compress256;
use sha2::digest::generic_array::GenericArray;

use crate::hash::Hash;

/// SHA-256 midstate reached by compressing the 64-byte block
/// `SHA256("") || SHA256("")` from the standard SHA-256 initial state,
/// serialized as big-endian state words. Using a midstate as the IV keeps
/// the node hash domain-separated from plain SHA-256 while still being
/// derivable from the standard algorithm.
const MERGE_IV: [u32; 8] = [
    0x1e4e_0f95,
    0x5a4b_c81c,
    0x08c8_af1c,
    0x94f3_4b9d,
    0x0af2_f450,
    0xdc24_a3bc,
    0xef98_318f,
    0xaf5e_2506,
];

/// Combines two node hashes into the hash of their parent node.
///
/// The input hashes are concatenated into a single 64-byte block and run
/// through one SHA-256 compression round starting from a fixed midstate.
/// No finalization padding is applied: every invocation consumes exactly
/// one block, so the compression output *is* the parent hash.
///
/// The order of the operands encodes the tree topology and must never be
/// swapped: `merge_hash(a, b) != merge_hash(b, a)` in general.
pub fn merge_hash(left: &Hash, right: &Hash) -> Hash {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(&left.0);
    block[32..].copy_from_slice(&right.0);

    let mut state = MERGE_IV;
    compress256(&mut state, &[GenericArray::clone_from_slice(&block)]);

    let mut parent = Hash::default();
    for (bytes, word) in parent.0.chunks_exact_mut(4).zip(state.iter()) {
        bytes.copy_from_slice(&word.to_be_bytes());
    }
    parent
}
