use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use mmr::Hash;

/// Identifier of a share, computed as a double-SHA256 hash of the `ShareHeader`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShareId(pub [u8; 32]);
serialize_bytes32!(ShareId);

/// ShareHeader contains the share-chain metadata for one mining share,
/// committing to the share's position in the chain and to the entire set
/// of shares preceding it, but not containing the block witness data that
/// proves the share was committed to in a block.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ShareHeader {
    /// Share format version, for miner-coordinated future extensions.
    pub version: u32,
    /// Height of this share in the share chain, starting with 0.
    pub height: u32,
    /// Compact encoding of the difficulty target this share met.
    pub bits: u32,
    /// ID of the previous share. The genesis share uses the all-zero string.
    pub prev: ShareId,
    /// Root of the accumulator over every share preceding this one.
    /// The genesis share commits to the empty accumulator (all-zero hash).
    pub prev_shares_root: Hash,
    /// Commitment to the miner credited with this share.
    pub miner: [u8; 32],
    /// Integer timestamp of the share in milliseconds since the Unix epoch:
    /// 00:00:00 UTC Jan 1, 1970.
    pub timestamp_ms: u64,
}

/// Exact length of the canonical `ShareHeader` encoding.
pub const SHARE_HEADER_SIZE: usize = 4 + 4 + 4 + 32 + 32 + 32 + 8;

impl ShareHeader {
    /// Encodes the header into its canonical binary form: the three `u32`
    /// fields and the trailing timestamp in little-endian order, the three
    /// 32-byte commitments verbatim.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SHARE_HEADER_SIZE);

        let mut word = [0u8; 4];
        LittleEndian::write_u32(&mut word, self.version);
        buf.extend_from_slice(&word);
        LittleEndian::write_u32(&mut word, self.height);
        buf.extend_from_slice(&word);
        LittleEndian::write_u32(&mut word, self.bits);
        buf.extend_from_slice(&word);

        buf.extend_from_slice(&self.prev.0);
        buf.extend_from_slice(&self.prev_shares_root.0);
        buf.extend_from_slice(&self.miner);

        let mut tail = [0u8; 8];
        LittleEndian::write_u64(&mut tail, self.timestamp_ms);
        buf.extend_from_slice(&tail);

        buf
    }

    /// Computes the ID of the share header: double-SHA256 of the canonical
    /// encoding.
    pub fn id(&self) -> ShareId {
        let first = Sha256::digest(&self.encode_to_vec());
        let second = Sha256::digest(&first);
        ShareId(second.into())
    }

    /// Creates the genesis share header. It has no predecessor and commits
    /// to the empty accumulator; `bits` is zero because the genesis share
    /// carries no proof of work.
    pub fn make_initial(timestamp_ms: u64, miner: [u8; 32]) -> ShareHeader {
        ShareHeader {
            version: 1,
            height: 0,
            bits: 0,
            prev: ShareId::default(),
            prev_shares_root: Hash::default(),
            miner,
            timestamp_ms,
        }
    }
}

impl From<ShareId> for Hash {
    fn from(id: ShareId) -> Hash {
        Hash(id.0)
    }
}

impl AsRef<[u8]> for ShareId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::ops::Deref for ShareId {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShareId({})", hex::encode(&self.0))
        // Without hex crate we'd do this, but it outputs comma-separated numbers: [aa, 11, 5a, ...]
        // write!(f, "{:x?}", &self.0)
    }
}
