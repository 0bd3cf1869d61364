//! Utilities to support serialization needs.

use byteorder::{ByteOrder, LittleEndian};
use serde::de::Visitor;
use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

use crate::accumulator::MmrAccumulator;
use crate::errors::MmrError;
use crate::hash::Hash;

/// Implements serde's `Serialize`/`Deserialize` for a newtype wrapping a
/// 32-byte array, encoding it as a plain byte string.
#[macro_export]
macro_rules! serialize_bytes32 {
    ($type_name:ident) => {
        impl serde::Serialize for $type_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_bytes(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $type_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct BytesVisitor;

                impl<'de> serde::de::Visitor<'de> for BytesVisitor {
                    type Value = $type_name;

                    fn expecting(
                        &self,
                        formatter: &mut ::core::fmt::Formatter,
                    ) -> ::core::fmt::Result {
                        formatter.write_str("a valid 32-byte string")
                    }

                    fn visit_bytes<E>(self, v: &[u8]) -> Result<$type_name, E>
                    where
                        E: serde::de::Error,
                    {
                        if v.len() == 32 {
                            let mut buf = [0u8; 32];
                            buf[0..32].copy_from_slice(v);
                            Ok($type_name(buf))
                        } else {
                            Err(serde::de::Error::invalid_length(v.len(), &self))
                        }
                    }

                    fn visit_seq<A>(self, mut seq: A) -> Result<$type_name, A::Error>
                    where
                        A: serde::de::SeqAccess<'de>,
                    {
                        let mut buf = [0u8; 32];
                        for (i, byte) in buf.iter_mut().enumerate() {
                            *byte = seq
                                .next_element()?
                                .ok_or(serde::de::Error::invalid_length(i, &self))?;
                        }
                        Ok($type_name(buf))
                    }
                }

                deserializer.deserialize_bytes(BytesVisitor)
            }
        }
    };
}

impl MmrAccumulator {
    /// Serializes the accumulator to a variable-length binary string:
    ///
    /// ```ascii
    ///    +--------------------+--------+--------+-----
    ///    | leaf count: u64-LE | peak 0 | peak 1 | ...
    ///    +--------------------+--------+--------+-----
    /// ```
    ///
    /// The number of peaks is always equal to the number of set bits in
    /// the leaf count, so it is inferred by the decoder rather than
    /// encoded, which leaves exactly one valid encoding per state.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(8 + 32 * self.peaks.len());

        let mut count = [0u8; 8];
        LittleEndian::write_u64(&mut count, self.leaf_count);
        result.extend_from_slice(&count);

        for peak in self.peaks.iter() {
            result.extend_from_slice(&peak[..]);
        }

        result
    }

    /// Deserializes the accumulator from a binary string.
    /// See format description in the documentation for
    /// [`to_bytes`](MmrAccumulator::to_bytes).
    pub fn from_bytes(slice: &[u8]) -> Result<Self, MmrError> {
        if slice.len() < 8 {
            return Err(MmrError::Truncated);
        }
        let leaf_count = LittleEndian::read_u64(&slice[..8]);
        let slice = &slice[8..];

        let num_peaks = leaf_count.count_ones() as usize;
        if slice.len() < 32 * num_peaks {
            return Err(MmrError::Truncated);
        }
        if slice.len() > 32 * num_peaks {
            return Err(MmrError::TrailingBytes);
        }

        let mut peaks = Vec::with_capacity(num_peaks);
        for chunk in slice.chunks_exact(32) {
            let mut hash = Hash::default();
            hash.0.copy_from_slice(chunk);
            peaks.push(hash);
        }

        Ok(MmrAccumulator { leaf_count, peaks })
    }
}

impl Serialize for MmrAccumulator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

impl<'de> Deserialize<'de> for MmrAccumulator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MmrVisitor;

        impl<'de> Visitor<'de> for MmrVisitor {
            type Value = MmrAccumulator;

            fn expecting(&self, formatter: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                formatter.write_str("a valid MmrAccumulator")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<MmrAccumulator, E>
            where
                E: serde::de::Error,
            {
                MmrAccumulator::from_bytes(v).map_err(serde::de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<MmrAccumulator, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = Vec::new();
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                MmrAccumulator::from_bytes(&bytes).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(MmrVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn sha256(data: &[u8]) -> Hash {
        Hash(Sha256::digest(data).into())
    }

    #[test]
    fn empty() {
        let mmr = MmrAccumulator::new();
        let bytes = mmr.to_bytes();
        assert_eq!(hex::encode(&bytes), "0000000000000000");
        assert_eq!(
            MmrAccumulator::from_bytes(&bytes).expect("should decode"),
            mmr
        );
    }

    #[test]
    fn round_trip() {
        let mut mmr = MmrAccumulator::new();
        for i in 0u8..11 {
            mmr.append(sha256(&[i]));
        }

        let bytes = mmr.to_bytes();
        // 11 leaves -> 3 peaks (0b1011).
        assert_eq!(bytes.len(), 8 + 3 * 32);

        let decoded = MmrAccumulator::from_bytes(&bytes).expect("should decode");
        assert_eq!(decoded, mmr);
        assert_eq!(decoded.root(), mmr.root());
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(
            MmrAccumulator::from_bytes(&[0u8; 7]),
            Err(MmrError::Truncated)
        );

        let mut mmr = MmrAccumulator::new();
        mmr.append(sha256(b"a")).append(sha256(b"b")).append(sha256(b"c"));
        let bytes = mmr.to_bytes();
        assert_eq!(
            MmrAccumulator::from_bytes(&bytes[..bytes.len() - 1]),
            Err(MmrError::Truncated)
        );
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut mmr = MmrAccumulator::new();
        mmr.append(sha256(b"a"));
        let mut bytes = mmr.to_bytes();
        bytes.push(0);
        assert_eq!(
            MmrAccumulator::from_bytes(&bytes),
            Err(MmrError::TrailingBytes)
        );
    }

    #[test]
    fn serde_round_trip() {
        let mut mmr = MmrAccumulator::new();
        for i in 0u8..5 {
            mmr.append(sha256(&[i]));
        }

        let json = serde_json::to_string(&mmr).unwrap();
        let decoded: MmrAccumulator = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, mmr);
    }
}
