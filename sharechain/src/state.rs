use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use mmr::{Hash, MmrAccumulator};

use super::errors::ShareChainError;
use super::share::{ShareHeader, ShareId};

/// State of the share chain at a particular tip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareChainState {
    /// Latest share header in the chain.
    pub tip: ShareHeader,
    /// Accumulator over every share up to and including the tip.
    pub shares: MmrAccumulator,
}

impl ShareChainState {
    /// Creates the state for a chain consisting of a single genesis share.
    pub fn make_initial(genesis: ShareHeader) -> Result<ShareChainState, ShareChainError> {
        check(genesis.height == 0, ShareChainError::InconsistentHeader)?;
        check(
            genesis.prev == ShareId::default(),
            ShareChainError::InconsistentHeader,
        )?;
        // The genesis share has no predecessors, so it must commit to the
        // empty accumulator.
        check(
            genesis.prev_shares_root.ct_eq(&Hash::default()).unwrap_u8() == 1,
            ShareChainError::PrevSharesMismatch,
        )?;

        let mut shares = MmrAccumulator::new();
        shares.append(genesis.id().into());

        Ok(ShareChainState {
            tip: genesis,
            shares,
        })
    }

    /// Applies a share on top of the current tip and returns the successor
    /// state. The incoming header must link to the tip and commit to the
    /// accumulator over every share before it, i.e. the current `shares`.
    pub fn apply_share(&self, share: ShareHeader) -> Result<ShareChainState, ShareChainError> {
        check_share_header(&share, &self.tip)?;

        // Check the previous-shares commitment.
        check(
            self.shares.root().ct_eq(&share.prev_shares_root).unwrap_u8() == 1,
            ShareChainError::PrevSharesMismatch,
        )?;

        let mut shares = self.shares.clone();
        shares.append(share.id().into());

        Ok(ShareChainState { tip: share, shares })
    }
}

/// Verifies a share header with respect to the previous header.
fn check_share_header(
    share: &ShareHeader,
    prev: &ShareHeader,
) -> Result<(), ShareChainError> {
    check(
        share.version >= prev.version,
        ShareChainError::InconsistentHeader,
    )?;
    check(
        share.height == prev.height + 1,
        ShareChainError::InconsistentHeader,
    )?;
    check(
        share.timestamp_ms > prev.timestamp_ms,
        ShareChainError::InconsistentHeader,
    )?;
    check(share.prev == prev.id(), ShareChainError::InconsistentHeader)?;
    Ok(())
}

#[inline]
fn check<E>(cond: bool, err: E) -> Result<(), E> {
    if !cond {
        return Err(err);
    }
    Ok(())
}
