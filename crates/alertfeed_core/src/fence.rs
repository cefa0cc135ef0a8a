//! Request fencing: late responses from superseded loads are dropped.

/// Sequence number attached to a load. Later loads carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FenceToken(pub u64);

/// Issues strictly increasing tokens. One counter is shared by every store so a
/// token also orders loads across stores.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FenceCounter {
    last: u64,
}

impl FenceCounter {
    pub fn issue(&mut self) -> FenceToken {
        self.last += 1;
        FenceToken(self.last)
    }

    pub fn last_issued(&self) -> FenceToken {
        FenceToken(self.last)
    }
}

/// Per-store watermark of the newest load whose outcome has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fence {
    applied: FenceToken,
}

impl Fence {
    /// Accepts `token` if it is newer than anything applied so far and advances the
    /// watermark. Returns `false` for stale tokens, which the caller must discard.
    pub fn admit(&mut self, token: FenceToken) -> bool {
        if token > self.applied {
            self.applied = token;
            true
        } else {
            false
        }
    }

    /// Moves the watermark up to `token` without applying a load, so every load
    /// issued up to then is treated as stale.
    pub fn advance_to(&mut self, token: FenceToken) {
        self.applied = self.applied.max(token);
    }

    pub fn applied(&self) -> FenceToken {
        self.applied
    }
}
