use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    CommitOnOk,
    /// Test binaries that must leave the database untouched
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process-wide policy; `CommitOnOk` until someone sets one.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// First call wins; later calls are ignored.
pub fn set_txn_policy(policy: TxnPolicy) {
    if POLICY.set(policy).is_err() && current() != policy {
        tracing::debug!(requested = ?policy, active = ?current(), "txn policy already set");
    }
}
