//! In-memory host for integration tests: a fixed account space, a manual
//! clock, a recording audit sink, and captured transfer notices.

use std::collections::BTreeSet;

use marque::{AccountId, AuditError, AuditRecord, Host, Timestamp, TransferNotice};

pub struct TestHost {
    accounts: BTreeSet<String>,
    pub now: Timestamp,
    pub audit_log: Vec<AuditRecord>,
    pub notices: Vec<(AccountId, TransferNotice)>,
    /// When set, the audit sink rejects every record.
    pub reject_audit: bool,
}

impl TestHost {
    pub fn with_accounts(accounts: &[&str]) -> Self {
        Self {
            accounts: accounts.iter().map(|s| s.to_string()).collect(),
            now: Timestamp::from_secs(1_700_000_000),
            audit_log: Vec::new(),
            notices: Vec::new(),
            reject_audit: false,
        }
    }
}

impl Host for TestHost {
    fn is_account(&self, account: &AccountId) -> bool {
        self.accounts.contains(account.as_str())
    }

    fn now(&self) -> Timestamp {
        self.now
    }

    fn record(&mut self, record: AuditRecord) -> Result<(), AuditError> {
        if self.reject_audit {
            return Err(AuditError::new("sink unavailable"));
        }
        self.audit_log.push(record);
        Ok(())
    }

    fn notify(&mut self, recipient: &AccountId, notice: &TransferNotice) {
        self.notices.push((recipient.clone(), notice.clone()));
    }
}
