//! Per-task delivery accounting

/// How one task ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The transport accepted the message.
    Sent {
        /// Envelope recipients beyond the primary one (CC + BCC count).
        extra_recipients: usize,
    },

    /// The task failed; the batch carried on.
    Failed {
        /// Full cause chain, rendered for console and log lines.
        reason: String,
    },
}

/// The record kept for one attempted task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryRecord {
    /// The task's header recipient, as queued.
    pub recipient: String,

    /// The task's subject line.
    pub subject: String,

    /// How the attempt ended.
    pub status: DeliveryStatus,
}

impl DeliveryRecord {
    /// True when the transport accepted this task's message.
    pub fn is_sent(&self) -> bool {
        matches!(self.status, DeliveryStatus::Sent { .. })
    }

    /// The human-readable progress line for this attempt:
    /// `[OK] <subject-prefix>... -> <recipient> (+<n> CC/BCC)` or
    /// `[FAIL] <recipient>: <error>`.
    pub fn console_line(&self) -> String {
        match &self.status {
            DeliveryStatus::Sent { extra_recipients } => format!(
                "[OK] {}... -> {} (+{} CC/BCC)",
                subject_prefix(&self.subject),
                self.recipient,
                extra_recipients
            ),
            DeliveryStatus::Failed { reason } => {
                format!("[FAIL] {}: {}", self.recipient, reason)
            }
        }
    }
}

/// The result of one batch: every attempted task, in input order.
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    records: Vec<DeliveryRecord>,
}

impl BatchOutcome {
    /// An outcome with no attempts yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one attempt record.
    pub fn push(&mut self, record: DeliveryRecord) {
        self.records.push(record);
    }

    /// All attempt records, in input order.
    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    /// Number of accepted messages.
    pub fn sent_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_sent()).count()
    }

    /// Number of failed tasks.
    pub fn failed_count(&self) -> usize {
        self.records.len() - self.sent_count()
    }

    /// Aggregate success: true iff every attempted task was accepted.
    /// Vacuously true for an empty batch.
    pub fn all_sent(&self) -> bool {
        self.sent_count() == self.records.len()
    }
}

fn subject_prefix(subject: &str) -> String {
    subject.chars().take(30).collect()
}
