//! Audit Log - Ghi lại mọi quyết định của evaluator
//!
//! Append-only, in-memory, owned by one `RiskEvaluator`.
//! No eviction: retention and export are the caller's concern.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{EnforcementAction, EvaluationResult, Intent};

// ============================================================================
// ENTRY
// ============================================================================

/// One recorded decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// 1-based, matches position in the log
    pub sequence: u64,
    pub evaluated_at: DateTime<Utc>,
    pub result: EvaluationResult,
}

// ============================================================================
// LOG
// ============================================================================

#[derive(Debug)]
pub struct AuditLog {
    session_id: Uuid,
    config_fingerprint: String,
    entries: Mutex<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new(config_fingerprint: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            config_fingerprint: config_fingerprint.into(),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Fingerprint of the rule config every entry was scored with
    pub fn config_fingerprint(&self) -> &str {
        &self.config_fingerprint
    }

    /// Append a result, returning its sequence number.
    /// Sequence is assigned under the lock so it always matches log order.
    pub fn append(&self, result: EvaluationResult) -> u64 {
        let mut entries = self.entries.lock();
        let sequence = entries.len() as u64 + 1;
        entries.push(AuditEntry {
            sequence,
            evaluated_at: Utc::now(),
            result,
        });
        sequence
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot of all entries in append order
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    /// Snapshot of results only, in append order
    pub fn results(&self) -> Vec<EvaluationResult> {
        self.entries.lock().iter().map(|e| e.result.clone()).collect()
    }

    /// Lấy N entries gần nhất
    pub fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.lock();
        let start = entries.len().saturating_sub(limit);
        entries[start..].to_vec()
    }

    pub fn by_action(&self, action: EnforcementAction) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.result.enforcement_action == action)
            .cloned()
            .collect()
    }

    pub fn by_account(&self, account_id: &str) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.result.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> AuditSummary {
        let entries = self.entries.lock();
        AuditSummary::from_results(entries.iter().map(|e| &e.result))
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Aggregate counts over the log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total: usize,
    pub monitor: usize,
    pub throttle: usize,
    pub block: usize,
    pub by_intent: BTreeMap<Intent, usize>,
    pub mean_risk_score: f64,
}

impl AuditSummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a EvaluationResult>) -> Self {
        let mut summary = AuditSummary::default();
        let mut score_sum: i64 = 0;

        for result in results {
            summary.total += 1;
            score_sum += result.risk_score;
            match result.enforcement_action {
                EnforcementAction::Monitor => summary.monitor += 1,
                EnforcementAction::Throttle => summary.throttle += 1,
                EnforcementAction::Block => summary.block += 1,
            }
            *summary.by_intent.entry(result.intent_classification).or_insert(0) += 1;
        }

        if summary.total > 0 {
            summary.mean_risk_score = score_sum as f64 / summary.total as f64;
        }
        summary
    }

    /// THROTTLE + BLOCK
    pub fn enforced(&self) -> usize {
        self.throttle + self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(account: &str, score: i64, action: EnforcementAction, intent: Intent) -> EvaluationResult {
        EvaluationResult {
            account_id: account.to_string(),
            risk_score: score,
            confidence_score: 0.0,
            intent_classification: intent,
            rationale: vec![],
            enforcement_action: action,
        }
    }

    #[test]
    fn test_append_assigns_sequence() {
        let log = AuditLog::new("fp");
        assert!(log.is_empty());
        assert_eq!(log.append(make_result("a", 0, EnforcementAction::Monitor, Intent::UnknownAbuse)), 1);
        assert_eq!(log.append(make_result("b", 70, EnforcementAction::Throttle, Intent::LateralPropagation)), 2);
        assert_eq!(log.len(), 2);

        let entries = log.entries();
        assert_eq!(entries[0].sequence, 1);
        assert_eq!(entries[1].result.account_id, "b");
        assert!(entries[0].evaluated_at <= entries[1].evaluated_at);
        assert_eq!(log.config_fingerprint(), "fp");
    }

    #[test]
    fn test_queries() {
        let log = AuditLog::new("fp");
        log.append(make_result("a", 0, EnforcementAction::Monitor, Intent::UnknownAbuse));
        log.append(make_result("b", 145, EnforcementAction::Block, Intent::ModelExtraction));
        log.append(make_result("a", 65, EnforcementAction::Throttle, Intent::ModelExtraction));

        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.recent(2)[0].result.account_id, "b");
        assert_eq!(log.recent(10).len(), 3);
        assert_eq!(log.by_action(EnforcementAction::Block).len(), 1);
        assert_eq!(log.by_account("a").len(), 2);
    }

    #[test]
    fn test_summary() {
        let log = AuditLog::new("fp");
        assert_eq!(log.summary(), AuditSummary::default());

        log.append(make_result("a", 0, EnforcementAction::Monitor, Intent::UnknownAbuse));
        log.append(make_result("b", 145, EnforcementAction::Block, Intent::ModelExtraction));
        log.append(make_result("c", 65, EnforcementAction::Throttle, Intent::ModelExtraction));

        let summary = log.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.monitor, 1);
        assert_eq!(summary.throttle, 1);
        assert_eq!(summary.block, 1);
        assert_eq!(summary.enforced(), 2);
        assert_eq!(summary.by_intent[&Intent::ModelExtraction], 2);
        assert!((summary.mean_risk_score - 70.0).abs() < 1e-9);
    }
}
