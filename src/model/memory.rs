use chrono::Utc;

use super::Lead;

/// Leads kept in process memory, in insertion order.
/// Callers hold the surrounding lock for the whole insert, which makes it an insert-if-absent.
#[derive(Debug, Default)]
pub(super) struct MemoryStore {
    last_id: i64,
    leads: Vec<Lead>,
}

impl MemoryStore {
    /// Returns `None` if a lead with exactly this email is already stored.
    pub fn insert_if_absent(&mut self, gmail: &str) -> Option<Lead> {
        if self.leads.iter().any(|lead| lead.gmail == gmail) {
            return None;
        }

        self.last_id += 1;
        let lead = Lead {
            id: self.last_id,
            gmail: gmail.to_string(),
            created_at: Utc::now(),
        };
        self.leads.push(lead.clone());

        Some(lead)
    }

    pub fn newest_first(&self) -> Vec<Lead> {
        let mut leads = self.leads.clone();
        leads.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        leads
    }
}
