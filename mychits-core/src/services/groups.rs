//! Group service - chit group listings

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::result::Result;
use crate::domain::{ChitGroup, EnrolledGroup, EnrollmentRecord};
use crate::ports::ChitsBackend;
use crate::state::SessionStore;

/// Enrolled groups plus any per-group problems
#[derive(Debug, Clone, Serialize)]
pub struct EnrolledGroups {
    pub groups: Vec<EnrolledGroup>,
    pub warnings: Vec<String>,
}

pub struct GroupService {
    backend: Arc<dyn ChitsBackend>,
    session: SessionStore,
}

impl GroupService {
    pub fn new(backend: Arc<dyn ChitsBackend>, session: SessionStore) -> Self {
        Self { backend, session }
    }

    /// All groups open for enrollment
    pub fn groups(&self) -> Result<Vec<ChitGroup>> {
        let groups = self.backend.groups()?;
        debug!(count = groups.len(), "fetched groups");
        Ok(groups)
    }

    /// Groups the signed-in user holds tickets in, each with the amount paid.
    ///
    /// Nothing is requested without a session. Paid summaries are fetched in
    /// parallel; one that fails leaves that group's amount missing and adds a
    /// warning instead of failing the whole list.
    pub fn enrolled_groups(&self) -> Result<EnrolledGroups> {
        let user_id = self.session.require_user_id()?;
        let records = self.backend.enrollments(&user_id)?;

        let enriched: Vec<(EnrolledGroup, Option<String>)> = records
            .into_par_iter()
            .map(|record| self.enrich(&user_id, record))
            .collect();

        let mut groups = Vec::with_capacity(enriched.len());
        let mut warnings = Vec::new();
        for (group, warning) in enriched {
            groups.push(group);
            warnings.extend(warning);
        }

        debug!(count = groups.len(), degraded = warnings.len(), "fetched enrolled groups");
        Ok(EnrolledGroups { groups, warnings })
    }

    fn enrich(&self, user_id: &str, record: EnrollmentRecord) -> (EnrolledGroup, Option<String>) {
        let mut enrolled = EnrolledGroup::from(record);
        match self.backend.paid_summary(user_id, &enrolled.group.id) {
            Ok(summary) => {
                enrolled.amount_paid = summary.total_paid;
                (enrolled, None)
            }
            Err(e) => {
                warn!(group_id = %enrolled.group.id, error = %e, "paid summary unavailable");
                let warning = format!(
                    "Failed to fetch amount paid for '{}': {}",
                    enrolled.group.name,
                    e.notice().message
                );
                (enrolled, Some(warning))
            }
        }
    }
}
