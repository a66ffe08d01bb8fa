//! Resolution of the single authoritative submission for a task/student
//! pair.
//!
//! Given the stored original and revision rows for one task and one student,
//! [`resolve`] picks the submission a grader should see. Revisions always
//! outrank originals: a pending revision is more current than an approved
//! original, because a revision row only exists once the student actually
//! resubmitted. A revision *request* with no revision row falls through to
//! the originals.

use super::{
    DisplayStatus, OriginalSubmission, RevisionNumber, RevisionSubmission, SubmissionId,
    SubmissionStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body text recorded when a task was assigned but never worked on.
pub const MISSING_SUBMISSION_BODY: &str = "Task was assigned but no submission was made";

/// Which branch of the resolution priority order produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// An approved revision was selected.
    ApprovedRevision,
    /// The newest revision was selected regardless of its status.
    LatestRevision,
    /// An approved original was selected.
    ApprovedOriginal,
    /// The newest original was selected regardless of its status.
    LatestOriginal,
    /// No submission row exists for the task.
    AssignedNoSubmission,
}

impl SelectionKind {
    /// Returns the canonical textual representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApprovedRevision => "approved_revision",
            Self::LatestRevision => "latest_revision",
            Self::ApprovedOriginal => "approved_original",
            Self::LatestOriginal => "latest_original",
            Self::AssignedNoSubmission => "assigned_no_submission",
        }
    }
}

/// The authoritative submission view for one task/student pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubmission {
    selection: SelectionKind,
    display_status: DisplayStatus,
    body: String,
    file_refs: Vec<String>,
    submitted_at: Option<DateTime<Utc>>,
    source_submission_id: Option<SubmissionId>,
    revision_used: Option<RevisionNumber>,
}

impl ResolvedSubmission {
    /// Returns which priority branch selected this view.
    #[must_use]
    pub const fn selection(&self) -> SelectionKind {
        self.selection
    }

    /// Returns the status a grader should see.
    #[must_use]
    pub const fn display_status(&self) -> DisplayStatus {
        self.display_status
    }

    /// Returns the selected submission text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the selected file references.
    #[must_use]
    pub fn file_refs(&self) -> &[String] {
        &self.file_refs
    }

    /// Returns when the selected submission was made, if one exists.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns the provenance reference.
    ///
    /// Always the id of an original submission row: when a revision was
    /// selected this is the revision's originating-submission reference,
    /// never the revision's own id.
    #[must_use]
    pub const fn source_submission_id(&self) -> Option<SubmissionId> {
        self.source_submission_id
    }

    /// Returns the ordinal of the selected revision, if one was selected.
    #[must_use]
    pub const fn revision_used(&self) -> Option<RevisionNumber> {
        self.revision_used
    }

    /// Splits the view into its owned content parts (body, file references).
    ///
    /// Used by snapshot construction to move the copied content without
    /// cloning.
    #[must_use]
    pub fn into_content(self) -> (String, Vec<String>) {
        (self.body, self.file_refs)
    }

    fn from_revision(revision: &RevisionSubmission, selection: SelectionKind) -> Self {
        Self {
            selection,
            display_status: revision.status().into(),
            body: revision.body().to_owned(),
            file_refs: revision.file_refs().to_vec(),
            submitted_at: Some(revision.submitted_at()),
            source_submission_id: Some(revision.original_id()),
            revision_used: Some(revision.revision()),
        }
    }

    fn from_original(original: &OriginalSubmission, selection: SelectionKind) -> Self {
        Self {
            selection,
            display_status: original.status().into(),
            body: original.body().to_owned(),
            file_refs: original.file_refs().to_vec(),
            submitted_at: Some(original.submitted_at()),
            source_submission_id: Some(original.id()),
            revision_used: None,
        }
    }

    fn no_submission() -> Self {
        Self {
            selection: SelectionKind::AssignedNoSubmission,
            display_status: DisplayStatus::NoSubmission,
            body: MISSING_SUBMISSION_BODY.to_owned(),
            file_refs: Vec::new(),
            submitted_at: None,
            source_submission_id: None,
            revision_used: None,
        }
    }
}

/// Picks the authoritative submission for one task/student pair.
///
/// Both slices must be ordered newest-first, which is the read contract of
/// the submission store; "newest" means the first element and no re-sorting
/// happens here. Rows created in the same transaction may share a
/// timestamp, in which case the store's ordinal tie-break decides.
///
/// Priority order, first match wins:
///
/// 1. Any approved revision (newest such, given the input order).
/// 2. The newest revision, whatever its status.
/// 3. Any approved original.
/// 4. The newest original, whatever its status.
/// 5. A placeholder view recording that nothing was submitted.
#[must_use]
pub fn resolve(
    originals: &[OriginalSubmission],
    revisions: &[RevisionSubmission],
) -> ResolvedSubmission {
    if let Some(approved) = revisions
        .iter()
        .find(|revision| revision.status() == SubmissionStatus::Approved)
    {
        // An approved row's own status is the approved display status, so
        // the general constructor already yields `display_status = approved`.
        return ResolvedSubmission::from_revision(approved, SelectionKind::ApprovedRevision);
    }

    if let Some(latest) = revisions.first() {
        return ResolvedSubmission::from_revision(latest, SelectionKind::LatestRevision);
    }

    if let Some(approved) = originals
        .iter()
        .find(|original| original.status() == SubmissionStatus::Approved)
    {
        return ResolvedSubmission::from_original(approved, SelectionKind::ApprovedOriginal);
    }

    if let Some(latest) = originals.first() {
        return ResolvedSubmission::from_original(latest, SelectionKind::LatestOriginal);
    }

    ResolvedSubmission::no_submission()
}
