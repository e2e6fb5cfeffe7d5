use thiserror::Error;

use crate::dock::SectionId;
use crate::window::WindowId;

/// Rejected chrome transitions and collaborator lookups.
///
/// The transition variants signal a gesture-sequencing bug in the caller,
/// not bad input, so callers should surface them rather than swallow them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChromeError {
    #[error("window {0} is not docked")]
    NotDocked(WindowId),
    #[error("window {window} is already docked in section {section}")]
    AlreadyDocked {
        window: WindowId,
        section: SectionId,
    },
    #[error("unknown dock section {0}")]
    UnknownSection(SectionId),
    #[error("window {window} is not held by dock section {section}")]
    NotInSection {
        window: WindowId,
        section: SectionId,
    },
    #[error("unknown window {0}")]
    UnknownWindow(WindowId),
}
