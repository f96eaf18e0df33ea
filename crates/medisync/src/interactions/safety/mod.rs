//! Best-effort patient safety checks layered on top of the interaction report.
//!
//! Neither check can fail a request: unusable input entries are skipped.

mod contraindications;
mod dosage;

pub use contraindications::ContraindicationWarning;
pub use dosage::DosageWarning;

pub(crate) use contraindications::check_contraindications;
pub(crate) use dosage::check_dosages;
