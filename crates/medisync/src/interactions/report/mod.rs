mod assemble;
mod narrative;
pub mod views;

pub(crate) use assemble::{assemble_report, truncate_description};
