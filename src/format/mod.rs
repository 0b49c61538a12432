//! Output formatting for `steptree`.
//!
//! Human-readable text trees; JSON output serializes the finalized types
//! directly.

mod text;

pub use text::{
    TextFormatOptions, format_element, format_feature, format_status_icon, format_status_label,
    icons,
};
