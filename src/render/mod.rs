//! Report renderer — pure presentation over a resolved report.
//!
//! The view state machine resolves an identifier against the store
//! (with the query-parameter handoff as fallback); the section layout
//! suppresses empty sections; the widgets hold local toggle state.

pub mod sections;
pub mod view;
pub mod widgets;

pub use sections::{layout, RenderedSection, SectionBody, SectionKind};
pub use view::{synthesize_from_query, ReportQuery, ReportView, ViewState};
pub use widgets::{Feeling, ReminderLog, StatusLog};
