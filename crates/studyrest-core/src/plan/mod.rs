mod editor;
mod section;

pub use editor::SectionList;
pub use section::{Plan, Section, MIN_REST_SECS};
