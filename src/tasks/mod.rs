pub mod format;
pub mod normalize;
pub mod organize;
pub mod types;

pub use normalize::normalize;
pub use organize::organize_by_assignee;
pub use types::*;
