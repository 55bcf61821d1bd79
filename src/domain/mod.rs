//! Domain logic - pure changelog rules independent of git operations

pub mod changelog;
pub mod commit;
pub mod tag;

pub use changelog::{Changelog, Note, Release};
pub use commit::ParsedCommit;
pub use tag::{TagIndex, TagMatcher, TagPattern};
