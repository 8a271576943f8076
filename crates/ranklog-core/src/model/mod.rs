pub mod achievement;
pub mod mode;

pub use achievement::Achievement;
pub use mode::ChangelogMode;
