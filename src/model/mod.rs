pub mod policy;
pub mod score;
pub mod verdict;
