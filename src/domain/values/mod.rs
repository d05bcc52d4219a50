pub mod failure_policy;
pub mod identity;
pub mod like_flag;
pub mod symbol;
