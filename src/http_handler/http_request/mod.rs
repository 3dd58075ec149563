//! Typed requests, one per backend endpoint, grouped by resource.

pub mod request_common;
pub mod execute;
pub mod knowledge;
pub mod learning;
pub mod logs;
pub mod prd;
pub mod preview;
pub mod test_task;
pub mod upload;
