pub mod response_common;
pub mod execute;
pub mod knowledge;
pub mod learning;
pub mod logs;
pub mod prd;
pub mod test_task;
pub mod upload;
