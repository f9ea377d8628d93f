pub mod alignment;
pub mod artifacts;
pub mod task_status;
