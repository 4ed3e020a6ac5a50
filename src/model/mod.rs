pub mod edit_request;
pub mod employee;
pub mod role;
pub mod time_log;
