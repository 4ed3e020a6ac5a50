pub mod punch_locks;
