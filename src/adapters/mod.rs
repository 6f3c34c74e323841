pub mod csv_adapter;
pub mod file_config_adapter;
pub mod ntfy_adapter;
pub mod stdout_notify;
pub mod stooq_adapter;
