pub mod day_counts;
pub mod exit_type;
pub mod member;
pub mod qr_config;
pub mod session;
pub mod source;
pub mod status;
