pub mod config;
pub mod ds;
pub mod std_lib;
pub mod suffix;
