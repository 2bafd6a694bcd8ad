pub mod apps;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod dock;
pub mod drivers;
pub mod event_loop;
pub mod fs;
pub mod host;
pub mod repository;
pub mod shell;
pub mod tracing_sub;
pub mod window;
