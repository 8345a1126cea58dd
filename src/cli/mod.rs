mod args;
mod config;

pub use args::{Args, Command, InitArgs, ServeArgs};
pub use config::ServiceConfig;
