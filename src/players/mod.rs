//! Player records and the rules for creating, changing and finding them

mod error;
mod filter;
pub mod level;
mod paging;
mod service;
mod types;
pub mod validation;

pub use error::PlayerError;
pub use filter::{PlayerFilter, PlayerQuery};
pub use paging::PageRequest;
pub use service::PlayerService;
pub use types::{Player, PlayerId};

#[cfg(test)]
pub use filter::Condition;
#[cfg(test)]
pub use types::{PlayerOrder, Profession, Race};
pub use validation::PlayerFields;
