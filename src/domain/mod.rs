pub mod book;
pub mod errors;
pub mod events;
pub mod loan;
pub mod user;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use events::*;
pub use user::*;
pub use value_objects::*;
