pub mod connection;
pub mod reviews;
pub mod schema;

pub use connection::Database;
pub use reviews::{PageCursor, ReviewPage};
