pub mod finding;
pub mod pillar;
pub mod recommendation;
pub mod review;

pub use finding::*;
pub use pillar::*;
pub use recommendation::*;
pub use review::*;
