pub mod id;

pub use id::{ContentId, IdError, NodeId, ID_LENGTH};
