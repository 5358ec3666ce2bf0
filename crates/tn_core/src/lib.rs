pub mod error;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use source::NewsSource;
pub use types::{decode_payload, Article};

pub mod prelude {
    pub use crate::{Article, Error, NewsSource, Result};
}
