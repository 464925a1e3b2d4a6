pub mod config;
pub mod dataset;
pub mod matching;
pub mod page;
pub mod text;
pub mod util;

pub use config::*;
pub use dataset::*;
pub use matching::*;
pub use page::*;
pub use text::*;
pub use util::*;
