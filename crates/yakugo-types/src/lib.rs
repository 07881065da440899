pub mod error;
pub mod lang;
pub mod pos;
pub mod translation;

pub use error::TypeError;
pub use lang::{Lang2, Lang3, Lang5, Languages};
pub use pos::WordPos;
pub use translation::{Translation, TranslationAddParameter, TranslationUpdateParameter};
