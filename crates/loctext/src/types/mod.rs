mod language;
mod random;
mod subject;
mod value;

pub use language::{Language, LanguageFlag};
pub use random::SharedRng;
pub use subject::{Character, Gender, Item, Subject, SubjectKind};
pub use value::Value;
