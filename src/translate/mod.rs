pub mod deepl;
pub mod languages;
pub mod traits;

pub use deepl::DeeplTranslator;
pub use languages::{Language, language_list};
pub use traits::{Translation, Translator};
