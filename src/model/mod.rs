//! Notion object model
//!
//! Pages keep their properties as raw JSON so that unknown property kinds
//! survive untouched; [`PropertyValue::from_json`] gives the typed view.

mod page;
mod property;

pub use page::{Page, Person, User};
pub use property::{
    DateValue, FileObject, FileUrl, FormulaValue, PageReference, PartialUser, PropertyValue,
    RichText, RollupValue, SelectOption, UniqueId,
};
