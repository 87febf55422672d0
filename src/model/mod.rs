//! Typed records of the Notion wire format.
//!
//! Every polymorphic record family has its own closed enum and a static
//! dispatch table; [`init_registries`] builds all of them up front.

mod block;
mod common;
mod filter;
mod mention;
mod page;
mod parent;
mod property;
mod property_value;
mod query;
mod rich_text;
mod user;

pub use block::{Block, ChildPageBlock, TextBlock, TextBlockContent, ToDoBlock, UnsupportedBlock};
pub use common::{
    BlockCommon, DatabaseReference, DateValue, FileReference, PageReference, SelectOption,
};
pub use filter::{
    CheckboxCondition, CompoundFilter, DateCondition, EmptyObject, FilesCondition, Filter,
    FilterCondition, FormulaCondition, ListCondition, NumberCondition, PropertyFilter,
    SelectCondition, TextCondition,
};
pub use mention::Mention;
pub use page::{Database, PaginatedList, Page, SearchableObject};
pub use parent::Parent;
pub use property::{
    DatabaseProperty, DatabasePropertyType, NumberFormat, RelationConfig, RollupConfig,
    RollupFunction,
};
pub use property_value::{FormulaValue, PropertyTypeValue, PropertyValue, RollupValue};
pub use query::{SearchFilter, SearchObjectKind, SearchSort, Sort, SortDirection, SortTimestamp};
pub use rich_text::{
    plain_text, Annotations, EquationData, Link, RichTextItem, RichTextType, TextContent,
};
pub use user::{BotDetails, Person, User, UserType};

use crate::codec::Discriminated;
use once_cell::sync::Lazy;

/// Forces every dispatch table to be built.
///
/// Tables are otherwise built on first use; calling this once at startup
/// moves that work, and any duplicate-registration panic, ahead of the
/// first request.
pub fn init_registries() {
    let sizes = [
        Block::registry().len(),
        RichTextItem::registry().len(),
        Mention::registry().len(),
        DatabaseProperty::registry().len(),
        PropertyValue::registry().len(),
        FormulaValue::registry().len(),
        RollupValue::registry().len(),
        Parent::registry().len(),
        User::registry().len(),
        SearchableObject::registry().len(),
        Lazy::force(&filter::CONDITIONS).len(),
    ];
    log::debug!(
        "Initialized {} variant registries with {} variants",
        sizes.len(),
        sizes.iter().sum::<usize>()
    );
}
