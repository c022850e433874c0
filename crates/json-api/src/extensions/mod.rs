//! Extension traits

mod depot;
mod money;
mod page;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use money::{MoneyExt, parse_money};
pub(crate) use page::PageExt as _;
pub(crate) use result::ResultExt as _;
