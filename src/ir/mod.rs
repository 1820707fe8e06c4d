#[macro_use]
mod typed_node;

pub mod error;
pub mod expressions;
pub mod role;
pub mod statements;
pub mod syntax_node;
pub mod transforms;
pub mod visitor;
