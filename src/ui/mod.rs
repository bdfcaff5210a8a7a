/// UI module exports
pub mod components;
pub mod dom;

pub use dom::DomView;
