//! [covis]'s visualization library.
//!
//! [covis]: https://github.com/covis/covis
//!
//! Turns normalized testing records, state boundary geometry and the FIPS
//! lookup table into screen-space draw commands and renders them as a static
//! HTML report: a choropleth index page and one stacked bar/scatter chart
//! page per state.

#![warn(missing_docs)]

pub(crate) mod color;
pub(crate) mod layout;
pub(crate) mod scale;
pub(crate) mod template;

pub mod error;
pub mod render;
pub mod view;

pub use crate::layout::chart::Category;
pub use crate::scale::Dimensions;
