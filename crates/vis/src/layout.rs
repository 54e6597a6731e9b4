pub(crate) mod chart;
pub(crate) mod map;
