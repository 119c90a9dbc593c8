pub(crate) mod beats;
pub(crate) mod faces;
