pub(crate) mod camera;
pub(crate) mod clip;
pub(crate) mod spec;
