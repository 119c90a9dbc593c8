pub(crate) mod caption_overlay;
pub(crate) mod composite;
pub(crate) mod grading;
pub(crate) mod transitions;
