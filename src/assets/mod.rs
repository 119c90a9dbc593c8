pub(crate) mod decode;
pub(crate) mod discover;
pub(crate) mod preprocess;
