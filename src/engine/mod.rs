pub(crate) mod reels;
