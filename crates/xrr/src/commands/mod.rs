pub(crate) mod irep;
pub(crate) mod partition;
pub(crate) mod score;
