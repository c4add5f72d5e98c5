pub(crate) mod analyze;
pub(crate) mod generate;
pub(crate) mod migrate;
pub(crate) mod show;
pub(crate) mod validate;
