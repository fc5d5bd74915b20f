pub(crate) mod profile;
pub(crate) mod user;
