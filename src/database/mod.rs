pub(crate) mod connection;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod profile_store;
