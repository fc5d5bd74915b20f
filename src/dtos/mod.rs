pub(crate) mod profile_dtos;
