pub(crate) mod auth;
pub(crate) mod validated_json;
