/// Marks an entry whose imagery reference is still to be filled in.
pub const IMAGERY_PLACEHOLDER: &str = "REPLACE_WITH_REAL_IMAGE_ID";
