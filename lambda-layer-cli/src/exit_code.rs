pub(crate) const UNSPECIFIED_ERROR: i32 = 1;
