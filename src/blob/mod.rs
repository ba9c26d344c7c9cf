pub(crate) mod device;
pub(crate) mod shade;
pub(crate) mod surface;
pub(crate) mod tier;
