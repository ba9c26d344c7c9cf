pub(crate) mod clock;
pub(crate) mod primitive;
pub(crate) mod scheduler;
