/// Number of records a listing worker buffers before handing them back.
pub const BATCH_SIZE: usize = 64;
