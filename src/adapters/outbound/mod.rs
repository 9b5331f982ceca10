pub mod clock;
pub mod persistence;
pub mod storage;
