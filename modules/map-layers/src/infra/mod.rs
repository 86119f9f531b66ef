pub mod storage;
pub mod wfs;
