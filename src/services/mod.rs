pub mod storage;

pub use storage::CourseStorageService;
