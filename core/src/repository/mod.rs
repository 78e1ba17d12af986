pub mod csv_file;
pub mod traits;

// Re-export
pub use csv_file::CsvRoutineRepository;
pub use traits::RoutineRepository;
