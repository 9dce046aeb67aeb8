pub mod app_record;

pub use app_record::AppRecord;
