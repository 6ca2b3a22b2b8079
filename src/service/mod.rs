pub mod db;
pub mod s3;
