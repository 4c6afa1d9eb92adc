pub mod json_file_repo;
