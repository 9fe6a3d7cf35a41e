pub mod file_repository_impl;
