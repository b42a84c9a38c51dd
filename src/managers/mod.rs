pub mod bookmark_repository;
