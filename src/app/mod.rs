pub mod album_service;
