pub mod email_service;
pub mod image_url_service;
pub mod pairing;
