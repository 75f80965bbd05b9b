pub mod catalog_service;
pub mod chat_service;
pub mod grading_service;
pub mod interview_service;
pub mod selection_service;
pub mod session_service;
