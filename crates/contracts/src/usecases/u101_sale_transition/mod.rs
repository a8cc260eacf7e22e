//! UseCase: перевод продажи в новый статус

pub mod request;

pub use request::TransitionRequest;
