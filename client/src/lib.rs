mod api;
mod app;
mod collection;
mod config;
mod course_form;
mod course_list;
mod enrollment_form;
mod enrollment_list;
mod form;
mod grade_dialog;
mod invalidation;
#[cfg(test)]
mod mock_transport;
mod modal;
mod professor_form;
mod professor_list;
mod route;
#[cfg(test)]
mod scenarios;
mod student_form;
mod student_list;
mod views;

pub use api::{ApiClient, ApiError, EhttpTransport, Transport};
pub use app::HttpApp;
pub use config::ClientConfig;
pub use route::Route;
