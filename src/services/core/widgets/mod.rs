// src/services/core/widgets/mod.rs

pub mod widget_service;

pub use widget_service::WidgetService;
