//! # Domain Module
//!
//! Business logic for the membership tracker: member lifecycle, the
//! upcoming-event scheduler, insights aggregation, and greeting emails.
//! Services own their repositories and expose command-style operations to
//! the IO layer.

pub mod commands;
pub mod email_service;
pub mod event_scheduler;
pub mod insights_service;
pub mod member_service;
pub mod models;

pub use email_service::{EmailConfig, EmailDraft, EmailService, GreetingTemplate};
pub use event_scheduler::EventScheduler;
pub use insights_service::InsightsService;
pub use member_service::MemberService;
