//! `buynest-notify` — outbound notification boundary.
//!
//! The mail transport is an external collaborator consumed as a
//! deliver-or-fail function. This crate defines that contract, the message
//! envelope with its derived plain-text fallback, and the pure rendering of
//! the low-stock alert.

pub mod mailer;
pub mod template;

pub use mailer::{DeliveryStatus, Mailer, MailerError, OutboundEmail, RecordingMailer};
pub use template::{low_stock_alert, resupply_subject};
