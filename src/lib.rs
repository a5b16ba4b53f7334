//! # Hotel Delivery Telegram Bot
//!
//! A Telegram bot for the food-delivery service of the «Царская охота» hotel.
//! It shows a fixed reply keyboard, answers the four menu buttons with canned
//! texts, photos and documents, and exposes a liveness page for the hosting
//! platform.

pub mod assets;
pub mod bot;
pub mod buttons;
pub mod config;
pub mod health;
pub mod localization;
pub mod markup;
pub mod responses;
pub mod send_errors;
