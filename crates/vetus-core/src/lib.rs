//! # vetus-core
//!
//! Client-side logic for the Vetus archive browser.
//!
//! This crate provides:
//! - An HTTP/JSON client for the archive backend (lookup, threads, emails,
//!   assistant answers, index status)
//! - Hit, thread and email models with field normalization
//! - Location routing and per-window history
//! - The document staging store used to hand document hits to their detail view
//! - Card building and display formatting shared by every view
//! - The two-phase assistant flow (query rewrite, then retrieval answer)
//! - Client configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod card;
pub mod chat;
pub mod config;
pub mod display;
mod error;
pub mod model;
pub mod route;
pub mod staging;

pub use api::{ApiClient, AskRequest, LookupRequest, RagAnswer, RagAskRequest};
pub use card::{CardKind, HitCard};
pub use chat::{AssistantReply, ChatTurn, TurnId, TurnState};
pub use config::{Config, ContextMode};
pub use error::{Error, Result};
pub use model::{DocumentHit, EmailDetail, Hit, ThreadDetail, ThreadHit};
pub use route::{History, Route};
pub use staging::{DocumentRecord, StagingStore};
